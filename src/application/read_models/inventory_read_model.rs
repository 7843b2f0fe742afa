//! Read model handed to record formatters

use super::software_view::SoftwareView;
use crate::inventory::domain::{CatalogPage, SoftwareRecord};
use serde::Serialize;

/// Paging details of a catalog listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub page_index: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

/// A titled listing of reconciled records
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReadModel {
    pub title: String,
    pub items: Vec<SoftwareView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageSummary>,
}

impl InventoryReadModel {
    pub fn from_records(title: impl Into<String>, records: &[SoftwareRecord]) -> Self {
        Self {
            title: title.into(),
            items: records.iter().map(SoftwareView::from_record).collect(),
            page: None,
        }
    }

    /// Listing of a reconciled catalog page
    pub fn from_page(title: impl Into<String>, page: &CatalogPage) -> Self {
        Self {
            page: Some(PageSummary {
                page_index: page.page_index,
                page_size: page.page_size,
                total_pages: page.total_pages,
                total_count: page.total_count,
            }),
            ..Self::from_records(title, &page.items)
        }
    }

    /// Listing of raw scan results, which are not yet reconciled against
    /// the catalog and so have no actions to offer
    pub fn from_scan(title: impl Into<String>, records: &[SoftwareRecord]) -> Self {
        let mut model = Self::from_records(title, records);
        for item in &mut model.items {
            item.actions.clear();
        }
        model
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
