use super::software_record::SoftwareRecord;
use serde::{Deserialize, Serialize};

/// Largest page the catalog service will hand out
pub const MAX_PAGE_SIZE: u32 = 50;

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A page request with the catalog service's clamping rules applied:
/// the index is 1-based and the size stays within `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page_index: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index: page_index.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Zero-based offset of the first item on this page
    pub fn offset(&self) -> usize {
        (self.page_index as usize - 1) * self.page_size as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of catalog records, in the catalog service's wire form
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogPage {
    pub items: Vec<SoftwareRecord>,
    pub total_count: u64,
    pub total_pages: u32,
    pub page_index: u32,
    pub page_size: u32,
}

impl CatalogPage {
    /// Cuts a page out of a full listing
    pub fn from_listing(records: &[SoftwareRecord], request: PageRequest) -> Self {
        let total = records.len();
        let size = request.page_size() as usize;
        let total_pages = total.div_ceil(size) as u32;
        let items = records
            .iter()
            .skip(request.offset())
            .take(size)
            .cloned()
            .collect();

        Self {
            items,
            total_count: total as u64,
            total_pages,
            page_index: request.page_index(),
            page_size: request.page_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(count: usize) -> Vec<SoftwareRecord> {
        (0..count)
            .map(|i| SoftwareRecord::new(format!("app-{}", i)))
            .collect()
    }

    #[test]
    fn test_page_request_clamps() {
        let request = PageRequest::new(0, 500);
        assert_eq!(request.page_index(), 1);
        assert_eq!(request.page_size(), MAX_PAGE_SIZE);

        let request = PageRequest::new(3, 0);
        assert_eq!(request.page_size(), 1);
        assert_eq!(request.offset(), 2);
    }

    #[test]
    fn test_from_listing_middle_page() {
        let all = records(25);
        let page = CatalogPage::from_listing(&all, PageRequest::new(2, 10));
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].name, "app-10");
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_from_listing_past_end_is_empty() {
        let all = records(5);
        let page = CatalogPage::from_listing(&all, PageRequest::new(4, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_deserialize_paginated_result() {
        let json = r#"{
            "items": [{"name": "Foo", "version": "1.0"}],
            "totalCount": 11,
            "totalPages": 2,
            "pageIndex": 1,
            "pageSize": 10
        }"#;
        let page: CatalogPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 2);
    }
}
