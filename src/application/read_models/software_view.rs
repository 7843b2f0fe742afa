//! Flattened view of one reconciled record

use crate::inventory::domain::{ActionEligibility, InventoryState, SoftwareRecord};
use serde::Serialize;

/// View representation of a reconciled software record
///
/// State and eligible actions are derived here from the record and its
/// view context; they are never stored on the record itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub state: InventoryState,
    pub actions: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_url: Option<String>,
}

impl SoftwareView {
    pub fn from_record(record: &SoftwareRecord) -> Self {
        Self {
            name: record.name.clone(),
            version: record.version.clone(),
            installed_version: record.installed_version.clone(),
            description: record.description.clone(),
            state: InventoryState::of(record),
            actions: ActionEligibility::for_record(record).labels(),
            install_path: record.install_path.clone(),
            official_url: record.official_url.clone(),
        }
    }
}
