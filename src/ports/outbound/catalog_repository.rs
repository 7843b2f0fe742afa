use crate::inventory::domain::{CatalogPage, PageRequest, SoftwareRecord};
use crate::shared::Result;
use async_trait::async_trait;

/// CatalogRepository port for reading the software catalog
///
/// This port abstracts the catalog source (the remote catalog service or an
/// exported JSON file). Implementations must be `Send + Sync` so that a full
/// listing and a machine scan can run concurrently.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Fetches every catalog entry, in catalog order
    ///
    /// # Errors
    /// Returns an error if the source is unreachable or its content
    /// cannot be parsed
    async fn fetch_all(&self) -> Result<Vec<SoftwareRecord>>;

    /// Fetches one page of the catalog
    ///
    /// # Errors
    /// Returns an error if the source is unreachable or its content
    /// cannot be parsed
    async fn fetch_page(&self, request: PageRequest) -> Result<CatalogPage>;

    /// Substring search performed by the catalog source itself
    ///
    /// # Errors
    /// Returns an error if the source is unreachable or its content
    /// cannot be parsed
    async fn search_remote(&self, keyword: &str) -> Result<Vec<SoftwareRecord>>;

    /// Human-readable name of the source, used in messages
    fn describe(&self) -> String;
}
