use crate::inventory::domain::{ActionOutcome, InstallAction, SoftwareRecord};
use crate::inventory::services::IndexStats;
use crate::shared::Result;
use async_trait::async_trait;

/// InventoryPort - Inbound port for inventory reconciliation and actions
///
/// This port defines the interface that external adapters (CLI, UI, etc.)
/// use to scan the machine, reconcile it against the catalog, search and
/// run install actions. It represents the application's public API.
#[async_trait]
pub trait InventoryPort: Send + Sync {
    /// Enumerates software installed on this machine
    ///
    /// Never fails because of individual unreadable entries; an error is
    /// returned only if the scan task itself could not complete.
    async fn scan(&self) -> Result<Vec<SoftwareRecord>>;

    /// Installed records annotated with catalog data
    fn reconcile_installed_view(
        &self,
        installed: Vec<SoftwareRecord>,
        catalog: &[SoftwareRecord],
    ) -> Vec<SoftwareRecord>;

    /// Catalog records annotated with local installation state
    fn reconcile_catalog_view(
        &self,
        page: Vec<SoftwareRecord>,
        installed: &[SoftwareRecord],
    ) -> Vec<SoftwareRecord>;

    /// Replaces the search index with `catalog`
    fn rebuild_index(&self, catalog: Vec<SoftwareRecord>) -> IndexStats;

    /// Searches the current index
    fn search(&self, keyword: &str) -> Vec<SoftwareRecord>;

    /// Runs an install, uninstall or update action to a terminal state
    ///
    /// Precondition failures come back as a `Rejected` outcome, process
    /// failures as `Failed`; neither is an `Err`.
    async fn execute(&self, action: &mut InstallAction) -> ActionOutcome;

    /// Opens a record's install location, or its official URL, in the
    /// default handler
    async fn open(&self, record: &SoftwareRecord) -> ActionOutcome;
}
