use super::{InventoryScanner, ProcessOrchestrator};
use crate::application::dto::{ActionRequest, ActionResponse};
use crate::inventory::domain::{
    ActionKind, ActionOutcome, ActionState, CatalogPage, InstallAction, PageRequest,
    RejectionReason, SoftwareRecord,
};
use crate::inventory::services::{CatalogIndex, IndexStats, Reconciler};
use crate::ports::inbound::InventoryPort;
use crate::ports::outbound::{CatalogRepository, ProcessRunner, ProgressReporter, RegistrySource};
use crate::shared::error::SoftkeeperError;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// InventoryService - facade over scanning, reconciliation, search and actions
///
/// This use case wires the scanner, the catalog, the search index and the
/// process orchestrator together using generic dependency injection. It is
/// the implementation of the [`InventoryPort`] inbound port, plus the
/// composite operations the CLI needs (views that fetch and scan
/// concurrently, actions resolved by name).
///
/// At most one action runs per record name at a time; a second request for
/// the same name is rejected while the first is in flight.
///
/// # Type Parameters
/// * `R` - RegistrySource implementation
/// * `C` - CatalogRepository implementation
/// * `P` - ProcessRunner implementation
/// * `PR` - ProgressReporter implementation
pub struct InventoryService<R, C, P, PR> {
    scanner: Arc<InventoryScanner<R>>,
    catalog: C,
    orchestrator: ProcessOrchestrator<P>,
    index: CatalogIndex,
    in_flight: DashMap<String, Uuid>,
    progress_reporter: PR,
}

/// Releases a record's in-flight slot when the action ends
struct InFlightGuard<'a> {
    slots: &'a DashMap<String, Uuid>,
    key: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.slots.remove(&self.key);
    }
}

impl<R, C, P, PR> InventoryService<R, C, P, PR>
where
    R: RegistrySource + 'static,
    C: CatalogRepository,
    P: ProcessRunner,
    PR: ProgressReporter,
{
    /// Creates a new InventoryService with injected dependencies
    ///
    /// # Arguments
    /// * `registry` - Source of the machine inventory
    /// * `catalog` - Source of catalog entries
    /// * `runner` - Launches installers and default handlers
    /// * `progress_reporter` - User feedback sink
    /// * `setup_dir` - Directory holding local installers
    /// * `search_result_limit` - Maximum search hits; 0 means unlimited
    pub fn new(
        registry: R,
        catalog: C,
        runner: P,
        progress_reporter: PR,
        setup_dir: PathBuf,
        search_result_limit: usize,
    ) -> Self {
        Self {
            scanner: Arc::new(InventoryScanner::new(registry)),
            catalog,
            orchestrator: ProcessOrchestrator::new(runner, setup_dir),
            index: CatalogIndex::with_result_limit(search_result_limit),
            in_flight: DashMap::new(),
            progress_reporter,
        }
    }

    /// Software installed on this machine, annotated with catalog data
    pub async fn installed_view(&self) -> Result<Vec<SoftwareRecord>> {
        self.progress_reporter
            .report("🔍 Scanning installed software...");
        let (installed, catalog) = futures::try_join!(self.scan(), self.catalog.fetch_all())?;
        self.progress_reporter.report(&format!(
            "✅ Found {} installed package(s)",
            installed.len()
        ));

        Ok(self.reconcile_installed_view(installed, &catalog))
    }

    /// One catalog page, annotated with local installation state
    pub async fn catalog_page(&self, request: PageRequest) -> Result<CatalogPage> {
        self.progress_reporter.report(&format!(
            "📖 Loading catalog page {} from {}",
            request.page_index(),
            self.catalog.describe()
        ));
        let (mut page, installed) =
            futures::try_join!(self.catalog.fetch_page(request), self.scan())?;

        page.items = self.reconcile_catalog_view(std::mem::take(&mut page.items), &installed);
        Ok(page)
    }

    /// The full catalog, annotated with local installation state
    pub async fn catalog_view(&self) -> Result<Vec<SoftwareRecord>> {
        let (catalog, installed) = futures::try_join!(self.catalog.fetch_all(), self.scan())?;
        Ok(self.reconcile_catalog_view(catalog, &installed))
    }

    /// Searches the local index, building it from the catalog on first use
    pub async fn search_catalog(&self, keyword: &str) -> Result<Vec<SoftwareRecord>> {
        if self.index.stats().built_at.is_none() {
            self.refresh_index().await?;
        }

        let hits = self.search(keyword);
        let installed = self.scan().await?;
        Ok(self.reconcile_catalog_view(hits, &installed))
    }

    /// Searches through the catalog source's own matching
    pub async fn search_remote(&self, keyword: &str) -> Result<Vec<SoftwareRecord>> {
        let (hits, installed) =
            futures::try_join!(self.catalog.search_remote(keyword), self.scan())?;
        Ok(self.reconcile_catalog_view(hits, &installed))
    }

    /// Rebuilds the search index from a fresh catalog listing
    pub async fn refresh_index(&self) -> Result<IndexStats> {
        let catalog = self.catalog.fetch_all().await?;
        let stats = self.rebuild_index(catalog);
        tracing::debug!(documents = stats.document_count, "search index rebuilt");
        Ok(stats)
    }

    /// Runs an action against the record named in `request`.
    ///
    /// Install and update targets come from the catalog view; uninstall
    /// targets from the installed view.
    ///
    /// # Errors
    /// Returns an error if no record has that name or the views cannot be
    /// built. Rejected and failed actions are reported in the response.
    pub async fn perform(&self, request: ActionRequest) -> Result<ActionResponse> {
        let (records, hint) = match request.kind {
            ActionKind::Uninstall => (
                self.installed_view().await?,
                "Run `softkeeper installed` to see software on this machine",
            ),
            ActionKind::Install | ActionKind::Update => (
                self.catalog_view().await?,
                "Run `softkeeper list` or `softkeeper search` to see catalog entries",
            ),
        };

        let target = records
            .into_iter()
            .find(|record| record.has_name(&request.name))
            .ok_or_else(|| SoftkeeperError::SoftwareNotFound {
                name: request.name.clone(),
                hint: hint.to_string(),
            })?;

        let mut action = InstallAction::new(request.kind, target);
        let verb = capitalize(&request.kind.to_string());
        self.progress_reporter.report_progress(
            0,
            0,
            Some(&format!("{} of {} in progress...", verb, action.target().name)),
        );

        let outcome = self.execute(&mut action).await;
        if outcome.is_success() {
            self.progress_reporter.report_completion(&format!(
                "✅ {} of {} succeeded",
                verb,
                action.target().name
            ));
        } else {
            self.progress_reporter.report_error(&format!(
                "❌ {} of {} did not succeed: {}",
                verb,
                action.target().name,
                outcome.error_detail.as_deref().unwrap_or("unknown error")
            ));
        }

        Ok(ActionResponse {
            action_id: action.id(),
            kind: action.kind(),
            outcome,
            record: action.into_target(),
        })
    }

    /// Opens the named installed record's location or official URL
    pub async fn open_by_name(&self, name: &str) -> Result<ActionOutcome> {
        let target = self
            .catalog_view()
            .await?
            .into_iter()
            .find(|record| record.has_name(name) && record.is_installed)
            .ok_or_else(|| SoftkeeperError::SoftwareNotFound {
                name: name.to_string(),
                hint: "Only installed catalog entries can be opened".to_string(),
            })?;

        Ok(self.open(&target).await)
    }

    fn claim(&self, key: String, id: Uuid) -> Option<InFlightGuard<'_>> {
        match self.in_flight.entry(key.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(id);
                Some(InFlightGuard {
                    slots: &self.in_flight,
                    key,
                })
            }
        }
    }
}

#[async_trait]
impl<R, C, P, PR> InventoryPort for InventoryService<R, C, P, PR>
where
    R: RegistrySource + 'static,
    C: CatalogRepository,
    P: ProcessRunner,
    PR: ProgressReporter,
{
    async fn scan(&self) -> Result<Vec<SoftwareRecord>> {
        let scanner = Arc::clone(&self.scanner);
        tokio::task::spawn_blocking(move || scanner.scan())
            .await
            .map_err(|e| anyhow::anyhow!("Inventory scan did not complete: {}", e))
    }

    fn reconcile_installed_view(
        &self,
        installed: Vec<SoftwareRecord>,
        catalog: &[SoftwareRecord],
    ) -> Vec<SoftwareRecord> {
        Reconciler::installed_view(installed, catalog)
    }

    fn reconcile_catalog_view(
        &self,
        page: Vec<SoftwareRecord>,
        installed: &[SoftwareRecord],
    ) -> Vec<SoftwareRecord> {
        Reconciler::catalog_view(page, installed)
    }

    fn rebuild_index(&self, catalog: Vec<SoftwareRecord>) -> IndexStats {
        self.index.rebuild(catalog);
        self.index.stats()
    }

    fn search(&self, keyword: &str) -> Vec<SoftwareRecord> {
        self.index.search(keyword)
    }

    async fn execute(&self, action: &mut InstallAction) -> ActionOutcome {
        let Some(_guard) = self.claim(action.target().identity_key(), action.id()) else {
            tracing::info!(software = %action.target().name, "action already in progress");
            if action.state() == ActionState::Idle {
                let _ = action.transition(ActionState::Rejected);
            }
            return ActionOutcome::rejected(&RejectionReason::AlreadyInProgress);
        };

        self.orchestrator.execute(action).await
    }

    async fn open(&self, record: &SoftwareRecord) -> ActionOutcome {
        self.orchestrator.open(record).await
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
