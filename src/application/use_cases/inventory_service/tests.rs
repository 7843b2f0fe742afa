use super::*;
use crate::inventory::domain::{ActionEligibility, CommandLine, OutcomeStatus};
use crate::ports::outbound::{RegistryEntry, UninstallSubtree};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

// Mock implementations for testing
struct MockRegistry {
    entries: Vec<RegistryEntry>,
}

impl RegistrySource for MockRegistry {
    fn subkey_names(&self, subtree: UninstallSubtree) -> Result<Vec<String>> {
        match subtree {
            UninstallSubtree::Native => Ok((0..self.entries.len()).map(|i| i.to_string()).collect()),
            UninstallSubtree::Wow6432 => anyhow::bail!("not present"),
        }
    }

    fn read_entry(&self, _subtree: UninstallSubtree, subkey: &str) -> Result<RegistryEntry> {
        let index: usize = subkey.parse()?;
        Ok(self.entries[index].clone())
    }
}

struct MockCatalog {
    records: Vec<SoftwareRecord>,
    fetch_all_calls: AtomicUsize,
}

impl MockCatalog {
    fn new(records: Vec<SoftwareRecord>) -> Self {
        Self {
            records,
            fetch_all_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CatalogRepository for MockCatalog {
    async fn fetch_all(&self) -> Result<Vec<SoftwareRecord>> {
        self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<CatalogPage> {
        Ok(CatalogPage::from_listing(&self.records, request))
    }

    async fn search_remote(&self, keyword: &str) -> Result<Vec<SoftwareRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.name.contains(keyword))
            .cloned()
            .collect())
    }

    fn describe(&self) -> String {
        "mock catalog".to_string()
    }
}

#[derive(Default)]
struct MockRunner {
    delay: Option<Duration>,
    spawned: Mutex<Vec<CommandLine>>,
    opened: Mutex<Vec<String>>,
}

#[async_trait]
impl ProcessRunner for MockRunner {
    async fn spawn_elevated(&self, command: &CommandLine) -> Result<i32> {
        self.spawned.lock().unwrap().push(command.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(0)
    }

    async fn open_default(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct MockProgressReporter {
    messages: Mutex<Vec<String>>,
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_progress(&self, _current: usize, _total: usize, message: Option<&str>) {
        if let Some(message) = message {
            self.report(message);
        }
    }

    fn report_error(&self, message: &str) {
        self.report(message);
    }

    fn report_completion(&self, message: &str) {
        self.report(message);
    }
}

type TestService = InventoryService<MockRegistry, MockCatalog, MockRunner, MockProgressReporter>;

fn registry_entry(name: &str, version: Option<&str>) -> RegistryEntry {
    RegistryEntry {
        display_name: Some(name.to_string()),
        display_version: version.map(String::from),
        uninstall_string: Some(format!("\"C:\\Program Files\\{}\\uninstall.exe\"", name)),
        ..Default::default()
    }
}

fn service_with(
    installed: Vec<RegistryEntry>,
    catalog: Vec<SoftwareRecord>,
    runner: MockRunner,
) -> (TempDir, TestService) {
    let setup_dir = TempDir::new().unwrap();
    let service = InventoryService::new(
        MockRegistry { entries: installed },
        MockCatalog::new(catalog),
        runner,
        MockProgressReporter::default(),
        setup_dir.path().to_path_buf(),
        50,
    );
    (setup_dir, service)
}

#[tokio::test]
async fn test_installed_foo_without_version_against_catalog_foo_2() {
    let (_dir, service) = service_with(
        vec![registry_entry("Foo", None)],
        vec![SoftwareRecord::new("Foo").with_version("2.0")],
        MockRunner::default(),
    );

    let installed = service.installed_view().await.unwrap();
    assert_eq!(installed.len(), 1);
    assert!(installed[0].exists_in_catalog);

    let catalog = service.catalog_view().await.unwrap();
    let foo = &catalog[0];
    assert!(foo.is_installed);
    assert_eq!(foo.installed_version_str(), "");
    assert!(ActionEligibility::for_record(foo).update);
}

#[tokio::test]
async fn test_catalog_a_and_b_with_a_installed() {
    let (_dir, service) = service_with(
        vec![registry_entry("A", Some("1.0"))],
        vec![
            SoftwareRecord::new("A").with_version("1.0"),
            SoftwareRecord::new("B").with_version("1.0"),
        ],
        MockRunner::default(),
    );

    let page = service.catalog_page(PageRequest::default()).await.unwrap();
    let a = &page.items[0];
    let b = &page.items[1];

    assert!(a.is_installed);
    assert!(!ActionEligibility::for_record(a).update);
    assert!(!b.is_installed);
    assert!(ActionEligibility::for_record(b).install);
}

#[tokio::test]
async fn test_search_builds_index_once() {
    let (_dir, service) = service_with(
        vec![],
        vec![
            SoftwareRecord::new("Mozilla Firefox").with_description("Web browser"),
            SoftwareRecord::new("7-Zip").with_description("File archiver"),
        ],
        MockRunner::default(),
    );

    let hits = service.search_catalog("firefx").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Mozilla Firefox");

    service.search_catalog("zip").await.unwrap();
    assert_eq!(service.catalog.fetch_all_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_rebuild_index_replaces_contents() {
    let (_dir, service) = service_with(vec![], vec![], MockRunner::default());

    let stats = service.rebuild_index(vec![SoftwareRecord::new("Only")]);
    assert_eq!(stats.document_count, 1);
    assert_eq!(service.search("").len(), 1);
}

#[tokio::test]
async fn test_perform_uninstall_by_name() {
    let (_dir, service) = service_with(
        vec![registry_entry("Foo", Some("1.0"))],
        vec![],
        MockRunner::default(),
    );

    let response = service
        .perform(ActionRequest::new(ActionKind::Uninstall, "foo"))
        .await
        .unwrap();

    assert!(response.outcome.is_success());
    assert!(!response.record.is_installed);
    assert_eq!(service.orchestrator.runner_calls(), 1);
}

#[tokio::test]
async fn test_perform_unknown_name_is_not_found() {
    let (_dir, service) = service_with(vec![], vec![], MockRunner::default());

    let error = service
        .perform(ActionRequest::new(ActionKind::Install, "Ghost"))
        .await
        .unwrap_err();

    assert!(matches!(
        error.downcast_ref::<SoftkeeperError>(),
        Some(SoftkeeperError::SoftwareNotFound { .. })
    ));
}

#[tokio::test]
async fn test_perform_install_without_source_is_rejected() {
    let (_dir, service) = service_with(
        vec![],
        vec![SoftwareRecord::new("Foo").with_version("1.0")],
        MockRunner::default(),
    );

    let response = service
        .perform(ActionRequest::new(ActionKind::Install, "Foo"))
        .await
        .unwrap();

    assert_eq!(response.outcome.status, OutcomeStatus::Rejected);
    let messages = service.progress_reporter.messages.lock().unwrap();
    assert!(messages
        .iter()
        .any(|m| m.contains("no installer and no official URL")));
}

#[tokio::test]
async fn test_concurrent_action_on_same_record_is_rejected() {
    let runner = MockRunner {
        delay: Some(Duration::from_millis(100)),
        ..Default::default()
    };
    let (_dir, service) = service_with(vec![], vec![], runner);

    let mut record = SoftwareRecord::new("Foo");
    record.is_installed = true;
    record.uninstall_command = Some("u.exe".to_string());

    let mut first = InstallAction::new(ActionKind::Uninstall, record.clone());
    let mut second = InstallAction::new(ActionKind::Uninstall, record.clone());

    let (first_outcome, second_outcome) =
        tokio::join!(service.execute(&mut first), service.execute(&mut second));

    assert!(first_outcome.is_success());
    assert_eq!(second_outcome.status, OutcomeStatus::Rejected);
    assert_eq!(
        second_outcome.error_detail.as_deref(),
        Some("action already in progress")
    );
    assert_eq!(second.state(), ActionState::Rejected);
    assert_eq!(service.orchestrator.runner_calls(), 1);

    // the slot is released once the first action finishes
    let mut third = InstallAction::new(ActionKind::Uninstall, record);
    assert!(service.execute(&mut third).await.is_success());
}

#[tokio::test]
async fn test_actions_on_different_records_run_concurrently() {
    let runner = MockRunner {
        delay: Some(Duration::from_millis(50)),
        ..Default::default()
    };
    let (_dir, service) = service_with(vec![], vec![], runner);

    let make = |name: &str| {
        let mut record = SoftwareRecord::new(name);
        record.is_installed = true;
        record.uninstall_command = Some(format!("{}.exe", name));
        InstallAction::new(ActionKind::Uninstall, record)
    };
    let mut foo = make("Foo");
    let mut bar = make("Bar");

    let (foo_outcome, bar_outcome) =
        tokio::join!(service.execute(&mut foo), service.execute(&mut bar));

    assert!(foo_outcome.is_success());
    assert!(bar_outcome.is_success());
}

#[tokio::test]
async fn test_open_by_name_requires_installed_entry() {
    let (_dir, service) = service_with(
        vec![registry_entry("Foo", Some("1.0"))],
        vec![
            SoftwareRecord::new("Foo").with_official_url("https://foo.example.com"),
            SoftwareRecord::new("Bar").with_official_url("https://bar.example.com"),
        ],
        MockRunner::default(),
    );

    let outcome = service.open_by_name("foo").await.unwrap();
    assert!(outcome.is_success());
    assert!(service.open_by_name("Bar").await.is_err());
}

impl ProcessOrchestrator<MockRunner> {
    fn runner_calls(&self) -> usize {
        self.runner().spawned.lock().unwrap().len()
    }
}

#[test]
fn test_capitalize() {
    assert_eq!(capitalize("install"), "Install");
    assert_eq!(capitalize(""), "");
}
