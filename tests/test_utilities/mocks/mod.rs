/// Mock implementations for testing
mod mock_catalog_repository;
mod mock_process_runner;
mod mock_progress_reporter;
mod mock_registry_source;

pub use mock_catalog_repository::MockCatalogRepository;
pub use mock_process_runner::MockProcessRunner;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_registry_source::MockRegistrySource;
