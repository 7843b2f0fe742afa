/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (registry, catalog service, processes,
/// console and file system).
pub mod catalog_repository;
pub mod formatter;
pub mod output_presenter;
pub mod process_runner;
pub mod progress_reporter;
pub mod registry_source;

pub use catalog_repository::CatalogRepository;
pub use formatter::RecordFormatter;
pub use output_presenter::OutputPresenter;
pub use process_runner::ProcessRunner;
pub use progress_reporter::ProgressReporter;
pub use registry_source::{RegistryEntry, RegistrySource, UninstallSubtree};
