//! softkeeper - installed-software inventory reconciled against a catalog
//!
//! This library scans the software installed on a machine, reconciles it
//! against a remote software catalog, searches the catalog with a typo
//! tolerant index, and drives installers and uninstallers through an
//! action state machine. It follows hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`inventory`): Records, version ordering, the action state
//!   machine, reconciliation and search
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use softkeeper::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let catalog = JsonFileCatalog::new(PathBuf::from("catalog.json"));
//!
//! // Create use case
//! let service = InventoryService::new(
//!     SystemRegistry::new(),
//!     catalog,
//!     SystemProcessRunner::new(),
//!     StderrProgressReporter::new(),
//!     PathBuf::from("setups"),
//!     50,
//! );
//!
//! // Execute
//! let hits = service.search_catalog("firefox").await?;
//!
//! // Format output
//! let model = InventoryReadModel::from_records("Search", &hits);
//! println!("{}", TableFormatter::new().format(&model)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod inventory;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, JsonFileCatalog, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter};
    pub use crate::adapters::outbound::network::{CachingCatalogRepository, HttpCatalogRepository};
    pub use crate::adapters::outbound::process::SystemProcessRunner;
    pub use crate::adapters::outbound::registry::SystemRegistry;
    pub use crate::application::dto::{ActionRequest, ActionResponse, OutputFormat};
    pub use crate::application::read_models::{InventoryReadModel, SoftwareView};
    pub use crate::application::use_cases::{
        InventoryScanner, InventoryService, ProcessOrchestrator,
    };
    pub use crate::inventory::domain::{
        compare, ActionEligibility, ActionKind, ActionOutcome, ActionState, CatalogPage,
        InstallAction, InventoryState, OutcomeStatus, PageRequest, RejectionReason,
        SoftwareRecord, ViewContext,
    };
    pub use crate::inventory::services::{CatalogIndex, Reconciler};
    pub use crate::ports::inbound::InventoryPort;
    pub use crate::ports::outbound::{
        CatalogRepository, OutputPresenter, ProcessRunner, ProgressReporter, RecordFormatter,
        RegistryEntry, RegistrySource, UninstallSubtree,
    };
    pub use crate::shared::Result;
}
