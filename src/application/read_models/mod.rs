//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of reconciled records for output.

pub mod inventory_read_model;
pub mod software_view;

pub use inventory_read_model::{InventoryReadModel, PageSummary};
pub use software_view::SoftwareView;
