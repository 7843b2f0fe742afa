pub mod catalog_page;
pub mod eligibility;
pub mod install_action;
pub mod software_record;
pub mod version;

pub use catalog_page::{CatalogPage, PageRequest};
pub use eligibility::{ActionEligibility, InventoryState};
pub use install_action::{
    ActionKind, ActionOutcome, ActionState, CommandLine, InstallAction, OutcomeStatus,
    RejectionReason, ResolvedCommand,
};
pub use software_record::{identity_key, SoftwareRecord, ViewContext};
pub use version::{compare, VersionTuple};
