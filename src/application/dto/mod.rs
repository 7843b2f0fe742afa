/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod action_request;
mod output_format;

pub use action_request::{ActionRequest, ActionResponse};
pub use output_format::OutputFormat;
