/// Process adapters for installers and default handlers
mod system_process_runner;

pub use system_process_runner::SystemProcessRunner;
