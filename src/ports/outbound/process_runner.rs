use crate::inventory::domain::CommandLine;
use crate::shared::Result;
use async_trait::async_trait;

/// ProcessRunner port for launching installers and URLs
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Starts `command` with administrative elevation and waits for it to exit
    ///
    /// # Returns
    /// The process exit code
    ///
    /// # Errors
    /// Returns an error if the process cannot be started, including when the
    /// user declines the elevation prompt
    async fn spawn_elevated(&self, command: &CommandLine) -> Result<i32>;

    /// Hands `url` to the system's default handler without waiting for it
    ///
    /// # Errors
    /// Returns an error if the handler cannot be launched
    async fn open_default(&self, url: &str) -> Result<()>;
}
