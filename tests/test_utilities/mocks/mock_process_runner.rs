use async_trait::async_trait;
use softkeeper::inventory::domain::CommandLine;
use softkeeper::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ProcessRunner recording every launch
///
/// Clones share their launch records, so a test can keep one handle and move
/// another into the code under test.
#[derive(Default, Clone)]
pub struct MockProcessRunner {
    exit_code: i32,
    spawn_error: Option<String>,
    spawned: Arc<Mutex<Vec<CommandLine>>>,
    opened: Arc<Mutex<Vec<String>>>,
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every elevated process exits with `code`
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Every elevated launch fails before the process starts
    pub fn failing_spawn(mut self, message: &str) -> Self {
        self.spawn_error = Some(message.to_string());
        self
    }

    pub fn spawned(&self) -> Vec<CommandLine> {
        self.spawned.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for MockProcessRunner {
    async fn spawn_elevated(&self, command: &CommandLine) -> Result<i32> {
        if let Some(message) = &self.spawn_error {
            anyhow::bail!("{}", message);
        }
        self.spawned.lock().unwrap().push(command.clone());
        Ok(self.exit_code)
    }

    async fn open_default(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
