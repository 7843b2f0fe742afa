use crate::inventory::domain::{
    ActionKind, ActionOutcome, ActionState, CommandLine, InstallAction, RejectionReason,
    ResolvedCommand, SoftwareRecord,
};
use crate::inventory::services::parse_uninstall_command;
use crate::ports::outbound::ProcessRunner;
use crate::shared::security::validate_setup_file_name;
use std::path::PathBuf;

/// ProcessOrchestrator - drives install actions through their state machine
///
/// Resolves each action to an elevated process or a URL to open, runs it
/// through the injected [`ProcessRunner`] and records the terminal state.
/// Installers are always started elevated. Actions are not serialized here;
/// callers that need one action per record enforce it themselves.
///
/// # Type Parameters
/// * `P` - ProcessRunner implementation
pub struct ProcessOrchestrator<P> {
    runner: P,
    setup_dir: PathBuf,
}

impl<P: ProcessRunner> ProcessOrchestrator<P> {
    /// # Arguments
    /// * `runner` - Launches processes and default handlers
    /// * `setup_dir` - Directory holding local installers; only read
    pub fn new(runner: P, setup_dir: PathBuf) -> Self {
        Self { runner, setup_dir }
    }

    pub fn runner(&self) -> &P {
        &self.runner
    }

    /// Decides how `action` would be carried out, or why it cannot be
    pub fn resolve(&self, action: &InstallAction) -> Result<ResolvedCommand, RejectionReason> {
        let target = action.target();
        match action.kind() {
            ActionKind::Uninstall => target
                .uninstall_command_str()
                .and_then(parse_uninstall_command)
                .map(ResolvedCommand::Elevated)
                .ok_or(RejectionReason::NoUninstallCommand),
            ActionKind::Install | ActionKind::Update => {
                if let Some(installer) = self.local_installer(target) {
                    return Ok(ResolvedCommand::Elevated(CommandLine::new(
                        installer.display().to_string(),
                        "",
                    )));
                }
                target
                    .official_url_str()
                    .map(|url| ResolvedCommand::OpenDefault(url.to_string()))
                    .ok_or(RejectionReason::NoInstallSource)
            }
        }
    }

    /// Runs `action` to a terminal state.
    ///
    /// A rejected action never starts a process. On success the target
    /// record is updated to reflect the new installation state.
    pub async fn execute(&self, action: &mut InstallAction) -> ActionOutcome {
        if action.state() != ActionState::Idle {
            return ActionOutcome::rejected(&RejectionReason::AlreadyExecuted);
        }

        let command = match self.resolve(action) {
            Ok(command) => command,
            Err(reason) => {
                tracing::info!(action = %action.kind(), software = %action.target().name, %reason, "action rejected");
                let outcome = ActionOutcome::rejected(&reason);
                return Self::finish(action, ActionState::Rejected, outcome);
            }
        };

        action.set_command(command.clone());
        if let Err(e) = action.transition(ActionState::Running) {
            tracing::warn!(error = %e, "action could not start");
            return ActionOutcome::rejected(&RejectionReason::AlreadyExecuted);
        }
        tracing::debug!(id = %action.id(), action = %action.kind(), software = %action.target().name, "action running");

        let outcome = match &command {
            ResolvedCommand::Elevated(command_line) => {
                match self.runner.spawn_elevated(command_line).await {
                    Ok(0) => ActionOutcome::succeeded(Some(0)),
                    Ok(code) => ActionOutcome::failed(
                        format!("{} exited with code {}", command_line.program, code),
                        Some(code),
                    ),
                    Err(e) => ActionOutcome::failed(format!("{:#}", e), None),
                }
            }
            ResolvedCommand::OpenDefault(url) => match self.runner.open_default(url).await {
                Ok(()) => ActionOutcome::succeeded(None),
                Err(e) => ActionOutcome::failed(format!("{:#}", e), None),
            },
        };

        if outcome.is_success() {
            action.apply_success();
            Self::finish(action, ActionState::Succeeded, outcome)
        } else {
            Self::finish(action, ActionState::Failed, outcome)
        }
    }

    /// Opens the record's install location, falling back to its official URL
    pub async fn open(&self, record: &SoftwareRecord) -> ActionOutcome {
        let target = record
            .install_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .or_else(|| record.official_url_str());

        let Some(target) = target else {
            return ActionOutcome::rejected(&RejectionReason::NothingToOpen);
        };

        match self.runner.open_default(target).await {
            Ok(()) => ActionOutcome::succeeded(None),
            Err(e) => ActionOutcome::failed(format!("{:#}", e), None),
        }
    }

    /// The record's installer, if it names a file present in the setup directory
    fn local_installer(&self, record: &SoftwareRecord) -> Option<PathBuf> {
        let file_name = record.setup_file_str()?;
        if let Err(e) = validate_setup_file_name(file_name) {
            tracing::warn!(software = %record.name, error = %e, "ignoring setup file name");
            return None;
        }

        let path = self.setup_dir.join(file_name);
        if path.is_file() {
            Some(path)
        } else {
            tracing::debug!(path = %path.display(), "setup file not present");
            None
        }
    }

    fn finish(action: &mut InstallAction, state: ActionState, outcome: ActionOutcome) -> ActionOutcome {
        if let Err(e) = action.transition(state) {
            tracing::warn!(error = %e, "action state not updated");
        }
        tracing::info!(
            id = %action.id(),
            action = %action.kind(),
            software = %action.target().name,
            state = ?action.state(),
            exit_code = ?outcome.exit_code,
            "action finished"
        );
        outcome
    }
}
