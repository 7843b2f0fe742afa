use super::software_record::SoftwareRecord;
use std::fmt;
use uuid::Uuid;

/// What the user asked to do with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Install,
    Uninstall,
    /// Re-runs the install path and advances the installed version
    Update,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Install => write!(f, "install"),
            ActionKind::Uninstall => write!(f, "uninstall"),
            ActionKind::Update => write!(f, "update"),
        }
    }
}

/// Lifecycle of one action.
///
/// `Idle -> Running -> {Succeeded, Failed, Rejected}`, with `Idle -> Rejected`
/// for unmet preconditions. Terminal states never change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Running,
    Succeeded,
    Failed,
    Rejected,
}

impl ActionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ActionState::Succeeded | ActionState::Failed | ActionState::Rejected
        )
    }

    fn can_transition_to(&self, next: ActionState) -> bool {
        matches!(
            (self, next),
            (ActionState::Idle, ActionState::Running)
                | (ActionState::Idle, ActionState::Rejected)
                | (ActionState::Running, ActionState::Succeeded)
                | (ActionState::Running, ActionState::Failed)
                | (ActionState::Running, ActionState::Rejected)
        )
    }
}

/// An executable plus its argument string, as handed to the OS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub arguments: String,
}

impl CommandLine {
    pub fn new(program: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            arguments: arguments.into(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arguments.is_empty() {
            write!(f, "\"{}\"", self.program)
        } else {
            write!(f, "\"{}\" {}", self.program, self.arguments)
        }
    }
}

/// How an action will be carried out once preconditions are met
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCommand {
    /// Run an installer or uninstaller with elevation and wait for it
    Elevated(CommandLine),
    /// Hand a URL to the default handler, fire-and-forget
    OpenDefault(String),
}

impl ResolvedCommand {
    pub fn requires_elevation(&self) -> bool {
        matches!(self, ResolvedCommand::Elevated(_))
    }
}

/// Why an action was refused before any process started
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    NoUninstallCommand,
    NoInstallSource,
    AlreadyInProgress,
    AlreadyExecuted,
    NothingToOpen,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NoUninstallCommand => write!(f, "no uninstall command"),
            RejectionReason::NoInstallSource => write!(f, "no installer and no official URL"),
            RejectionReason::AlreadyInProgress => write!(f, "action already in progress"),
            RejectionReason::AlreadyExecuted => write!(f, "action has already been executed"),
            RejectionReason::NothingToOpen => {
                write!(f, "no install location and no official URL")
            }
        }
    }
}

/// Terminal status reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Succeeded,
    /// The process ran (or tried to) and signalled failure
    Failed,
    /// Preconditions were not met; retrying will not help
    Rejected,
}

/// Result of executing an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub status: OutcomeStatus,
    pub error_detail: Option<String>,
    pub exit_code: Option<i32>,
}

impl ActionOutcome {
    pub fn succeeded(exit_code: Option<i32>) -> Self {
        Self {
            status: OutcomeStatus::Succeeded,
            error_detail: None,
            exit_code,
        }
    }

    pub fn failed(detail: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            status: OutcomeStatus::Failed,
            error_detail: Some(detail.into()),
            exit_code,
        }
    }

    pub fn rejected(reason: &RejectionReason) -> Self {
        Self {
            status: OutcomeStatus::Rejected,
            error_detail: Some(reason.to_string()),
            exit_code: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Succeeded
    }
}

/// Attempted a transition the state machine does not allow
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid action transition {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: ActionState,
    pub to: ActionState,
}

/// A user-triggered install, uninstall or update of one record.
#[derive(Debug, Clone)]
pub struct InstallAction {
    id: Uuid,
    kind: ActionKind,
    target: SoftwareRecord,
    command: Option<ResolvedCommand>,
    state: ActionState,
}

impl InstallAction {
    pub fn new(kind: ActionKind, target: SoftwareRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            target,
            command: None,
            state: ActionState::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn target(&self) -> &SoftwareRecord {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut SoftwareRecord {
        &mut self.target
    }

    pub fn into_target(self) -> SoftwareRecord {
        self.target
    }

    pub fn command(&self) -> Option<&ResolvedCommand> {
        self.command.as_ref()
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    /// Elevation is always requested for installer processes
    pub fn requires_elevation(&self) -> bool {
        self.command
            .as_ref()
            .map(ResolvedCommand::requires_elevation)
            .unwrap_or(false)
    }

    pub fn set_command(&mut self, command: ResolvedCommand) {
        self.command = Some(command);
    }

    pub fn transition(&mut self, next: ActionState) -> Result<(), InvalidTransition> {
        if !self.state.can_transition_to(next) {
            return Err(InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    /// Reflects a successful action on the target record
    pub fn apply_success(&mut self) {
        match self.kind {
            ActionKind::Install | ActionKind::Update => {
                self.target.is_installed = true;
                if self.target.version.is_some() {
                    self.target.installed_version = self.target.version.clone();
                }
            }
            ActionKind::Uninstall => {
                self.target.is_installed = false;
                self.target.installed_version = None;
            }
        }
    }
}
