use crate::inventory::domain::CommandLine;
use crate::ports::outbound::ProcessRunner;
use crate::shared::Result;
use async_trait::async_trait;
use tokio::process::Command;

/// SystemProcessRunner adapter for launching OS processes
///
/// This adapter implements the ProcessRunner port with `tokio::process`, so
/// waiting on an installer suspends the task instead of blocking a thread.
///
/// - Elevation: PowerShell `Start-Process -Verb RunAs` on Windows, `sudo`
///   elsewhere.
/// - Default handler: `url.dll` on Windows, `open` on macOS, `xdg-open`
///   elsewhere.
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Program and arguments that run `command` elevated and propagate its
    /// exit code
    #[cfg(windows)]
    fn elevated_invocation(command: &CommandLine) -> (String, Vec<String>) {
        let mut script = format!(
            "$p = Start-Process -FilePath {}",
            powershell_quote(&command.program)
        );
        if !command.arguments.trim().is_empty() {
            script.push_str(&format!(
                " -ArgumentList {}",
                powershell_quote(&command.arguments)
            ));
        }
        script.push_str(" -Verb RunAs -Wait -PassThru; exit $p.ExitCode");

        (
            "powershell".to_string(),
            vec![
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
                script,
            ],
        )
    }

    #[cfg(not(windows))]
    fn elevated_invocation(command: &CommandLine) -> (String, Vec<String>) {
        let mut arguments = vec![command.program.clone()];
        arguments.extend(command.arguments.split_whitespace().map(String::from));
        ("sudo".to_string(), arguments)
    }

    fn open_invocation(target: &str) -> (String, Vec<String>) {
        if cfg!(windows) {
            (
                "rundll32".to_string(),
                vec!["url.dll,FileProtocolHandler".to_string(), target.to_string()],
            )
        } else if cfg!(target_os = "macos") {
            ("open".to_string(), vec![target.to_string()])
        } else {
            ("xdg-open".to_string(), vec![target.to_string()])
        }
    }
}

impl Default for SystemProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-quoted PowerShell literal; embedded quotes are doubled
#[cfg(windows)]
fn powershell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    async fn spawn_elevated(&self, command: &CommandLine) -> Result<i32> {
        let (program, arguments) = Self::elevated_invocation(command);
        tracing::info!(%command, launcher = %program, "starting elevated process");

        let status = Command::new(&program)
            .args(&arguments)
            .status()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start {}: {}", command.program, e))?;

        // A signal-terminated process has no exit code
        let code = status.code().unwrap_or(-1);
        tracing::info!(%command, exit_code = code, "elevated process exited");
        Ok(code)
    }

    async fn open_default(&self, url: &str) -> Result<()> {
        let (program, arguments) = Self::open_invocation(url);
        tracing::info!(url, handler = %program, "opening in default handler");

        Command::new(&program)
            .args(&arguments)
            .spawn()
            .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", url, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn test_elevated_invocation_uses_sudo() {
        let command = CommandLine::new("/opt/app/uninstall", "--yes /quiet");
        let (program, arguments) = SystemProcessRunner::elevated_invocation(&command);
        assert_eq!(program, "sudo");
        assert_eq!(arguments, vec!["/opt/app/uninstall", "--yes", "/quiet"]);
    }

    #[cfg(windows)]
    #[test]
    fn test_elevated_invocation_uses_runas() {
        let command = CommandLine::new("C:\\Program Files\\O'Brien\\setup.exe", "/S /quiet");
        let (program, arguments) = SystemProcessRunner::elevated_invocation(&command);
        assert_eq!(program, "powershell");
        let script = arguments.last().unwrap();
        assert!(script.contains("-FilePath 'C:\\Program Files\\O''Brien\\setup.exe'"));
        assert!(script.contains("-ArgumentList '/S /quiet'"));
        assert!(script.contains("-Verb RunAs -Wait -PassThru"));
        assert!(script.ends_with("exit $p.ExitCode"));
    }

    #[cfg(windows)]
    #[test]
    fn test_elevated_invocation_without_arguments() {
        let command = CommandLine::new("C:\\Setups\\app.exe", "");
        let (_, arguments) = SystemProcessRunner::elevated_invocation(&command);
        assert!(!arguments.last().unwrap().contains("-ArgumentList"));
    }

    #[test]
    fn test_open_invocation_passes_target_through() {
        let (program, arguments) = SystemProcessRunner::open_invocation("https://example.com");
        assert!(!program.is_empty());
        assert_eq!(arguments.last().unwrap(), "https://example.com");
    }
}
