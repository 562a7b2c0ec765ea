use std::io::ErrorKind;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;

use crate::config::GpioConfig;
use crate::error::GpioError;
use crate::exec::CommandExecutor;

/// Executor backed by an elevation binary, invoked as `<program> -c <script>`.
///
/// A batch of commands runs in one elevated session, joined with ` && ` so a
/// failing command stops the rest of the batch.
pub struct SuShellExecutor {
    program: String,
    timeout: Option<Duration>,
}

impl SuShellExecutor {
    pub fn new(config: &GpioConfig) -> Self {
        Self {
            program: config.su_program.clone(),
            timeout: config.command_timeout_ms.map(Duration::from_millis),
        }
    }

    pub fn with_program(program: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    async fn spawn(&self, script: &str) -> Result<Output, GpioError> {
        Command::new(&self.program)
            .arg("-c")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                // the host cannot obtain elevated rights at all
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    GpioError::PermissionDenied(format!("{}: {e}", self.program))
                }
                _ => GpioError::Command(format!("{}: {e}", self.program)),
            })
    }
}

impl CommandExecutor for SuShellExecutor {
    async fn run(&self, commands: &[String]) -> Result<String, GpioError> {
        let script = commands.join(" && ");
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.spawn(&script))
                .await
                .map_err(|_| GpioError::Timeout(limit.as_millis() as u64))??,
            None => self.spawn(&script).await?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GpioError::Command(format!(
                "`{script}` exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
