pub mod mock;
pub mod shell;

pub use mock::MockExecutor;
pub use shell::SuShellExecutor;

use crate::error::GpioError;

/// Runs shell commands with elevated privileges and returns their combined
/// stdout.
#[allow(async_fn_in_trait)]
pub trait CommandExecutor: Send + Sync {
    async fn run(&self, commands: &[String]) -> Result<String, GpioError>;
}
