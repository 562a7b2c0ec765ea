use parking_lot::Mutex;

use crate::error::GpioError;
use crate::exec::CommandExecutor;

/// Recording executor for tests and dry runs.
///
/// Commands are appended in issue order; `fail_matching` arms a failure for
/// any later command containing the given needle. Failed commands are not
/// recorded.
#[derive(Default)]
pub struct MockExecutor {
    commands: Mutex<Vec<String>>,
    failures: Mutex<Vec<String>>,
}

impl MockExecutor {
    pub fn recorded(&self) -> Vec<String> {
        self.commands.lock().clone()
    }

    pub fn fail_matching(&self, needle: impl Into<String>) {
        self.failures.lock().push(needle.into());
    }

    pub fn clear(&self) {
        self.commands.lock().clear();
    }
}

impl CommandExecutor for MockExecutor {
    async fn run(&self, commands: &[String]) -> Result<String, GpioError> {
        for command in commands {
            if self
                .failures
                .lock()
                .iter()
                .any(|needle| command.contains(needle.as_str()))
            {
                return Err(GpioError::Command(format!("mock failure for `{command}`")));
            }
            self.commands.lock().push(command.clone());
        }
        Ok(String::new())
    }
}
