use thiserror::Error;

#[derive(Debug, Error)]
pub enum GpioError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Command failed: {0}")]
    Command(String),
    #[error("Command timed out after {0} ms")]
    Timeout(u64),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Observation read failed: {0}")]
    ObservationRead(String),
}
