use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::GpioError;

pub const DEFAULT_SYSFS_PATH: &str = "/sys/class/gpio";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GpioConfig {
    /// Root of the sysfs GPIO control tree.
    #[serde(default = "default_sysfs_path")]
    pub sysfs_path: String,
    /// Elevation binary invoked as `<program> -c <script>`.
    #[serde(default = "default_su_program")]
    pub su_program: String,
    /// Per-command deadline in milliseconds. `None` waits indefinitely.
    #[serde(default)]
    pub command_timeout_ms: Option<u64>,
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            sysfs_path: default_sysfs_path(),
            su_program: default_su_program(),
            command_timeout_ms: None,
        }
    }
}

impl GpioConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, GpioError> {
        let contents = fs::read_to_string(&path)
            .map_err(|e| GpioError::Config(format!("Failed to read config: {e}")))?;
        serde_json::from_str(&contents)
            .map_err(|e| GpioError::Config(format!("Invalid config json: {e}")))
    }
}

fn default_sysfs_path() -> String {
    DEFAULT_SYSFS_PATH.to_string()
}

fn default_su_program() -> String {
    "su".to_string()
}
