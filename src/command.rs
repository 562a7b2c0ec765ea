//! Shell command builders for the sysfs GPIO control tree.
//!
//! Formatting is total: every builder returns the exact command string and
//! cannot fail. Only execution can.

use crate::pin::{PinDirection, PinState};

pub fn export(base: &str, pin: u32) -> String {
    format!("echo {pin} > {base}/export")
}

pub fn unexport(base: &str, pin: u32) -> String {
    format!("echo {pin} > {base}/unexport")
}

pub fn direction(base: &str, pin: u32, direction: PinDirection) -> String {
    format!("echo {} > {base}/gpio{pin}/direction", direction.as_sysfs())
}

pub fn active_low(base: &str, pin: u32, reversed: bool) -> String {
    format!(
        "echo {} > {base}/gpio{pin}/active_low",
        if reversed { 1 } else { 0 }
    )
}

pub fn value(base: &str, pin: u32, state: PinState) -> String {
    format!("echo {} > {base}/gpio{pin}/value", state.as_sysfs())
}

/// Read path for polling a pin's current level.
pub fn value_path(base: &str, pin: u32) -> String {
    format!("{base}/gpio{pin}/value")
}
