pub mod command;
mod config;
mod controller;
mod error;
mod exec;
mod observe;
mod pin;

pub use config::GpioConfig;
pub use controller::GpioController;
pub use error::GpioError;
pub use exec::{CommandExecutor, MockExecutor, SuShellExecutor};
pub use observe::ButtonObservation;
pub use pin::{GpioButton, GpioPin, GpioRgb, PinDirection, PinState};
