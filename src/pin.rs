use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Hash, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PinState {
    Up,
    Down,
}

impl PinState {
    pub fn as_sysfs(&self) -> &'static str {
        match self {
            PinState::Up => "1",
            PinState::Down => "0",
        }
    }

    /// `"1"` reads as up, anything else as down.
    pub fn from_sysfs(raw: &str) -> Self {
        if raw.trim() == "1" {
            PinState::Up
        } else {
            PinState::Down
        }
    }
}

#[derive(Debug, Hash, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PinDirection {
    Input,
    Output,
}

impl PinDirection {
    pub fn as_sysfs(&self) -> &'static str {
        match self {
            PinDirection::Input => "in",
            PinDirection::Output => "out",
        }
    }
}

/// One GPIO pin: its number, configured direction, last known level and
/// polarity. The `state` field is a cache maintained by the controller, not
/// a live hardware value.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GpioPin {
    number: u32,
    pub direction: PinDirection,
    pub state: PinState,
    pub reversed: bool,
}

impl GpioPin {
    pub fn new(number: u32, direction: PinDirection) -> Self {
        Self {
            number,
            direction,
            state: PinState::Down,
            reversed: false,
        }
    }

    pub fn output(number: u32) -> Self {
        Self::new(number, PinDirection::Output)
    }

    pub fn input(number: u32) -> Self {
        Self::new(number, PinDirection::Input)
    }

    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    pub fn number(&self) -> u32 {
        self.number
    }
}

/// Tri-color LED cluster: three owned output pins with a shared polarity
/// default. All staging operations are in-memory only; nothing reaches
/// hardware until the group is flushed through the controller.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GpioRgb {
    pub red: GpioPin,
    pub green: GpioPin,
    pub blue: GpioPin,
}

impl GpioRgb {
    /// Common RGB modules are wired active-low, so polarity defaults to
    /// reversed on all three channels.
    pub fn new(red: u32, green: u32, blue: u32) -> Self {
        Self::with_polarity(red, green, blue, true)
    }

    pub fn with_polarity(red: u32, green: u32, blue: u32, reversed: bool) -> Self {
        Self {
            red: GpioPin::output(red).reversed(reversed),
            green: GpioPin::output(green).reversed(reversed),
            blue: GpioPin::output(blue).reversed(reversed),
        }
    }

    /// Stages the given channels, leaving `None` channels untouched.
    pub fn set(
        &mut self,
        red: Option<PinState>,
        green: Option<PinState>,
        blue: Option<PinState>,
    ) -> &mut Self {
        if let Some(state) = red {
            self.red.state = state;
        }
        if let Some(state) = green {
            self.green.state = state;
        }
        if let Some(state) = blue {
            self.blue.state = state;
        }
        self
    }

    /// Stages all three channels, `None` meaning down.
    pub fn set_only(
        &mut self,
        red: Option<PinState>,
        green: Option<PinState>,
        blue: Option<PinState>,
    ) -> &mut Self {
        self.red.state = red.unwrap_or(PinState::Down);
        self.green.state = green.unwrap_or(PinState::Down);
        self.blue.state = blue.unwrap_or(PinState::Down);
        self
    }

    pub fn set_off(&mut self) -> &mut Self {
        self.set_only(None, None, None)
    }

    pub fn pins(&self) -> [&GpioPin; 3] {
        [&self.red, &self.green, &self.blue]
    }

    pub fn pin_numbers(&self) -> [u32; 3] {
        [self.red.number(), self.green.number(), self.blue.number()]
    }
}

/// Debounced button descriptor: an input pin sampled at a fixed interval.
#[derive(Debug, Clone)]
pub struct GpioButton {
    pub pin: GpioPin,
    pub poll_interval: Duration,
}

impl GpioButton {
    pub fn new(number: u32, poll_interval: Duration) -> Self {
        Self {
            pin: GpioPin::input(number),
            poll_interval,
        }
    }
}
