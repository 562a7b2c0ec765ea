use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::command;
use crate::config::GpioConfig;
use crate::error::GpioError;
use crate::exec::CommandExecutor;
use crate::observe::ButtonObservation;
use crate::pin::{GpioButton, GpioPin, GpioRgb, PinState};

/// Owns the table of exported pins and sequences every privileged command.
///
/// Entries are keyed by pin number; composite types keep their own pin
/// values and the controller re-keys on flush, so pin identity is always
/// numeric. The table lock is never held across an await.
pub struct GpioController<E: CommandExecutor> {
    config: Arc<GpioConfig>,
    executor: Arc<E>,
    pins: RwLock<FxHashMap<u32, GpioPin>>,
}

impl<E: CommandExecutor> GpioController<E> {
    pub fn new(config: Arc<GpioConfig>, executor: Arc<E>) -> Self {
        Self {
            config,
            executor,
            pins: RwLock::new(FxHashMap::default()),
        }
    }

    async fn run(&self, command: String) -> Result<String, GpioError> {
        self.executor.run(std::slice::from_ref(&command)).await
    }

    /// Exports and configures each pin, strictly export then direction then
    /// active_low per pin. The per-pin attribute files only exist once the
    /// export has completed, so the order is load-bearing. A failed step
    /// aborts that pin without rollback; already initialized pins stay
    /// tracked.
    pub async fn init_pins(&self, pins: &[GpioPin]) -> Result<(), GpioError> {
        let base = &self.config.sysfs_path;
        for pin in pins {
            let number = pin.number();
            self.run(command::export(base, number)).await?;
            self.run(command::direction(base, number, pin.direction))
                .await?;
            self.run(command::active_low(base, number, pin.reversed))
                .await?;
            self.pins.write().insert(number, pin.clone());
            debug!("exported pin {number}");
        }
        Ok(())
    }

    /// Initializes every group's channels, groups in argument order and red,
    /// green, blue within each group.
    pub async fn init_rgb(&self, groups: &[GpioRgb]) -> Result<(), GpioError> {
        for group in groups {
            self.init_pins(&[
                group.red.clone(),
                group.green.clone(),
                group.blue.clone(),
            ])
            .await?;
        }
        Ok(())
    }

    pub async fn init_button(&self, button: &GpioButton) -> Result<(), GpioError> {
        self.init_pins(std::slice::from_ref(&button.pin)).await
    }

    pub async fn pin_up(&self, pin: &GpioPin) -> Result<(), GpioError> {
        self.set_level(pin.number(), PinState::Up).await
    }

    pub async fn pin_down(&self, pin: &GpioPin) -> Result<(), GpioError> {
        self.set_level(pin.number(), PinState::Down).await
    }

    /// Writes the level, then updates the cached entry on success only. A
    /// number that was never exported through this controller still gets the
    /// command; only the cache update is skipped.
    async fn set_level(&self, number: u32, state: PinState) -> Result<(), GpioError> {
        self.run(command::value(&self.config.sysfs_path, number, state))
            .await?;
        if let Some(entry) = self.pins.write().get_mut(&number) {
            entry.state = state;
        }
        Ok(())
    }

    /// Commits a group's staged channel states to hardware, red then green
    /// then blue. The first failing channel aborts the rest.
    pub async fn set_rgb_state(&self, group: &GpioRgb) -> Result<(), GpioError> {
        for pin in group.pins() {
            self.set_level(pin.number(), pin.state).await?;
        }
        Ok(())
    }

    /// Best-effort teardown: the table entry goes away even when the
    /// unexport command fails, keeping the tracking table consistent at the
    /// cost of possibly leaving the pin exported on the device. Failures are
    /// logged, never propagated.
    pub async fn release_pins(&self, numbers: &[u32]) {
        let base = &self.config.sysfs_path;
        for &number in numbers {
            if let Err(e) = self.run(command::unexport(base, number)).await {
                warn!("unexport of pin {number} failed: {e}");
            }
            self.pins.write().remove(&number);
        }
    }

    pub async fn release_all(&self) {
        let numbers = self.exported_pins();
        self.release_pins(&numbers).await;
    }

    /// Numbers currently tracked as exported, sorted.
    pub fn exported_pins(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self.pins.read().keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }

    /// Last level the controller successfully wrote for a tracked pin.
    pub fn cached_state(&self, number: u32) -> Option<PinState> {
        self.pins.read().get(&number).map(|pin| pin.state)
    }

    /// Starts the polling task for a button. Reads go straight to the value
    /// file, bypassing the cache, since input levels are driven by hardware.
    /// Must be called from within a tokio runtime.
    pub fn observe_button(&self, button: &GpioButton) -> ButtonObservation {
        ButtonObservation::spawn(
            command::value_path(&self.config.sysfs_path, button.pin.number()),
            button.poll_interval,
        )
    }
}
