use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use gpiosu::{ButtonObservation, GpioButton, GpioConfig, GpioController, MockExecutor, PinState};

const POLL: Duration = Duration::from_millis(10);
const WAIT: Duration = Duration::from_secs(5);

fn sandbox_controller(dir: &Path) -> GpioController<MockExecutor> {
    let config = GpioConfig {
        sysfs_path: dir.to_string_lossy().into_owned(),
        ..Default::default()
    };
    GpioController::new(Arc::new(config), Arc::new(MockExecutor::default()))
}

fn write_value(dir: &Path, pin: u32, raw: &str) {
    let pin_dir = dir.join(format!("gpio{pin}"));
    std::fs::create_dir_all(&pin_dir).unwrap();
    std::fs::write(pin_dir.join("value"), raw).unwrap();
}

async fn next(observation: &mut ButtonObservation) -> PinState {
    tokio::time::timeout(WAIT, observation.recv())
        .await
        .expect("poll loop stalled")
        .expect("stream ended unexpectedly")
}

/// Drains emissions until the level changes away from `current`.
async fn next_change(observation: &mut ButtonObservation, current: PinState) -> PinState {
    loop {
        let state = next(observation).await;
        if state != current {
            return state;
        }
    }
}

#[tokio::test]
async fn observation_emits_levels_in_read_order() {
    let dir = tempfile::tempdir().unwrap();
    write_value(dir.path(), 8, "1\n");

    let controller = sandbox_controller(dir.path());
    let button = GpioButton::new(8, POLL);
    let mut observation = controller.observe_button(&button);

    assert_eq!(next(&mut observation).await, PinState::Up);

    write_value(dir.path(), 8, "0\n");
    assert_eq!(next_change(&mut observation, PinState::Up).await, PinState::Down);

    write_value(dir.path(), 8, "1\n");
    assert_eq!(next_change(&mut observation, PinState::Down).await, PinState::Up);
}

#[tokio::test]
async fn repeated_reads_are_not_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    write_value(dir.path(), 8, "1\n");

    let controller = sandbox_controller(dir.path());
    let button = GpioButton::new(8, POLL);
    let mut observation = controller.observe_button(&button);

    assert_eq!(next(&mut observation).await, PinState::Up);
    assert_eq!(next(&mut observation).await, PinState::Up);
    assert_eq!(next(&mut observation).await, PinState::Up);
}

#[tokio::test]
async fn non_one_values_read_as_down() {
    let dir = tempfile::tempdir().unwrap();
    write_value(dir.path(), 8, "garbage\n");

    let controller = sandbox_controller(dir.path());
    let button = GpioButton::new(8, POLL);
    let mut observation = controller.observe_button(&button);

    assert_eq!(next(&mut observation).await, PinState::Down);
}

#[tokio::test]
async fn cancel_ends_the_stream() {
    let dir = tempfile::tempdir().unwrap();
    write_value(dir.path(), 8, "1\n");

    let controller = sandbox_controller(dir.path());
    let button = GpioButton::new(8, POLL);
    let mut observation = controller.observe_button(&button);

    assert_eq!(next(&mut observation).await, PinState::Up);
    observation.cancel();

    // buffered levels may still drain, then the channel closes
    let drained = tokio::time::timeout(WAIT, async {
        while observation.recv().await.is_some() {}
    })
    .await;
    assert!(drained.is_ok());

    tokio::time::timeout(WAIT, async {
        while !observation.is_finished() {
            tokio::time::sleep(POLL).await;
        }
    })
    .await
    .expect("poll task kept running after cancel");
}

#[tokio::test]
async fn read_failure_skips_the_cycle_without_ending_the_stream() {
    let dir = tempfile::tempdir().unwrap();
    // no value file yet: every cycle fails

    let controller = sandbox_controller(dir.path());
    let button = GpioButton::new(8, POLL);
    let mut observation = controller.observe_button(&button);

    tokio::time::sleep(POLL * 5).await;
    write_value(dir.path(), 8, "1\n");

    assert_eq!(next(&mut observation).await, PinState::Up);
}

#[tokio::test]
async fn observation_works_as_a_stream() {
    use tokio_stream::StreamExt;

    let dir = tempfile::tempdir().unwrap();
    write_value(dir.path(), 8, "1\n");

    let controller = sandbox_controller(dir.path());
    let button = GpioButton::new(8, POLL);
    let mut observation = controller.observe_button(&button);

    let first = tokio::time::timeout(WAIT, observation.next()).await.unwrap();
    assert_eq!(first, Some(PinState::Up));
}
