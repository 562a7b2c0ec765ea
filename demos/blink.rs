use std::sync::Arc;
use std::time::Duration;

use log::info;

use gpiosu::{
    GpioButton, GpioConfig, GpioController, GpioError, GpioPin, GpioRgb, PinState, SuShellExecutor,
};

const LED_PIN: u32 = 1;
const BUTTON_PIN: u32 = 2;

const RGB_PIN_RED: u32 = 3;
const RGB_PIN_GREEN: u32 = 4;
const RGB_PIN_BLUE: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), GpioError> {
    env_logger::init();

    let config = Arc::new(GpioConfig::default());
    let executor = Arc::new(SuShellExecutor::new(&config));
    let controller = GpioController::new(config, executor);

    let led = GpioPin::output(LED_PIN);
    let mut rgb = GpioRgb::new(RGB_PIN_RED, RGB_PIN_GREEN, RGB_PIN_BLUE);
    let button = GpioButton::new(BUTTON_PIN, Duration::from_secs(1));

    controller.init_rgb(std::slice::from_ref(&rgb)).await?;
    controller.init_button(&button).await?;
    controller.init_pins(std::slice::from_ref(&led)).await?;

    let mut presses = controller.observe_button(&button);
    tokio::spawn(async move {
        while let Some(state) = presses.recv().await {
            match state {
                PinState::Up => info!("button is pressed"),
                PinState::Down => info!("button is released"),
            }
        }
    });

    // red, then green, then blue
    controller
        .set_rgb_state(rgb.set_only(Some(PinState::Up), None, None))
        .await?;
    tokio::time::sleep(Duration::from_secs(5)).await;
    controller
        .set_rgb_state(rgb.set_only(None, Some(PinState::Up), None))
        .await?;
    tokio::time::sleep(Duration::from_secs(5)).await;
    controller
        .set_rgb_state(rgb.set_only(None, None, Some(PinState::Up)))
        .await?;

    for _ in 0..10 {
        controller.pin_up(&led).await?;
        tokio::time::sleep(Duration::from_secs(1)).await;
        controller.pin_down(&led).await?;
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    controller.set_rgb_state(rgb.set_off()).await?;
    controller.release_all().await;

    Ok(())
}
