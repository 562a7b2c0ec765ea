use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use log::warn;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_stream::Stream;

use crate::error::GpioError;
use crate::pin::PinState;

const OBSERVATION_CHANNEL_CAPACITY: usize = 16;

/// Handle on a button polling task.
///
/// The task reads the pin's raw value file once per poll interval and
/// delivers the interpreted level over a bounded channel, duplicates
/// included. A failed read is logged and the next cycle runs after the
/// usual delay. The stream is infinite until cancelled and cannot be
/// restarted.
pub struct ButtonObservation {
    rx: mpsc::Receiver<PinState>,
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ButtonObservation {
    pub(crate) fn spawn(value_path: String, interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(OBSERVATION_CHANNEL_CAPACITY);
        let (cancel, mut cancelled) = watch::channel(false);

        let task = tokio::spawn(async move {
            loop {
                match tokio::fs::read_to_string(&value_path).await {
                    Ok(raw) => {
                        if tx.send(PinState::from_sysfs(&raw)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let e = GpioError::ObservationRead(format!("{value_path}: {e}"));
                        warn!("button poll: {e}");
                    }
                }
                tokio::select! {
                    _ = cancelled.changed() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        });

        Self { rx, cancel, task }
    }

    /// Next polled level; `None` once the stream is cancelled and drained.
    pub async fn recv(&mut self) -> Option<PinState> {
        self.rx.recv().await
    }

    /// Stops the loop between cycles. An in-progress read still completes
    /// and may deliver one last level; no read starts afterwards. Dropping
    /// the handle cancels the same way.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Stream for ButtonObservation {
    type Item = PinState;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}
