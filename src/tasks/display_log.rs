//! Display log background task

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::runtime::DisplayEvent;

/// Background task that renders countdown display events as log lines.
///
/// Runs until the display channel closes.
pub async fn display_log_task(mut display_rx: broadcast::Receiver<DisplayEvent>) {
    info!("Starting display log task");

    loop {
        match display_rx.recv().await {
            Ok(DisplayEvent::Update { remaining }) => {
                debug!("Remaining: {}", remaining);
            }
            Ok(DisplayEvent::Status { status, message }) => {
                info!("[{}] {}", status, message);
            }
            Ok(DisplayEvent::Completed) => {
                info!("Countdown finished");
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Display log lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                debug!("Display channel closed, stopping display log task");
                break;
            }
        }
    }
}
