use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time;
use tracing::warn;

use crate::host::Event;

/// Loads for `loading_for`, then completes. Dropping `tx` at the end lets the
/// frame loop exit once the checkmark is drawn.
pub async fn load_then_complete(tx: UnboundedSender<Event>, loading_for: Duration) {
    for (delay, event) in [(Duration::ZERO, Event::StartLoading), (loading_for, Event::Complete)] {
        time::sleep(delay).await;
        if tx.send(event).is_err() {
            warn!("frame loop stopped early");
            return;
        }
    }
}
