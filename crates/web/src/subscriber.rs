//! Background reader for the configured channel

use std::sync::Arc;

use tracing::{info, warn};

use chess_place_core::Subscriber;

use crate::AppState;

/// Reads board sets until the terminating message and keeps the most recent
/// one on `state` for display.
pub async fn run(state: Arc<AppState>, mut subscriber: Subscriber) {
    info!(channel = subscriber.channel(), "subscribed");

    loop {
        match subscriber.next().await {
            Ok(Some(boards)) => {
                let sample = boards.iter().next().map(ToString::to_string).unwrap_or_default();
                info!(channel = subscriber.channel(), count = boards.len(), %sample, "received board set");
                state.set_latest(boards);
            }
            Ok(None) => break,
            Err(e) => warn!(channel = subscriber.channel(), error = %e, "dropping undecodable message"),
        }
    }

    info!(channel = subscriber.channel(), "unsubscribed");
}
