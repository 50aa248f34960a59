//! In-process message broker with named broadcast channels

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use super::message::{decode_message, encode_boards, Message};
use crate::board::BoardSet;
use crate::error::Result;

pub struct Broker {
    channels: Mutex<HashMap<String, broadcast::Sender<String>>>,
    capacity: usize,
}

impl Broker {
    pub const DEFAULT_CAPACITY: usize = 16;

    /// `capacity` is how many unread messages each subscriber may fall behind.
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, broadcast::Sender<String>>> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sends `payload` to everyone currently subscribed to `channel` and
    /// returns how many received it.
    ///
    /// Channels only exist while someone listens; publishing to an unknown or
    /// abandoned channel delivers nothing and leaves no entry behind.
    pub fn publish(&self, channel: &str, payload: impl Into<String>) -> usize {
        let mut channels = self.lock();
        if channels.get(channel).is_some_and(|sender| sender.receiver_count() == 0) {
            channels.remove(channel);
        }
        let receivers = channels
            .get(channel)
            .map_or(0, |sender| sender.send(payload.into()).unwrap_or(0));
        debug!(channel, receivers, "published message");
        receivers
    }

    pub fn subscribe(&self, channel: &str) -> Subscriber {
        let mut channels = self.lock();
        channels.retain(|_, sender| sender.receiver_count() > 0);
        let receiver = channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe();
        Subscriber {
            channel: channel.to_string(),
            receiver,
        }
    }

    pub fn publisher(self: &Arc<Self>, channel: &str) -> Publisher {
        Publisher {
            broker: Arc::clone(self),
            channel: channel.to_string(),
        }
    }

    /// Channels with at least one live subscriber.
    pub fn channels(&self) -> Vec<String> {
        let mut channels = self.lock();
        channels.retain(|_, sender| sender.receiver_count() > 0);
        let mut names: Vec<String> = channels.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for Broker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// Publishes board sets on one channel.
#[derive(Clone)]
pub struct Publisher {
    broker: Arc<Broker>,
    channel: String,
}

impl Publisher {
    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn publish(&self, boards: &BoardSet) -> Result<usize> {
        let payload = encode_boards(boards)?;
        Ok(self.broker.publish(&self.channel, payload))
    }

    /// Sends the empty terminating message.
    pub fn close(&self) -> usize {
        self.broker.publish(&self.channel, String::new())
    }
}

/// Reads board sets from one channel until the terminating message.
pub struct Subscriber {
    channel: String,
    receiver: broadcast::Receiver<String>,
}

impl Subscriber {
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Next board set, or `None` once the publisher signalled the end.
    pub async fn next(&mut self) -> Result<Option<BoardSet>> {
        loop {
            match self.receiver.recv().await {
                Ok(payload) => {
                    return match decode_message(&payload)? {
                        Message::Boards(boards) => Ok(Some(boards)),
                        Message::End => Ok(None),
                    };
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(channel = %self.channel, skipped, "subscriber fell behind, messages dropped");
                }
                Err(RecvError::Closed) => return Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Coordinate, PieceType, Placement};
    use crate::error::Error;

    fn sample() -> BoardSet {
        BoardSet::from([Board::new(vec![
            Placement::new(Coordinate::new(0, 0), PieceType::Knight),
            Placement::new(Coordinate::new(4, 4), PieceType::King),
        ])])
    }

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        let broker = Arc::new(Broker::default());
        let publisher = broker.publisher("team_chess:1");
        assert_eq!(publisher.publish(&sample()).unwrap(), 0);
        assert_eq!(publisher.close(), 0);
        assert!(broker.channels().is_empty());
    }

    #[tokio::test]
    async fn test_unheard_channels_leave_no_entries() {
        let broker = Broker::default();
        for i in 0..1000 {
            assert_eq!(broker.publish(&format!("ch{}", i), ""), 0);
        }
        assert!(broker.channels().is_empty());
        assert!(broker.lock().is_empty());
    }

    #[tokio::test]
    async fn test_dropped_subscriber_releases_channel() {
        let broker = Broker::default();
        let subscriber = broker.subscribe("team_chess:1");
        assert_eq!(broker.channels(), vec!["team_chess:1".to_string()]);

        drop(subscriber);
        assert_eq!(broker.publish("team_chess:1", ""), 0);
        assert!(broker.lock().is_empty());

        let _other = broker.subscribe("other");
        let stale = broker.subscribe("stale");
        drop(stale);
        let _third = broker.subscribe("third");
        assert_eq!(broker.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_round_trip_until_close() {
        let broker = Arc::new(Broker::default());
        let mut subscriber = broker.subscribe("team_chess:1");
        let publisher = broker.publisher("team_chess:1");

        assert_eq!(publisher.publish(&sample()).unwrap(), 1);
        assert_eq!(publisher.close(), 1);

        assert_eq!(subscriber.next().await.unwrap(), Some(sample()));
        assert_eq!(subscriber.next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_channels_are_isolated() {
        let broker = Arc::new(Broker::default());
        let mut other = broker.subscribe("other");
        let mut ours = broker.subscribe("team_chess:1");

        broker.publisher("team_chess:1").publish(&sample()).unwrap();
        broker.publisher("other").close();

        assert_eq!(ours.next().await.unwrap(), Some(sample()));
        assert_eq!(other.next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_lagged_subscriber_keeps_reading() {
        let broker = Arc::new(Broker::new(1));
        let mut subscriber = broker.subscribe("team_chess:1");
        let publisher = broker.publisher("team_chess:1");

        publisher.publish(&BoardSet::new()).unwrap();
        publisher.publish(&sample()).unwrap();

        assert_eq!(subscriber.next().await.unwrap(), Some(sample()));
    }

    #[tokio::test]
    async fn test_garbage_payload_is_an_error() {
        let broker = Broker::default();
        let mut subscriber = broker.subscribe("raw");
        broker.publish("raw", "not json");
        assert!(matches!(subscriber.next().await, Err(Error::Json(_))));
    }
}
