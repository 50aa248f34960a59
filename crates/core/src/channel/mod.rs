//! Publish/subscribe boundary for computed board sets
//!
//! Board sets travel as JSON text on named channels. An empty payload tells
//! subscribers to stop reading.

mod broker;
mod message;

pub use broker::{Broker, Publisher, Subscriber};
pub use message::{decode_message, encode_boards, Message};

/// Channel the placement service publishes on unless told otherwise.
pub const DEFAULT_CHANNEL: &str = "team_chess:1";
