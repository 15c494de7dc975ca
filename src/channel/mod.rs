//! The shared announcement channel: state, actor and notification sinks.

pub mod actor;
pub mod core;
pub mod error;
pub mod mock;
pub mod sink;

pub use self::core::{Broadcast, Channel, Subscription};
pub use actor::*;
pub use error::*;
pub use sink::*;

use crate::clients::ChannelClient;
use std::sync::Arc;

/// Creates a new channel actor and its client.
pub fn new(
    buffer_size: usize,
    departure_offset: u64,
    sink: Arc<dyn NotificationSink>,
) -> (ChannelActor, ChannelClient) {
    ChannelActor::new(buffer_size, departure_offset, sink)
}
