//! # Channel state and delivery
//!
//! [`Channel`] is the subject of the queue: it owns every live [`Subscriber`]
//! and the last announced value. It has no locks of its own; exclusive access
//! comes from `&mut self`, which the [`ChannelActor`](super::ChannelActor)
//! holds for the duration of each request.
//!
//! ## Delivery
//!
//! 1. Nothing happens unless a value is pending (`dirty`).
//! 2. The positions of the current subscribers are copied into a snapshot.
//! 3. `dirty` is cleared before the first reaction runs.
//! 4. Each snapshot entry reacts to the value. A subscriber that leaves emits
//!    its notification, then is removed from the live set.
//!
//! Only the live set is ever mutated, so removals never disturb the snapshot
//! and subscribers added later are not part of the broadcast.

use super::error::ChannelError;
use super::sink::NotificationSink;
use crate::model::{Notification, Position};
use crate::subscriber::{Subscriber, SubscriberState};
use tracing::{debug, info, warn};

/// Non-owning handle to a subscription: just the position key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    position: Position,
}

impl Subscription {
    pub(crate) fn new(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// What a single publish did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broadcast {
    pub value: u64,
    /// Size of the snapshot the value was delivered to.
    pub recipients: usize,
    /// Notifications in snapshot order.
    pub notifications: Vec<Notification>,
}

impl Broadcast {
    fn undelivered(value: u64) -> Self {
        Self {
            value,
            recipients: 0,
            notifications: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct Channel {
    /// Registration order is the delivery order.
    subscribers: Vec<Subscriber>,
    latest: Option<u64>,
    dirty: bool,
    departure_offset: u64,
}

impl Channel {
    pub fn new(departure_offset: u64) -> Self {
        Self {
            subscribers: Vec::new(),
            latest: None,
            dirty: false,
            departure_offset,
        }
    }

    pub fn subscribe(&mut self, position: Position) -> Result<Subscription, ChannelError> {
        if self.contains(position) {
            warn!(%position, "Duplicate subscribe");
            return Err(ChannelError::DuplicatePosition(position));
        }
        self.subscribers.push(Subscriber::new(position));
        info!(%position, size = self.subscribers.len(), "Subscribed");
        Ok(Subscription::new(position))
    }

    /// Removes `position` if present. Returns whether anything was removed.
    pub fn unsubscribe(&mut self, position: Position) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.position() != position);
        let removed = self.subscribers.len() != before;
        if removed {
            info!(%position, size = self.subscribers.len(), "Unsubscribed");
        } else {
            debug!(%position, "Unsubscribe ignored, not subscribed");
        }
        removed
    }

    /// Records `value` as the latest announcement and delivers it.
    pub async fn publish(&mut self, value: u64, sink: &dyn NotificationSink) -> Broadcast {
        self.latest = Some(value);
        self.dirty = true;
        // deliver only yields None with nothing pending, which cannot hold here
        self.deliver(sink)
            .await
            .unwrap_or_else(|| Broadcast::undelivered(value))
    }

    /// Runs one delivery pass. `None` when there is nothing pending.
    async fn deliver(&mut self, sink: &dyn NotificationSink) -> Option<Broadcast> {
        if !self.dirty {
            return None;
        }
        let value = self.latest?;

        let snapshot: Vec<Position> = self.subscribers.iter().map(Subscriber::position).collect();
        self.dirty = false;

        let mut notifications = Vec::new();
        for position in &snapshot {
            let Some(subscriber) = self.subscribers.iter_mut().find(|s| s.position() == *position) else {
                continue;
            };
            let Some(notification) = subscriber.react(value, self.departure_offset) else {
                continue;
            };

            if let Err(e) = sink.notify(&notification).await {
                warn!(%position, error = %e, "Notification failed");
            }
            self.unsubscribe(*position);
            notifications.push(notification);
        }

        info!(value, recipients = snapshot.len(), left = notifications.len(), "Broadcast delivered");
        Some(Broadcast {
            value,
            recipients: snapshot.len(),
            notifications,
        })
    }

    pub fn current_value(&self) -> Option<u64> {
        self.latest
    }

    pub fn status(&self, position: Position) -> Option<SubscriberState> {
        self.subscribers
            .iter()
            .find(|s| s.position() == position)
            .map(Subscriber::state)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.subscribers.iter().any(|s| s.position() == position)
    }

    /// Live positions in registration order.
    pub fn positions(&self) -> Vec<Position> {
        self.subscribers.iter().map(Subscriber::position).collect()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn departure_offset(&self) -> u64 {
        self.departure_offset
    }
}
