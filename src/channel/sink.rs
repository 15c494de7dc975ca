//! Where notifications go once a subscriber leaves.
//!
//! Rendering `ready`/`abandoned` for people to read is not the channel's job,
//! so delivery hands every [`Notification`] to a [`NotificationSink`].

use crate::model::{Notification, NotificationKind};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Notification sink failed: {0}")]
pub struct SinkError(pub String);

/// Receives the notifications emitted during delivery.
///
/// # Failure isolation
/// An `Err` is logged by the channel and delivery moves on to the next
/// subscriber in the snapshot. The failing subscriber is still removed.
///
/// # Reentrancy
/// `notify` runs inside the channel's critical section. Awaiting a
/// [`ChannelClient`](crate::clients::ChannelClient) call from here deadlocks;
/// spawn a task instead.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<(), SinkError>;
}

/// Renders notifications as log lines, e.g. `Customer 5: order ready`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn notify(&self, notification: &Notification) -> Result<(), SinkError> {
        let position = notification.position;
        match notification.kind {
            NotificationKind::Ready => info!(%position, "{notification}"),
            NotificationKind::Abandoned => warn!(%position, "{notification}"),
        }
        Ok(())
    }
}

/// Keeps every notification in arrival order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything received so far.
    pub fn received(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl NotificationSink for MemorySink {
    async fn notify(&self, notification: &Notification) -> Result<(), SinkError> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(*notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;

    #[tokio::test]
    async fn test_memory_sink_keeps_order_and_log_sink_accepts() {
        let sink = MemorySink::new();
        let ready = Notification::ready(Position(2));
        let abandoned = Notification::abandoned(Position(1));

        sink.notify(&ready).await.unwrap();
        sink.notify(&abandoned).await.unwrap();
        assert_eq!(sink.received(), vec![ready, abandoned]);

        assert_eq!(LogSink.notify(&ready).await, Ok(()));
        assert_eq!(LogSink.notify(&abandoned).await, Ok(()));
    }
}
