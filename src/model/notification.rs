use crate::model::Position;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// What a subscriber decided when it reacted to a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// The announced number was the subscriber's own order.
    Ready,
    /// The queue moved too far past the subscriber and it gave up.
    Abandoned,
}

/// Event emitted by a subscriber right before it leaves the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub position: Position,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn ready(position: Position) -> Self {
        Self { position, kind: NotificationKind::Ready }
    }

    pub fn abandoned(position: Position) -> Self {
        Self { position, kind: NotificationKind::Abandoned }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            NotificationKind::Ready => write!(f, "Customer {}: order ready", self.position.value()),
            NotificationKind::Abandoned => write!(f, "Customer {}: gave up waiting", self.position.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_customer() {
        assert_eq!(Notification::ready(Position(5)).to_string(), "Customer 5: order ready");
        assert_eq!(Notification::abandoned(Position(12)).to_string(), "Customer 12: gave up waiting");
    }
}
