//! The waiting customer and its reaction to announcements.
//!
//! A [`Subscriber`] is a tiny state machine:
//!
//! ```text
//!            value == position
//! Waiting ─────────────────────────► Fulfilled
//!    │
//!    │  value >= position + departure_offset
//!    └─────────────────────────────► Departed
//! ```
//!
//! Both end states are terminal. The channel removes a subscriber as soon as it
//! reaches one, and a terminal subscriber ignores anything it is handed later.

use crate::model::{Notification, Position};
use serde::{Deserialize, Serialize};

/// How far past a customer's own number the queue may move before they leave.
pub const DEFAULT_DEPARTURE_OFFSET: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriberState {
    Waiting,
    Fulfilled,
    Departed,
}

impl SubscriberState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SubscriberState::Waiting)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    position: Position,
    state: SubscriberState,
}

impl Subscriber {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            state: SubscriberState::Waiting,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn state(&self) -> SubscriberState {
        self.state
    }

    /// Reacts to one announced `value`.
    ///
    /// Returns the notification to emit when the subscriber leaves, `None` when
    /// it keeps waiting or was already done. The equality check always runs
    /// before the departure check.
    pub fn react(&mut self, value: u64, departure_offset: u64) -> Option<Notification> {
        if self.state.is_terminal() {
            return None;
        }

        let own = self.position.value();
        if value == own {
            self.state = SubscriberState::Fulfilled;
            Some(Notification::ready(self.position))
        } else if value >= own.saturating_add(departure_offset) {
            self.state = SubscriberState::Departed;
            Some(Notification::abandoned(self.position))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationKind;

    #[test]
    fn test_own_number_fulfils() {
        let mut subscriber = Subscriber::new(Position(5));
        let notification = subscriber.react(5, DEFAULT_DEPARTURE_OFFSET).unwrap();
        assert_eq!(notification.kind, NotificationKind::Ready);
        assert_eq!(notification.position, Position(5));
        assert_eq!(subscriber.state(), SubscriberState::Fulfilled);
    }

    #[test]
    fn test_departs_at_offset() {
        let mut subscriber = Subscriber::new(Position(12));
        assert_eq!(subscriber.react(18, DEFAULT_DEPARTURE_OFFSET), None);
        assert_eq!(subscriber.state(), SubscriberState::Waiting);

        let notification = subscriber.react(19, DEFAULT_DEPARTURE_OFFSET).unwrap();
        assert_eq!(notification, Notification::abandoned(Position(12)));
        assert_eq!(subscriber.state(), SubscriberState::Departed);
    }

    #[test]
    fn test_earlier_and_nearby_numbers_keep_waiting() {
        let mut subscriber = Subscriber::new(Position(12));
        for value in [0, 5, 11, 13, 17] {
            assert_eq!(subscriber.react(value, DEFAULT_DEPARTURE_OFFSET), None);
        }
        assert_eq!(subscriber.state(), SubscriberState::Waiting);
    }

    #[test]
    fn test_equality_wins_over_departure() {
        // With a zero offset both rules match the subscriber's own number
        let mut subscriber = Subscriber::new(Position(3));
        let notification = subscriber.react(3, 0).unwrap();
        assert_eq!(notification.kind, NotificationKind::Ready);
    }

    #[test]
    fn test_terminal_states_are_inert() {
        let mut fulfilled = Subscriber::new(Position(1));
        fulfilled.react(1, DEFAULT_DEPARTURE_OFFSET);
        assert_eq!(fulfilled.react(1, DEFAULT_DEPARTURE_OFFSET), None);
        assert_eq!(fulfilled.react(100, DEFAULT_DEPARTURE_OFFSET), None);
        assert_eq!(fulfilled.state(), SubscriberState::Fulfilled);

        let mut departed = Subscriber::new(Position(1));
        departed.react(8, DEFAULT_DEPARTURE_OFFSET);
        assert_eq!(departed.react(1, DEFAULT_DEPARTURE_OFFSET), None);
        assert_eq!(departed.state(), SubscriberState::Departed);
    }

    #[test]
    fn test_offset_saturates_near_max() {
        let mut subscriber = Subscriber::new(Position(u64::MAX - 1));
        assert_eq!(subscriber.react(u64::MAX, DEFAULT_DEPARTURE_OFFSET), Some(Notification::abandoned(Position(u64::MAX - 1))));
    }
}
