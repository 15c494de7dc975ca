//! Error types for the announcement channel.

use crate::model::Position;
use thiserror::Error;

/// Errors that can occur during channel operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChannelError {
    /// The position is already registered; pick an unused one.
    #[error("Position already subscribed: {0}")]
    DuplicatePosition(Position),

    /// The channel actor is no longer accepting requests.
    #[error("Channel closed")]
    ActorClosed,

    /// The channel actor dropped the response before replying.
    #[error("Channel dropped response")]
    ActorDropped,
}
