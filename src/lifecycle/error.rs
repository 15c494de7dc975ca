//! Error types for the queue service.

use crate::channel::ChannelError;
use thiserror::Error;

/// Errors that can occur while taking or announcing orders.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueueError {
    /// The request did not resolve to any known item; ask the customer again.
    #[error("Unrecognized item: {0:?}")]
    UnrecognizedItem(String),

    /// Every automatic position up to `u64::MAX` has been handed out.
    #[error("No positions left to assign")]
    PositionsExhausted,

    /// The channel rejected the operation or could not be reached.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// The channel task did not shut down cleanly.
    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}
