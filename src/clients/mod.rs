//! Type-safe wrappers around the channel actor's request queue.

pub mod channel_client;

pub use channel_client::*;
