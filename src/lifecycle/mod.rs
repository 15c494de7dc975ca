//! Runtime orchestration: configuration, wiring and shutdown of the queue.
//!
//! # Main Components
//!
//! - [`QueueSystem`] - Wires the resolver to the channel actor
//! - [`QueueConfig`] - Vocabulary, threshold and departure policy
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod error;
pub mod queue_system;
pub mod tracing;

pub use config::*;
pub use error::*;
pub use queue_system::*;
pub use self::tracing::setup_tracing;
