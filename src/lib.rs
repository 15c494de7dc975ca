//! # Order Queue
//!
//! > **An order-readiness notification queue with fuzzy order-name resolution.**
//!
//! Customers order by typing free text. The text is matched against a fixed menu,
//! the customer is given a position and waits on a shared announcement channel.
//! Each time an order number is announced, every waiting customer decides on
//! their own whether to collect their order, give up, or keep waiting.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. Intake ([`resolver`])
//! - **Role**: Maps free text to a canonical menu item by minimum edit distance,
//!   rejecting anything further than the configured threshold.
//! - **Key items**: [`resolve`](resolver::resolve), [`Resolver`](resolver::Resolver),
//!   [`Resolution`](resolver::Resolution).
//!
//! ### 2. The Customer ([`subscriber`])
//! - **Role**: The `Waiting → Fulfilled | Departed` state machine each customer runs
//!   on every announcement.
//!
//! ### 3. The Announcement Channel ([`channel`])
//! - **Role**: Owns the subscribers and the latest announced value, delivers every
//!   announcement to a snapshot of the subscribers taken when it was published.
//! - **Key items**: [`Channel`](channel::Channel), [`ChannelActor`](channel::ChannelActor),
//!   [`NotificationSink`](channel::NotificationSink).
//!
//! ### 4. The Interface ([`clients`])
//! - **Role**: [`ChannelClient`](clients::ChannelClient) hides the actor's request
//!   queue behind plain async methods.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! - **Role**: Configuration, wiring and shutdown.
//! - **Key items**: [`QueueSystem`](lifecycle::QueueSystem), [`QueueConfig`](lifecycle::QueueConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Use a custom menu
//! QUEUE_CONFIG=queue.toml RUST_LOG=info cargo run
//! ```

pub mod channel;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod resolver;
pub mod subscriber;
