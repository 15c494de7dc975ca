//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter filtered
//! by `RUST_LOG`.
//!
//! ```bash
//! # Admissions, broadcasts and departures
//! RUST_LOG=info cargo run
//!
//! # Every request reaching the channel actor
//! RUST_LOG=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a short session reads:
//!
//! ```text
//! INFO Channel started departure_offset=7
//! INFO Subscribed position=customer_1 size=1
//! INFO place_order{request="capuccino"}: Order admitted position=customer_1 item=Cappuccino
//! INFO Customer 1: order ready position=customer_1
//! INFO Unsubscribed position=customer_1 size=0
//! INFO Broadcast delivered value=1 recipients=1 left=1
//! INFO announce{number=1}: Announced recipients=1 left=1
//! ```
//!
//! Lines logged by the channel actor carry no span: the actor runs on its own
//! task, not inside the caller's `#[instrument]` span.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
