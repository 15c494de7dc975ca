//! # Mock Channel
//!
//! Scripted stand-in for the [`ChannelActor`](super::ChannelActor), for testing
//! code that talks to a [`ChannelClient`] without running the real delivery.
//!
//! ```ignore
//! let mut mock = MockChannel::new();
//! mock.expect_subscribe(Position(1)).return_ok();
//! mock.expect_publish(1).return_ok(Broadcast { value: 1, recipients: 1, notifications: vec![] });
//!
//! let client = mock.client();
//! // Use client in tests...
//! mock.verify(); // Ensures all expectations were met
//! ```

use super::{Broadcast, ChannelError, ChannelRequest, Subscription};
use crate::clients::ChannelClient;
use crate::model::Position;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// An expected request and the reply to send back.
#[derive(Debug)]
enum Expectation {
    Subscribe {
        position: Position,
        response: Result<Subscription, ChannelError>,
    },
    Unsubscribe {
        position: Position,
        response: Result<bool, ChannelError>,
    },
    Publish {
        value: u64,
        response: Result<Broadcast, ChannelError>,
    },
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

/// First request that did not match its expectation, if any.
type Mismatch = Arc<Mutex<Option<String>>>;

/// A mock channel with expectation tracking.
///
/// Requests must arrive in the order they were expected and with the expected
/// arguments. Anything else gets no reply, which the caller sees as
/// [`ChannelError::ActorDropped`], and makes [`verify`](Self::verify) panic.
pub struct MockChannel {
    client: ChannelClient,
    expectations: Expectations,
    mismatch: Mismatch,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockChannel {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ChannelRequest>(100);
        let expectations: Expectations = Arc::new(Mutex::new(VecDeque::new()));
        let mismatch: Mismatch = Arc::new(Mutex::new(None));
        let expectations_clone = expectations.clone();
        let mismatch_clone = mismatch.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .pop_front();

                match (request, expectation) {
                    (
                        ChannelRequest::Subscribe { position, respond_to },
                        Some(Expectation::Subscribe { position: expected, response }),
                    ) if position == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ChannelRequest::Unsubscribe { position, respond_to },
                        Some(Expectation::Unsubscribe { position: expected, response }),
                    ) if position == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ChannelRequest::Publish { value, respond_to },
                        Some(Expectation::Publish { value: expected, response }),
                    ) if value == expected => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        // Dropping `request` drops its responder unanswered
                        let message = format!("unexpected request {:?}, expected {:?}", request, expectation);
                        mismatch_clone
                            .lock()
                            .unwrap_or_else(|poisoned| poisoned.into_inner())
                            .get_or_insert(message);
                    }
                }
            }
        });

        Self {
            client: ChannelClient::new(sender),
            expectations,
            mismatch,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ChannelClient {
        self.client.clone()
    }

    pub fn expect_subscribe(&mut self, position: Position) -> SubscribeExpectationBuilder {
        SubscribeExpectationBuilder {
            position,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_unsubscribe(&mut self, position: Position) -> UnsubscribeExpectationBuilder {
        UnsubscribeExpectationBuilder {
            position,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_publish(&mut self, value: u64) -> PublishExpectationBuilder {
        PublishExpectationBuilder {
            value,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        if let Some(message) = self
            .mismatch
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            panic!("Mock channel received an {}", message);
        }
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

fn push(expectations: &Expectations, expectation: Expectation) {
    expectations
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push_back(expectation);
}

/// Builder for `subscribe` expectations.
pub struct SubscribeExpectationBuilder {
    position: Position,
    expectations: Expectations,
}

impl SubscribeExpectationBuilder {
    pub fn return_ok(self) {
        let response = Ok(Subscription::new(self.position));
        push(&self.expectations, Expectation::Subscribe { position: self.position, response });
    }

    pub fn return_err(self, error: ChannelError) {
        push(&self.expectations, Expectation::Subscribe { position: self.position, response: Err(error) });
    }
}

/// Builder for `unsubscribe` expectations.
pub struct UnsubscribeExpectationBuilder {
    position: Position,
    expectations: Expectations,
}

impl UnsubscribeExpectationBuilder {
    /// `removed` is what the channel reports back.
    pub fn return_ok(self, removed: bool) {
        push(&self.expectations, Expectation::Unsubscribe { position: self.position, response: Ok(removed) });
    }
}

/// Builder for `publish` expectations.
pub struct PublishExpectationBuilder {
    value: u64,
    expectations: Expectations,
}

impl PublishExpectationBuilder {
    pub fn return_ok(self, broadcast: Broadcast) {
        push(&self.expectations, Expectation::Publish { value: self.value, response: Ok(broadcast) });
    }

    pub fn return_err(self, error: ChannelError) {
        push(&self.expectations, Expectation::Publish { value: self.value, response: Err(error) });
    }
}
