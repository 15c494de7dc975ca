//! # Channel actor
//!
//! Serializes every operation on a [`Channel`] through one Tokio task.
//!
//! **Concurrency Model**:
//! Requests are processed one at a time in arrival order, so each request is a
//! critical section over the subscriber set, the latest value and the pending
//! flag together. A subscribe that arrives while a broadcast is being delivered
//! waits in the queue and runs after delivery, outside that broadcast's
//! snapshot. No `Mutex` is needed because the task exclusively owns the state.

use super::core::{Broadcast, Channel, Subscription};
use super::error::ChannelError;
use super::sink::NotificationSink;
use crate::clients::ChannelClient;
use crate::model::Position;
use crate::subscriber::SubscriberState;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, ChannelError>>;

/// Requests accepted by the [`ChannelActor`].
#[derive(Debug)]
pub enum ChannelRequest {
    Subscribe {
        position: Position,
        respond_to: Response<Subscription>,
    },
    Unsubscribe {
        position: Position,
        respond_to: Response<bool>,
    },
    Publish {
        value: u64,
        respond_to: Response<Broadcast>,
    },
    CurrentValue {
        respond_to: Response<Option<u64>>,
    },
    Status {
        position: Position,
        respond_to: Response<Option<SubscriberState>>,
    },
    Subscribers {
        respond_to: Response<Vec<Position>>,
    },
}

pub struct ChannelActor {
    receiver: mpsc::Receiver<ChannelRequest>,
    channel: Channel,
    sink: Arc<dyn NotificationSink>,
}

impl ChannelActor {
    pub fn new(
        buffer_size: usize,
        departure_offset: u64,
        sink: Arc<dyn NotificationSink>,
    ) -> (Self, ChannelClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            channel: Channel::new(departure_offset),
            sink,
        };
        (actor, ChannelClient::new(sender))
    }

    /// Processes requests until every client has been dropped.
    pub async fn run(mut self) {
        info!(departure_offset = self.channel.departure_offset(), "Channel started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ChannelRequest::Subscribe { position, respond_to } => {
                    debug!(%position, "Subscribe");
                    let _ = respond_to.send(self.channel.subscribe(position));
                }
                ChannelRequest::Unsubscribe { position, respond_to } => {
                    debug!(%position, "Unsubscribe");
                    let _ = respond_to.send(Ok(self.channel.unsubscribe(position)));
                }
                ChannelRequest::Publish { value, respond_to } => {
                    debug!(value, "Publish");
                    let broadcast = self.channel.publish(value, self.sink.as_ref()).await;
                    let _ = respond_to.send(Ok(broadcast));
                }
                ChannelRequest::CurrentValue { respond_to } => {
                    let _ = respond_to.send(Ok(self.channel.current_value()));
                }
                ChannelRequest::Status { position, respond_to } => {
                    let status = self.channel.status(position);
                    debug!(%position, ?status, "Status");
                    let _ = respond_to.send(Ok(status));
                }
                ChannelRequest::Subscribers { respond_to } => {
                    let _ = respond_to.send(Ok(self.channel.positions()));
                }
            }
        }

        info!(size = self.channel.len(), "Channel shutdown");
    }
}
