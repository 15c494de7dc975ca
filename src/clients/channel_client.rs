use crate::channel::{Broadcast, ChannelError, ChannelRequest, Subscription};
use crate::model::Position;
use crate::subscriber::SubscriberState;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for interacting with the channel actor.
///
/// Every call waits for the actor to finish the request. In particular
/// [`publish`](Self::publish) returns only after every subscriber in the
/// broadcast's snapshot has reacted.
#[derive(Clone)]
pub struct ChannelClient {
    sender: mpsc::Sender<ChannelRequest>,
}

impl ChannelClient {
    pub fn new(sender: mpsc::Sender<ChannelRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, ChannelError>>) -> ChannelRequest,
    ) -> Result<T, ChannelError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ChannelError::ActorClosed)?;
        response.await.map_err(|_| ChannelError::ActorDropped)?
    }

    #[instrument(skip(self))]
    pub async fn subscribe(&self, position: Position) -> Result<Subscription, ChannelError> {
        debug!("Sending request");
        self.request(|respond_to| ChannelRequest::Subscribe { position, respond_to })
            .await
    }

    /// Removes `position`. Unknown positions are ignored; the result says
    /// whether anything was removed.
    #[instrument(skip(self))]
    pub async fn unsubscribe(&self, position: Position) -> Result<bool, ChannelError> {
        debug!("Sending request");
        self.request(|respond_to| ChannelRequest::Unsubscribe { position, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn publish(&self, value: u64) -> Result<Broadcast, ChannelError> {
        debug!("Sending request");
        self.request(|respond_to| ChannelRequest::Publish { value, respond_to })
            .await
    }

    pub async fn current_value(&self) -> Result<Option<u64>, ChannelError> {
        self.request(|respond_to| ChannelRequest::CurrentValue { respond_to })
            .await
    }

    pub async fn status(&self, position: Position) -> Result<Option<SubscriberState>, ChannelError> {
        self.request(|respond_to| ChannelRequest::Status { position, respond_to })
            .await
    }

    /// Live positions in registration order.
    pub async fn subscribers(&self) -> Result<Vec<Position>, ChannelError> {
        self.request(|respond_to| ChannelRequest::Subscribers { respond_to })
            .await
    }
}

impl Subscription {
    /// Leaves the channel. Cancelling twice is harmless.
    pub async fn cancel(self, client: &ChannelClient) -> Result<(), ChannelError> {
        client.unsubscribe(self.position()).await.map(|_| ())
    }
}
