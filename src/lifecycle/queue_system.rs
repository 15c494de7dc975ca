use crate::channel::{self, Broadcast, ChannelError, LogSink, NotificationSink};
use crate::clients::ChannelClient;
use crate::lifecycle::{QueueConfig, QueueError};
use crate::model::{Position, Ticket};
use crate::resolver::Resolver;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// The composition root of the order queue.
///
/// `QueueSystem` is responsible for:
/// - **Order intake**: resolving free text to a canonical item with the [`Resolver`]
/// - **Admission**: giving each order a position and subscribing it to the channel
/// - **Announcements**: publishing completed order numbers to everyone waiting
/// - **Lifecycle**: starting and stopping the channel actor
///
/// # Example
///
/// ```ignore
/// let system = QueueSystem::new(QueueConfig::default());
///
/// let ticket = system.place_order("capuccino").await?;
/// assert_eq!(ticket.item, "Cappuccino");
///
/// system.announce(ticket.position.value()).await?;
/// system.shutdown().await?;
/// ```
pub struct QueueSystem {
    /// Client for interacting with the channel actor
    channel_client: ChannelClient,

    resolver: Resolver,

    /// Next position handed out by [`place_order`](Self::place_order)
    next_position: AtomicU64,

    /// Task handles for running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl QueueSystem {
    /// Starts a queue whose notifications are written to the log.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: QueueConfig) -> Self {
        Self::with_sink(config, Arc::new(LogSink))
    }

    /// Starts a queue that hands notifications to `sink`.
    pub fn with_sink(config: QueueConfig, sink: Arc<dyn NotificationSink>) -> Self {
        let (actor, channel_client) = channel::new(config.buffer_size, config.departure_offset, sink);
        let handle = tokio::spawn(actor.run());

        let mut system = Self::with_channel(config, channel_client);
        system.handles.push(handle);
        system
    }

    /// Builds a queue on top of an existing channel client, e.g. a
    /// [`MockChannel`](crate::channel::mock::MockChannel). No task is spawned.
    pub fn with_channel(config: QueueConfig, channel_client: ChannelClient) -> Self {
        Self {
            channel_client,
            resolver: Resolver::new(config.vocabulary, config.threshold),
            next_position: AtomicU64::new(config.first_position),
            handles: Vec::new(),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn channel_client(&self) -> &ChannelClient {
        &self.channel_client
    }

    /// Resolves `request` and admits it at the next free ordinal position.
    ///
    /// A rejected request does not consume a position. Positions already
    /// claimed through [`place_order_at`](Self::place_order_at) are skipped.
    #[instrument(skip(self))]
    pub async fn place_order(&self, request: &str) -> Result<Ticket, QueueError> {
        let item = self.resolve_item(request)?;
        loop {
            let position = self.next_position()?;
            match self.admit(position, &item).await {
                Err(QueueError::Channel(ChannelError::DuplicatePosition(taken))) => {
                    debug!(%taken, "Position already taken, trying the next one");
                }
                result => return result,
            }
        }
    }

    /// Like [`place_order`](Self::place_order) but at a caller-chosen position.
    ///
    /// # Errors
    /// [`ChannelError::DuplicatePosition`](crate::channel::ChannelError::DuplicatePosition)
    /// if someone is already waiting on `position`.
    #[instrument(skip(self))]
    pub async fn place_order_at(&self, position: Position, request: &str) -> Result<Ticket, QueueError> {
        let item = self.resolve_item(request)?;
        self.admit(position, &item).await
    }

    /// Takes `position` out of the queue. Unknown positions are ignored.
    #[instrument(skip(self))]
    pub async fn cancel(&self, position: Position) -> Result<(), QueueError> {
        let removed = self.channel_client.unsubscribe(position).await?;
        debug!(removed, "Cancel");
        Ok(())
    }

    /// Announces that order `number` is complete.
    ///
    /// Returns once every waiting customer has reacted.
    #[instrument(skip(self))]
    pub async fn announce(&self, number: u64) -> Result<Broadcast, QueueError> {
        let broadcast = self.channel_client.publish(number).await?;
        info!(
            recipients = broadcast.recipients,
            left = broadcast.notifications.len(),
            "Announced"
        );
        Ok(broadcast)
    }

    pub async fn current_value(&self) -> Result<Option<u64>, QueueError> {
        Ok(self.channel_client.current_value().await?)
    }

    fn resolve_item(&self, request: &str) -> Result<String, QueueError> {
        self.resolver.resolve(request).into_option().ok_or_else(|| {
            warn!("No item within threshold");
            QueueError::UnrecognizedItem(request.to_string())
        })
    }

    /// Takes the next counter value; fails once the counter would pass `u64::MAX`.
    fn next_position(&self) -> Result<Position, QueueError> {
        self.next_position
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |p| p.checked_add(1))
            .map(Position)
            .map_err(|_| QueueError::PositionsExhausted)
    }

    async fn admit(&self, position: Position, item: &str) -> Result<Ticket, QueueError> {
        let subscription = self.channel_client.subscribe(position).await?;
        info!(position = %subscription.position(), %item, "Order admitted");
        Ok(Ticket::new(subscription.position(), item))
    }

    /// Gracefully shuts down the queue.
    ///
    /// Dropping the client closes the channel actor's request queue; the actor
    /// then drains and exits. Any other clones of the client keep it alive, so
    /// drop those first.
    pub async fn shutdown(self) -> Result<(), QueueError> {
        info!("Shutting down queue...");
        drop(self.channel_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Channel task failed: {:?}", e);
                return Err(QueueError::Shutdown(e.to_string()));
            }
        }

        info!("Queue shutdown complete.");
        Ok(())
    }
}
