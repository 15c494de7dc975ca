use async_trait::async_trait;
use order_queue::channel::{self, ChannelError, MemorySink, NotificationSink, SinkError};
use order_queue::clients::ChannelClient;
use order_queue::lifecycle::{QueueConfig, QueueError, QueueSystem};
use order_queue::model::{Notification, NotificationKind, Position};
use order_queue::subscriber::SubscriberState;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Full end-to-end test: intake, admission, ready and departure.
#[tokio::test]
async fn test_full_queue_integration() {
    let sink = MemorySink::new();
    let system = QueueSystem::with_sink(QueueConfig::default(), Arc::new(sink.clone()));

    let first = system.place_order("Capuccino").await.expect("Failed to place order");
    assert_eq!(first.item, "Cappuccino");
    assert_eq!(first.position, Position(1));

    let second = system.place_order("expresso").await.expect("Failed to place order");
    assert_eq!(second.item, "Espresso");
    assert_eq!(second.position, Position(2));

    // Rejected requests do not use up a position
    let rejected = system.place_order("Xyzzyx").await;
    assert_eq!(rejected, Err(QueueError::UnrecognizedItem("Xyzzyx".into())));

    let third = system.place_order("Caffe Latte").await.unwrap();
    assert_eq!(third.position, Position(3));

    let broadcast = system.announce(2).await.expect("Failed to announce");
    assert_eq!(broadcast.recipients, 3);
    assert_eq!(broadcast.notifications, vec![Notification::ready(Position(2))]);

    // 1 + 7 = 8: customer 1 leaves, customer 3 still waits
    let broadcast = system.announce(8).await.unwrap();
    assert_eq!(broadcast.recipients, 2);
    assert_eq!(broadcast.notifications, vec![Notification::abandoned(Position(1))]);

    let waiting = system.channel_client().subscribers().await.unwrap();
    assert_eq!(waiting, vec![Position(3)]);
    assert_eq!(system.current_value().await.unwrap(), Some(8));

    assert_eq!(
        sink.received(),
        vec![Notification::ready(Position(2)), Notification::abandoned(Position(1))]
    );

    system.shutdown().await.expect("Failed to shutdown queue");
}

/// Subscribe {5, 12}, announce 5 then 19.
#[tokio::test]
async fn test_ready_then_departure_through_actor() {
    let sink = MemorySink::new();
    let (actor, client) = channel::new(8, 7, Arc::new(sink.clone()));
    let actor_handle = tokio::spawn(actor.run());

    client.subscribe(Position(5)).await.unwrap();
    client.subscribe(Position(12)).await.unwrap();

    client.publish(5).await.unwrap();
    assert_eq!(client.status(Position(5)).await.unwrap(), None);
    assert_eq!(client.status(Position(12)).await.unwrap(), Some(SubscriberState::Waiting));

    client.publish(19).await.unwrap();
    assert_eq!(client.status(Position(12)).await.unwrap(), None);
    assert!(client.subscribers().await.unwrap().is_empty());

    let kinds: Vec<_> = sink.received().iter().map(|n| (n.position, n.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            (Position(5), NotificationKind::Ready),
            (Position(12), NotificationKind::Abandoned),
        ]
    );

    drop(client);
    actor_handle.await.unwrap();
}

/// Subscribes a fresh customer at the announced position from inside delivery.
///
/// The sink cannot await the channel (it runs inside the actor), so it spawns
/// the subscribe; the actor only picks it up after the broadcast is finished.
#[derive(Default)]
struct ResubscribingSink {
    client: Mutex<Option<ChannelClient>>,
    pending: Mutex<Vec<JoinHandle<Result<(), ChannelError>>>>,
}

#[async_trait]
impl NotificationSink for ResubscribingSink {
    async fn notify(&self, notification: &Notification) -> Result<(), SinkError> {
        let client = self.client.lock().unwrap().clone();
        if let Some(client) = client {
            let position = notification.position;
            let handle = tokio::spawn(async move { client.subscribe(position).await.map(|_| ()) });
            self.pending.lock().unwrap().push(handle);
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_subscriber_added_during_delivery_misses_that_broadcast() {
    let sink = Arc::new(ResubscribingSink::default());
    let (actor, client) = channel::new(8, 7, sink.clone());
    let actor_handle = tokio::spawn(actor.run());
    *sink.client.lock().unwrap() = Some(client.clone());

    client.subscribe(Position(5)).await.unwrap();
    client.subscribe(Position(12)).await.unwrap();

    let broadcast = client.publish(5).await.unwrap();
    assert_eq!(broadcast.notifications, vec![Notification::ready(Position(5))]);

    let pending: Vec<_> = sink.pending.lock().unwrap().drain(..).collect();
    assert_eq!(pending.len(), 1);
    for handle in pending {
        handle.await.unwrap().expect("resubscribe after delivery");
    }

    // The newcomer at 5 joined after the snapshot and is still waiting on 5
    assert_eq!(client.status(Position(5)).await.unwrap(), Some(SubscriberState::Waiting));
    assert_eq!(client.current_value().await.unwrap(), Some(5));
    assert_eq!(client.subscribers().await.unwrap(), vec![Position(12), Position(5)]);

    *sink.client.lock().unwrap() = None;
    drop(client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_unsubscribe_and_duplicate_rules() {
    let system = QueueSystem::new(QueueConfig::default());

    system.place_order_at(Position(3), "Mocha").await.unwrap_err();
    let ticket = system.place_order_at(Position(3), "Caffe Mocha").await.unwrap();
    assert_eq!(ticket.item, "Caffe Mocha");

    let duplicate = system.place_order_at(Position(3), "Espresso").await;
    assert_eq!(
        duplicate,
        Err(QueueError::Channel(ChannelError::DuplicatePosition(Position(3))))
    );

    // Never subscribed: silently ignored
    system.cancel(Position(99)).await.unwrap();
    assert_eq!(system.channel_client().subscribers().await.unwrap(), vec![Position(3)]);

    system.cancel(Position(3)).await.unwrap();
    system.cancel(Position(3)).await.unwrap();
    assert!(system.channel_client().subscribers().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_auto_position_skips_caller_chosen_ones() {
    let system = QueueSystem::new(QueueConfig::default());

    let chosen = system.place_order_at(Position(1), "Espresso").await.unwrap();
    assert_eq!(chosen.position, Position(1));
    system.place_order_at(Position(2), "Caffe Mocha").await.unwrap();

    let ticket = system.place_order("Cappuccino").await.expect("next free position");
    assert_eq!(ticket.position, Position(3));
    assert_eq!(ticket.item, "Cappuccino");

    let next = system.place_order("Espresso").await.unwrap();
    assert_eq!(next.position, Position(4));

    assert_eq!(
        system.channel_client().subscribers().await.unwrap(),
        vec![Position(1), Position(2), Position(3), Position(4)]
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_subscription_handle_cancels() {
    let (actor, client) = channel::new(8, 7, Arc::new(MemorySink::new()));
    let actor_handle = tokio::spawn(actor.run());

    let subscription = client.subscribe(Position(1)).await.unwrap();
    subscription.cancel(&client).await.unwrap();
    subscription.cancel(&client).await.unwrap();
    assert!(client.subscribers().await.unwrap().is_empty());

    drop(client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_concurrent_orders_get_unique_positions() {
    let system = Arc::new(QueueSystem::new(QueueConfig::default()));

    let mut handles = vec![];
    for _ in 0..10 {
        let system = system.clone();
        handles.push(tokio::spawn(async move { system.place_order("Espresso").await }));
    }

    let mut positions = vec![];
    for handle in handles {
        positions.push(handle.await.unwrap().expect("order admitted").position);
    }
    positions.sort();
    let expected: Vec<Position> = (1..=10).map(Position).collect();
    assert_eq!(positions, expected);

    let system = Arc::try_unwrap(system).ok().expect("no other references");
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_closed_channel_reports_error() {
    let (actor, client) = channel::new(8, 7, Arc::new(MemorySink::new()));
    drop(actor);
    assert_eq!(client.publish(1).await, Err(ChannelError::ActorClosed));
}
