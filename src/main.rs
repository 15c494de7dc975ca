use order_queue::lifecycle::{setup_tracing, QueueConfig, QueueSystem};
use tracing::{error, info, Instrument};

const REQUESTS: &[&str] = &[
    "capuccino",
    "Expresso",
    "Caffe Late",
    "a glass of milk",
    "caramel machiato",
    "Caffe Mocha",
];

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = match std::env::var("QUEUE_CONFIG") {
        Ok(path) => QueueConfig::from_file(&path).map_err(|e| e.to_string())?,
        Err(_) => QueueConfig::default(),
    };
    info!(items = config.vocabulary.len(), threshold = config.threshold, "Starting queue");

    let departure_offset = config.departure_offset;
    let system = QueueSystem::new(config);

    let span = tracing::info_span!("intake");
    let tickets = async {
        let mut tickets = Vec::new();
        for request in REQUESTS {
            match system.place_order(request).await {
                Ok(ticket) => tickets.push(ticket),
                Err(e) => error!(error = %e, "Order rejected"),
            }
        }
        tickets
    }
    .instrument(span)
    .await;

    info!(waiting = tickets.len(), "Intake complete");

    // The first order got lost; the queue keeps moving until that customer gives up.
    let mut numbers: Vec<u64> = tickets.iter().skip(1).map(|t| t.position.value()).collect();
    if let Some(first) = tickets.first() {
        numbers.push(first.position.value().saturating_add(departure_offset));
    }

    let span = tracing::info_span!("service");
    async {
        for number in numbers {
            system.announce(number).await.map_err(|e| e.to_string())?;
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
