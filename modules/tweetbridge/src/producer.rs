//! Kafka publisher for serialized tweets.
//!
//! Durability, batching, retries, and ordering are librdkafka's job; this
//! adapter only enqueues records and logs delivery failures.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use tracing::{error, info};

use crate::traits::TweetSink;

/// How long `close` waits for buffered messages to flush.
const FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Publishes tweets to a fixed Kafka topic with no partition key, so the
/// broker load-balances placement.
#[derive(Clone)]
pub struct TweetPublisher {
    producer: FutureProducer,
    topic: String,
}

impl TweetPublisher {
    /// Build the producer against `brokers`: idempotent, full-ack,
    /// unbounded-retry delivery with snappy-compressed 32 KB batches.
    /// In-flight requests are capped at 5 so retries keep ordering.
    pub fn new(brokers: &str, topic: &str) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            // Safe producer
            .set("enable.idempotence", "true")
            .set("acks", "all")
            .set("message.send.max.retries", i32::MAX.to_string())
            .set("max.in.flight.requests.per.connection", "5")
            // High-throughput producer
            .set("compression.type", "snappy")
            .set("linger.ms", "20")
            .set("batch.size", "32768")
            .create()
            .context("Failed to create Kafka producer")?;

        Ok(Self {
            producer,
            topic: topic.to_string(),
        })
    }

    /// Flush buffered messages and release the producer. Called once on
    /// process shutdown.
    pub fn close(&self) {
        if let Err(e) = self.producer.flush(FLUSH_TIMEOUT) {
            error!(error = %e, "Kafka flush on shutdown failed");
        }
        info!("Producer closed");
    }
}

#[async_trait]
impl TweetSink for TweetPublisher {
    async fn publish(&self, payload: String) {
        let record = FutureRecord::<(), String>::to(&self.topic).payload(&payload);
        match self.producer.send_result(record) {
            Ok(delivery) => {
                // Watch the delivery report off the polling loop; a failed
                // delivery is logged and never re-queued here.
                tokio::spawn(async move {
                    match delivery.await {
                        Ok(Ok(_)) => {}
                        Ok(Err((e, _msg))) => error!(error = %e, "Tweet delivery failed"),
                        Err(_) => error!("Tweet delivery report dropped before completion"),
                    }
                });
            }
            Err((e, _record)) => error!(error = %e, "Failed to enqueue tweet"),
        }
    }
}
