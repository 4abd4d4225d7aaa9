//! The poll → watermark → publish loop.

use std::time::Duration;

use tracing::{debug, error, info};

use crate::traits::{TweetSink, TweetSource};
use crate::watermark;

/// Fixed delay between poll cycles, regardless of cycle outcome.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Drives the ingestion loop: one search poll per cycle, watermark
/// advance, then one publish per tweet in the order retrieved.
pub struct Bridge<S, P> {
    source: S,
    sink: P,
    watermark: u64,
}

impl<S: TweetSource, P: TweetSink> Bridge<S, P> {
    pub fn new(source: S, sink: P) -> Self {
        Self {
            source,
            sink,
            watermark: 0,
        }
    }

    /// Highest tweet ID seen so far. Not persisted; a restarted bridge
    /// starts over at 0 and re-delivers history.
    pub fn watermark(&self) -> u64 {
        self.watermark
    }

    /// One poll/publish cycle. A poll failure leaves the watermark
    /// untouched and publishes nothing. The watermark advances before
    /// publishing and regardless of delivery outcomes.
    pub async fn run_cycle(&mut self) -> anyhow::Result<usize> {
        let statuses = self.source.poll(self.watermark).await?;
        self.watermark = watermark::advance(self.watermark, &statuses);
        for status in &statuses {
            self.sink.publish(status.to_string()).await;
        }
        Ok(statuses.len())
    }

    /// Run cycles forever on the fixed cadence. A failed cycle is logged
    /// and the next one is still scheduled; only process shutdown ends
    /// the loop.
    pub async fn run(&mut self) {
        info!(interval_secs = POLL_INTERVAL.as_secs(), "Starting poll loop");
        loop {
            match self.run_cycle().await {
                Ok(count) if count > 0 => {
                    info!(count, watermark = self.watermark, "Tweets published")
                }
                Ok(_) => debug!("No new tweets this cycle"),
                Err(e) => error!(error = %e, "Poll cycle failed"),
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::traits::{TweetSink, TweetSource};

    fn tweet(id: &str) -> Value {
        json!({ "id_str": id, "text": format!("tweet {id}") })
    }

    /// Returns one scripted batch (or error) per poll, then empty batches.
    /// Records the `since_id` of every poll it receives.
    struct ScriptedSource {
        batches: Mutex<Vec<Result<Vec<Value>>>>,
        since_ids: Arc<Mutex<Vec<u64>>>,
    }

    impl ScriptedSource {
        fn new(batches: Vec<Result<Vec<Value>>>) -> Self {
            Self {
                batches: Mutex::new(batches),
                since_ids: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl TweetSource for ScriptedSource {
        async fn poll(&self, since_id: u64) -> Result<Vec<Value>> {
            self.since_ids.lock().unwrap().push(since_id);
            let mut batches = self.batches.lock().unwrap();
            if batches.is_empty() {
                Ok(Vec::new())
            } else {
                batches.remove(0)
            }
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        published: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl TweetSink for RecordingSink {
        async fn publish(&self, payload: String) {
            self.published.lock().unwrap().push(payload);
        }
    }

    #[tokio::test]
    async fn cycle_publishes_every_tweet_in_order_and_advances_watermark() {
        let batch = vec![tweet("100"), tweet("205"), tweet("150")];
        let source = ScriptedSource::new(vec![Ok(batch.clone())]);
        let sink = RecordingSink::default();
        let published = sink.published.clone();

        let mut bridge = Bridge::new(source, sink);
        let count = bridge.run_cycle().await.unwrap();

        assert_eq!(count, 3);
        assert_eq!(bridge.watermark(), 205);
        let published = published.lock().unwrap();
        let expected: Vec<String> = batch.iter().map(|t| t.to_string()).collect();
        assert_eq!(*published, expected);
    }

    #[tokio::test]
    async fn poll_failure_publishes_nothing_and_keeps_watermark() {
        let source = ScriptedSource::new(vec![
            Ok(vec![tweet("300")]),
            Err(anyhow!("connection reset")),
        ]);
        let sink = RecordingSink::default();
        let published = sink.published.clone();

        let mut bridge = Bridge::new(source, sink);
        bridge.run_cycle().await.unwrap();
        assert_eq!(bridge.watermark(), 300);

        let err = bridge.run_cycle().await;
        assert!(err.is_err());
        assert_eq!(bridge.watermark(), 300);
        assert_eq!(published.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_cycle_does_not_poison_the_next() {
        let source = ScriptedSource::new(vec![
            Err(anyhow!("connection reset")),
            Ok(vec![tweet("7")]),
        ]);
        let sink = RecordingSink::default();
        let published = sink.published.clone();

        let mut bridge = Bridge::new(source, sink);
        assert!(bridge.run_cycle().await.is_err());

        let count = bridge.run_cycle().await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(bridge.watermark(), 7);
        assert_eq!(published.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn next_poll_requests_only_newer_tweets() {
        let source = ScriptedSource::new(vec![Ok(vec![tweet("300")]), Ok(Vec::new())]);
        let since_ids = source.since_ids.clone();

        let mut bridge = Bridge::new(source, RecordingSink::default());
        bridge.run_cycle().await.unwrap();
        bridge.run_cycle().await.unwrap();

        assert_eq!(*since_ids.lock().unwrap(), vec![0, 300]);
        assert_eq!(bridge.watermark(), 300);
    }

    #[tokio::test(start_paused = true)]
    async fn loop_keeps_scheduling_cycles_after_a_failure() {
        let source = ScriptedSource::new(vec![
            Err(anyhow!("connection reset")),
            Ok(vec![tweet("42")]),
        ]);
        let sink = RecordingSink::default();
        let published = sink.published.clone();

        let driver = tokio::spawn(async move {
            let mut bridge = Bridge::new(source, sink);
            bridge.run().await;
        });

        // Cycle 1 fails at t=0; cycle 2 publishes one tweet at t=2s.
        tokio::time::sleep(POLL_INTERVAL * 3).await;
        driver.abort();

        assert_eq!(published.lock().unwrap().len(), 1);
    }
}
