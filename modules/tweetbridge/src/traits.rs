// Trait abstractions for the bridge's collaborators.
//
// TweetSource — one search poll against the upstream API.
// TweetSink — fire-and-forget publish of a single serialized tweet.
//
// These enable deterministic testing with scripted fakes: no network,
// no broker. `cargo test` in seconds.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use twitter_client::TwitterClient;

#[async_trait]
pub trait TweetSource: Send + Sync {
    /// Fetch tweets newer than `since_id`, in the order the API returned
    /// them.
    async fn poll(&self, since_id: u64) -> Result<Vec<Value>>;
}

#[async_trait]
pub trait TweetSink: Send + Sync {
    /// Enqueue one serialized tweet for delivery. Never blocks on the
    /// delivery outcome; failures are the implementation's to log.
    async fn publish(&self, payload: String);
}

/// Polls the Twitter search endpoint with a fixed query and bearer token.
pub struct SearchPoller {
    client: TwitterClient,
    token: String,
    query: String,
}

impl SearchPoller {
    pub fn new(client: TwitterClient, token: String, query: String) -> Self {
        Self {
            client,
            token,
            query,
        }
    }
}

#[async_trait]
impl TweetSource for SearchPoller {
    async fn poll(&self, since_id: u64) -> Result<Vec<Value>> {
        Ok(self
            .client
            .search_since(&self.token, &self.query, since_id)
            .await?)
    }
}
