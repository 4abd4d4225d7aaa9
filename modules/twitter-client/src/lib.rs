pub mod error;
pub mod types;

pub use error::{Result, TwitterError};
pub use types::{parse_statuses, status_id, SearchResponse, TokenResponse};

use serde_json::Value;

const ENDPOINT_AUTHENTICATION: &str = "https://api.twitter.com/oauth2/token";
const ENDPOINT_TWEET_SEARCH: &str = "https://api.twitter.com/1.1/search/tweets.json";

const USER_AGENT: &str = "TwitterDataSource";

/// Tweets per search page; the v1.1 API maximum.
const PAGE_SIZE: u32 = 100;

pub struct TwitterClient {
    client: reqwest::Client,
}

impl Default for TwitterClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TwitterClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Exchange application credentials for a bearer token
    /// (two-legged OAuth, `grant_type=client_credentials`).
    ///
    /// The token is obtained once per process and never refreshed; an
    /// expired token surfaces later as failed search calls.
    pub async fn obtain_bearer_token(
        &self,
        consumer_key: &str,
        consumer_secret: &str,
    ) -> Result<String> {
        let resp = self
            .client
            .post(ENDPOINT_AUTHENTICATION)
            .basic_auth(urlencode(consumer_key), Some(urlencode(consumer_secret)))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded;charset=UTF-8",
            )
            .body("grant_type=client_credentials")
            .send()
            .await?;

        let body = resp.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        token
            .into_bearer()
            .ok_or_else(|| TwitterError::Auth("no bearer token in response".to_string()))
    }

    /// Run one search poll, returning tweets newer than `since_id` in the
    /// order the API returned them. Tweets stay as raw JSON values.
    ///
    /// A body without a `statuses` array (rate-limit page, empty body)
    /// yields an empty batch; only transport failures are errors.
    pub async fn search_since(
        &self,
        token: &str,
        query: &str,
        since_id: u64,
    ) -> Result<Vec<Value>> {
        let resp = self
            .client
            .get(ENDPOINT_TWEET_SEARCH)
            .query(&[
                ("q", query.to_string()),
                ("result_type", "recent".to_string()),
                ("lang", "es".to_string()),
                ("since_id", since_id.to_string()),
                ("count", PAGE_SIZE.to_string()),
            ])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .bearer_auth(token)
            .send()
            .await?;

        let body = resp.text().await?;
        let statuses = types::parse_statuses(&body);
        tracing::debug!(count = statuses.len(), since_id, "Fetched tweets");
        Ok(statuses)
    }
}

/// Percent-encode a credential for the Basic auth pair, matching the
/// `application/x-www-form-urlencoded` rules the token endpoint expects.
fn urlencode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
