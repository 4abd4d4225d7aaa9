use serde::Deserialize;
use serde_json::Value;

/// Response from the oauth2/token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl TokenResponse {
    /// Returns the access token only if the response really carries a
    /// non-empty bearer token; anything else means no token was obtained.
    pub fn into_bearer(self) -> Option<String> {
        match (self.token_type.as_deref(), self.access_token) {
            (Some("bearer"), Some(token)) if !token.is_empty() => Some(token),
            _ => None,
        }
    }
}

/// Response from the v1.1 search endpoint. Tweets are kept as raw JSON
/// values so they can be republished verbatim downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub statuses: Option<Vec<Value>>,
}

/// Extract the tweet list from a search response body. An empty,
/// unparseable, or statuses-less body yields an empty list rather than
/// an error; the caller cannot tell an empty cycle from a malformed one.
pub fn parse_statuses(body: &str) -> Vec<Value> {
    serde_json::from_str::<SearchResponse>(body)
        .map(|resp| resp.statuses.unwrap_or_default())
        .unwrap_or_default()
}

/// Numeric tweet ID from the `id_str` field, if present and parseable.
pub fn status_id(status: &Value) -> Option<u64> {
    status.get("id_str")?.as_str()?.parse().ok()
}
