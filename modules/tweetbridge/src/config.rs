use std::env;

/// Bridge configuration loaded from environment variables.
/// Built once at startup and passed by reference; no global state.
#[derive(Debug, Clone)]
pub struct Config {
    // Twitter application credentials
    pub consumer_key: String,
    pub consumer_secret: String,

    // Kafka
    pub kafka_server: String,
    pub kafka_topic: String,

    // Search term for the poll query
    pub query_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            consumer_key: required_env("CONSUMER_KEY"),
            consumer_secret: required_env("CONSUMER_SECRET"),
            kafka_server: required_env("KAFKA_SERVER"),
            kafka_topic: required_env("KAFKA_TOPIC"),
            query_filter: required_env("QUERY_FILTER"),
        }
    }

    /// Log the loaded configuration with credentials redacted.
    pub fn log_redacted(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  CONSUMER_KEY: {}", preview(&self.consumer_key));
        tracing::info!("  CONSUMER_SECRET: {}", preview(&self.consumer_secret));
        tracing::info!("  KAFKA_SERVER: {}", self.kafka_server);
        tracing::info!("  KAFKA_TOPIC: {}", self.kafka_topic);
        tracing::info!("  QUERY_FILTER: {}", self.query_filter);
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}

fn preview(val: &str) -> String {
    let n = val.len().min(5);
    format!("{}...({} chars)", &val[..n], val.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_never_exposes_the_full_secret() {
        assert_eq!(preview("supersecretvalue"), "super...(16 chars)");
        assert_eq!(preview("abc"), "abc...(3 chars)");
    }
}
