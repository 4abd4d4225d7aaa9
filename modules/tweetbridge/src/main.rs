use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use twitter_client::TwitterClient;

use tweetbridge::bridge::Bridge;
use tweetbridge::config::Config;
use tweetbridge::producer::TweetPublisher;
use tweetbridge::traits::SearchPoller;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tweetbridge=info")),
        )
        .init();

    info!("Tweetbridge starting...");

    // Load config
    let config = Config::from_env();
    config.log_redacted();

    // Nothing but startup failures ends the run; they are logged, not
    // propagated as an exit code.
    if let Err(e) = run(&config).await {
        error!(error = %e, "Tweetbridge run failed");
    }
}

async fn run(config: &Config) -> Result<()> {
    let client = TwitterClient::new();

    // One-shot credential exchange. No token means no run: there is no
    // retry and no refresh.
    let token = client
        .obtain_bearer_token(&config.consumer_key, &config.consumer_secret)
        .await
        .context("Failed to obtain bearer token")?;
    info!("Bearer token obtained");

    let publisher = TweetPublisher::new(&config.kafka_server, &config.kafka_topic)?;
    let poller = SearchPoller::new(client, token, config.query_filter.clone());
    let mut bridge = Bridge::new(poller, publisher.clone());

    tokio::select! {
        _ = bridge.run() => {}
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    // Flush whatever the producer still buffers before exiting.
    publisher.close();
    Ok(())
}
