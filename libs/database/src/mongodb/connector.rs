use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::{info, warn};

use super::MongoConfig;

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Build a client from configuration without contacting the server.
///
/// Fails only when the connection string or options are invalid. The driver
/// connects lazily, so an unreachable server surfaces on the first operation.
pub async fn build_client(config: &MongoConfig) -> Result<Client, MongoError> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(Client::with_options(options)?)
}

/// Round-trip a `ping` to the server
async fn ping(client: &Client) -> Result<(), MongoError> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;
    Ok(())
}

/// Connect using a MongoConfig, tolerating an unreachable server.
///
/// Invalid configuration is still an error. When the server does not answer
/// the initial ping, a warning is logged and the unverified client is
/// returned so the process can start; each later operation then fails on
/// its own until the server becomes reachable.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_lenient};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "mydb");
/// let client = connect_lenient(&config).await?;
/// ```
pub async fn connect_lenient(config: &MongoConfig) -> Result<Client, MongoError> {
    info!("Attempting to connect to MongoDB at {}", config.url);

    let client = build_client(config).await?;

    match ping(&client).await {
        Ok(()) => info!("Successfully connected to MongoDB"),
        Err(e) => warn!(
            error = %e,
            "MongoDB is not reachable yet, continuing startup without a verified connection"
        ),
    }

    Ok(client)
}
