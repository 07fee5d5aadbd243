use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};
use serenity::http::Http;
use std::sync::Arc;

use crate::server::{bot::handler::Handler, config::Config, error::AppError};

/// Builds the Discord bot client without connecting it.
///
/// The returned HTTP client can be shared before the gateway connection is started.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `db` - Database connection for the bot to use
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client to pass to `start_bot` and its HTTP client
/// - `Err(AppError)` - Client construction failed
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
) -> Result<(Client, Arc<Http>), AppError> {
    let intents = GatewayIntents::GUILDS;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(db))
        .await?;
    let http = client.http.clone();

    Ok((client, http))
}

/// Connects the bot to Discord's gateway.
///
/// Runs until the connection shuts down, so it should be called from within a
/// `tokio::spawn` task.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
