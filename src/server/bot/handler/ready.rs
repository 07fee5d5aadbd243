//! Ready event handler for bot initialization.
//!
//! Fired once the bot has connected to Discord's gateway. Registers the global
//! `/backup` command, replacing any previous definition with the same name.

use serenity::all::{ActivityData, Command, Context, Ready};

use crate::server::bot::command;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `ctx` - Discord context for registering commands and setting activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord in {} guilds",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_activity(Some(ActivityData::custom("Keeping your server safe")));

    match Command::create_global_command(&ctx.http, command::backup::register()).await {
        Ok(registered) => tracing::info!("Registered /{} command", registered.name),
        Err(e) => tracing::error!("Failed to register /backup command: {}", e),
    }
}
