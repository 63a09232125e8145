use serenity::all::{Client, GatewayIntents};
use tracing::info;

use crate::bot::handler::Handler;
use crate::error::AppError;
use crate::state::AppState;

/// Builds the Discord client with the command handler attached.
///
/// # Arguments
/// - `token` - Discord bot token
/// - `state` - Shared application state for the event handler
///
/// # Returns
/// - `Ok(Client)` - Client ready to start
/// - `Err(AppError)` - Client construction failed
pub async fn init_bot(token: &str, state: AppState) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS;

    let client = Client::builder(token, intents)
        .event_handler(Handler::new(state))
        .await?;

    Ok(client)
}

/// Runs the bot until shutdown.
///
/// Blocks until the gateway connection closes, so call it from its own
/// tokio task.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
