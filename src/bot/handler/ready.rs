use serenity::all::{ActivityData, Command, Context, Ready};
use tracing::{error, info, warn};

use crate::bot::commands;
use crate::state::AppState;

/// Registers the global slash commands and announces the bot online.
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    info!("{} is connected to Discord!", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("clan storage")));

    match Command::set_global_commands(&ctx.http, commands::all()).await {
        Ok(registered) => info!("Registered {} global slash commands", registered.len()),
        Err(e) => {
            error!("Failed to register slash commands: {:?}", e);
            return;
        }
    }

    let total = state.store.total_items().await.unwrap_or(0);
    let connected = state.store.is_remote_connected();

    if let Err(e) = state.notifier.send_startup(total, connected).await {
        warn!("Failed to send startup notification: {:?}", e);
    }
}
