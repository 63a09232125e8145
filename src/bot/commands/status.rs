use chrono::Utc;
use serenity::all::{CommandInteraction, Context};
use serenity::builder::{CreateCommand, CreateEmbed, CreateInteractionResponseFollowup};
use serenity::model::Colour;

use crate::error::AppError;
use crate::state::AppState;

pub fn register() -> CreateCommand {
    CreateCommand::new("status").description("Show bot and storage status")
}

pub async fn run(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let now = Utc::now();
    let total = state.store.total_items().await?;
    let expiring = state.store.expiring_items(now).await?.len();
    let connected = state.store.is_remote_connected();

    let (storage, colour) = if connected {
        ("🟢 Google Sheets", Colour::new(0x00ff00))
    } else {
        ("🟡 Local database (fallback)", Colour::new(0xff6600))
    };

    let uptime = now - state.started_at;
    let uptime_display = format!(
        "{}d {}h {}m",
        uptime.num_days(),
        uptime.num_hours() % 24,
        uptime.num_minutes() % 60,
    );

    let embed = CreateEmbed::new()
        .title("🤖 Bot Status")
        .field("Storage", storage, true)
        .field("Items tracked", total.to_string(), true)
        .field("Expiring soon", expiring.to_string(), true)
        .field("Uptime", uptime_display, true)
        .field(
            "Notification window",
            format!("{} days", state.config.notification_days_before),
            true,
        )
        .field("Timezone", state.config.timezone.to_string(), true)
        .colour(colour);

    command
        .create_followup(&ctx.http, CreateInteractionResponseFollowup::new().embed(embed))
        .await?;

    Ok(())
}
