use chrono::Utc;
use serenity::all::{CommandInteraction, Context};
use serenity::builder::{CreateCommand, CreateEmbed, CreateInteractionResponseFollowup};
use serenity::model::Colour;

use crate::error::AppError;
use crate::state::AppState;
use crate::util::parse::format_date;

pub fn register() -> CreateCommand {
    CreateCommand::new("check_expiring")
        .description("Show items expiring within the notification window")
}

pub async fn run(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let now = Utc::now();
    let items = state.store.expiring_items(now).await?;
    let window = state.config.notification_days_before;

    let embed = if items.is_empty() {
        CreateEmbed::new()
            .title("✅ Nothing Expiring")
            .description(format!("No items expire within the next {window} days."))
            .colour(Colour::new(0x00ff00))
    } else {
        let tz = state.config.timezone;
        let lines: Vec<String> = items
            .iter()
            .map(|item| {
                let days = item.days_until_expiry(now);
                let when = if days < 0 {
                    format!("expired {} day(s) ago", -days)
                } else if days == 0 {
                    "expires today".to_string()
                } else {
                    format!("{} day(s) left", days)
                };
                format!(
                    "{} **{}** ({}) | {}, {}",
                    item.expiry_status(now).emoji(),
                    item.name,
                    item.item_type.as_str(),
                    when,
                    format_date(item.expires_at, tz),
                )
            })
            .collect();

        CreateEmbed::new()
            .title(format!("⚠️ {} Item(s) Expiring Soon", items.len()))
            .description(lines.join("\n"))
            .colour(Colour::new(0xff6600))
    };

    command
        .create_followup(&ctx.http, CreateInteractionResponseFollowup::new().embed(embed))
        .await?;

    Ok(())
}
