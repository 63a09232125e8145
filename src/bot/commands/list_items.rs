use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serenity::all::{CommandInteraction, Context};
use serenity::builder::{CreateCommand, CreateEmbed, CreateInteractionResponseFollowup};
use serenity::model::Colour;

use crate::error::AppError;
use crate::model::Item;
use crate::state::AppState;
use crate::util::parse::format_date;

/// Items shown per embed page.
const PAGE_SIZE: usize = 10;

pub fn register() -> CreateCommand {
    CreateCommand::new("list_items").description("List all items in clan storage")
}

pub async fn run(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let items = state.store.all_items().await?;

    if items.is_empty() {
        let embed = CreateEmbed::new()
            .title("📋 Clan Storage")
            .description("Storage is empty.")
            .colour(Colour::new(0x0099ff));
        command
            .create_followup(&ctx.http, CreateInteractionResponseFollowup::new().embed(embed))
            .await?;
        return Ok(());
    }

    let now = Utc::now();
    let tz = state.config.timezone;
    let pages: Vec<&[Item]> = items.chunks(PAGE_SIZE).collect();
    let page_count = pages.len();

    for (index, page) in pages.into_iter().enumerate() {
        let lines: Vec<String> = page.iter().map(|item| item_line(item, now, tz)).collect();

        let embed = CreateEmbed::new()
            .title(format!("📋 Clan Storage ({} items)", items.len()))
            .description(lines.join("\n"))
            .footer(serenity::builder::CreateEmbedFooter::new(format!(
                "Page {}/{}",
                index + 1,
                page_count,
            )))
            .colour(Colour::new(0x0099ff));

        command
            .create_followup(&ctx.http, CreateInteractionResponseFollowup::new().embed(embed))
            .await?;

        // Stay clear of Discord's follow-up rate limit on long listings.
        if index + 1 < page_count {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }

    Ok(())
}

fn item_line(item: &Item, now: DateTime<Utc>, tz: Tz) -> String {
    let no = item
        .sheet_no
        .map(|no| no.to_string())
        .unwrap_or_else(|| "?".to_string());
    let days = item.days_until_expiry(now);
    let remaining = if days < 0 {
        "EXPIRED".to_string()
    } else {
        format!("{} day(s) left", days)
    };
    format!(
        "`{:>3}` {} **{}** ({}) | {} | {}, {}",
        no,
        item.expiry_status(now).emoji(),
        item.name,
        item.item_type.as_str(),
        item.participants_display(),
        remaining,
        format_date(item.expires_at, tz),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemType;
    use chrono::Duration;

    #[test]
    fn item_line_shows_status_and_pending_number() {
        let now = Utc::now();
        let item = Item {
            sheet_no: None,
            name: "Ancient Relic".to_string(),
            item_type: ItemType::Unique,
            participants: vec!["Alice".to_string(), "Bob".to_string()],
            created_at: now,
            updated_at: now,
            expires_at: now + Duration::days(30),
        };

        let line = item_line(&item, now, chrono_tz::Asia::Jakarta);

        assert!(line.contains("`  ?`"));
        assert!(line.contains("🟢"));
        assert!(line.contains("Ancient Relic"));
        assert!(line.contains("Alice, Bob"));
    }
}
