use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serenity::builder::{CreateEmbed, CreateEmbedFooter, ExecuteWebhook};
use serenity::http::Http;
use serenity::model::webhook::Webhook;
use serenity::model::Colour;
use tracing::info;

use crate::error::AppError;
use crate::model::Item;
use crate::util::parse::format_date;

const COLOUR_GREEN: Colour = Colour::new(0x00ff00);
const COLOUR_ORANGE: Colour = Colour::new(0xff6600);
const COLOUR_RED: Colour = Colour::new(0xff0000);
const COLOUR_BLUE: Colour = Colour::new(0x0099ff);

/// Items listed per embed in expiry alerts.
const ALERT_CHUNK: usize = 10;

/// Maximum characters shown of an error message.
const ERROR_MESSAGE_LIMIT: usize = 1000;

/// Discord webhook notifier for alerts and lifecycle messages.
///
/// Cheap to clone; all clones share one HTTP client and webhook URL.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

struct Inner {
    http: Arc<Http>,
    url: String,
    tz: Tz,
    notification_days: i64,
}

impl Notifier {
    pub fn new(http: Arc<Http>, url: String, tz: Tz, notification_days: i64) -> Self {
        Self {
            inner: Arc::new(Inner {
                http,
                url,
                tz,
                notification_days,
            }),
        }
    }

    async fn execute(&self, builder: ExecuteWebhook) -> Result<(), AppError> {
        let webhook = Webhook::from_url(&self.inner.http, &self.inner.url).await?;
        webhook.execute(&self.inner.http, false, builder).await?;
        Ok(())
    }

    /// Startup probe confirming the webhook URL is usable.
    pub async fn send_test(&self) -> Result<(), AppError> {
        let embed = CreateEmbed::new()
            .title("🔔 Webhook Test")
            .description("Notification channel is reachable.")
            .colour(COLOUR_GREEN)
            .timestamp(Utc::now());

        self.execute(ExecuteWebhook::new().embed(embed)).await
    }

    pub async fn send_startup(&self, total_items: u64, sheets_connected: bool) -> Result<(), AppError> {
        let storage = if sheets_connected {
            "Google Sheets"
        } else {
            "local database (fallback)"
        };
        let local_time = Utc::now()
            .with_timezone(&self.inner.tz)
            .format("%Y-%m-%d %H:%M %Z")
            .to_string();

        let embed = CreateEmbed::new()
            .title("✅ Clan Storage Bot Online")
            .description("The bot is running and slash commands are registered.")
            .field("Items tracked", total_items.to_string(), true)
            .field("Storage", storage, true)
            .field("Local time", local_time, true)
            .field(
                "Commands",
                "`/add_item` `/list_items` `/check_expiring` `/status`",
                false,
            )
            .colour(COLOUR_GREEN)
            .timestamp(Utc::now());

        self.execute(ExecuteWebhook::new().embed(embed)).await
    }

    pub async fn send_shutdown(&self) -> Result<(), AppError> {
        let embed = CreateEmbed::new()
            .title("🛑 Clan Storage Bot Offline")
            .description("The bot is shutting down.")
            .colour(COLOUR_RED)
            .timestamp(Utc::now());

        self.execute(ExecuteWebhook::new().embed(embed)).await
    }

    /// Announces a newly stored item to the channel.
    pub async fn send_item_added(&self, item: &Item, added_by: &str) -> Result<(), AppError> {
        let sheet_no = item
            .sheet_no
            .map(|no| no.to_string())
            .unwrap_or_else(|| "pending".to_string());

        let embed = CreateEmbed::new()
            .title("📦 New Item Stored")
            .field("No", sheet_no, true)
            .field("Name", &item.name, true)
            .field("Type", item.item_type.as_str(), true)
            .field("Participants", item.participants_display(), false)
            .field("Expires", format_date(item.expires_at, self.inner.tz), true)
            .colour(COLOUR_BLUE)
            .footer(CreateEmbedFooter::new(format!("Added by {added_by}")))
            .timestamp(Utc::now());

        self.execute(ExecuteWebhook::new().embed(embed)).await
    }

    /// Reports an operational error to the channel.
    ///
    /// The message is truncated so a large payload cannot blow the embed
    /// size limit.
    pub async fn send_error(&self, message: &str, context: Option<&str>) -> Result<(), AppError> {
        let shown = truncate_chars(message, ERROR_MESSAGE_LIMIT);

        let mut embed = CreateEmbed::new()
            .title("❌ Bot Error")
            .description(shown)
            .colour(COLOUR_RED)
            .timestamp(Utc::now());
        if let Some(ctx) = context {
            embed = embed.field("Context", ctx, false);
        }

        self.execute(ExecuteWebhook::new().embed(embed)).await
    }

    /// Sends the daily expiry alert.
    ///
    /// The first embed carries up to ten items, the participants involved,
    /// and an action checklist; further items continue in follow-up embeds
    /// so long lists stay within Discord's field limits.
    pub async fn send_expiring_alert(
        &self,
        items: &[Item],
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if items.is_empty() {
            return Ok(());
        }

        let embeds = alert_embeds(items, now, self.inner.tz, self.inner.notification_days);
        self.execute(ExecuteWebhook::new().content("@here").embeds(embeds))
            .await?;

        info!("Sent expiry alert for {} item(s)", items.len());
        Ok(())
    }
}

/// Builds the alert embeds: a head embed with the first ten items, the
/// involved participants, and the action checklist, then continuation
/// embeds in chunks of ten for overflow.
fn alert_embeds(items: &[Item], now: DateTime<Utc>, tz: Tz, window_days: i64) -> Vec<CreateEmbed> {
    let lines = alert_lines(items, now, tz);
    let mut chunks = lines.chunks(ALERT_CHUNK);

    let first = chunks.next().unwrap_or(&[]);
    let head = CreateEmbed::new()
        .title("⚠️ Item Expiry Alert")
        .description(format!(
            "{} item(s) expire within {} days. Collect or redistribute them before they are removed.",
            items.len(),
            window_days,
        ))
        .field("Items", first.join("\n"), false)
        .field(
            "Participants involved",
            involved_participants(items).join(", "),
            false,
        )
        .field(
            "Action required",
            "• Contact the participants\n• Collect or redistribute the items\n• Update the storage sheet",
            false,
        )
        .colour(COLOUR_ORANGE)
        .timestamp(now);

    let mut embeds = vec![head];
    for chunk in chunks {
        embeds.push(
            CreateEmbed::new()
                .field("Items (continued)", chunk.join("\n"), false)
                .colour(COLOUR_ORANGE),
        );
    }

    embeds
}

/// Truncates to at most `limit` characters, appending an ellipsis when
/// anything was cut. Counts characters, not bytes, so multibyte input
/// cannot split a codepoint.
fn truncate_chars(message: &str, limit: usize) -> String {
    if message.chars().count() <= limit {
        return message.to_string();
    }

    let mut shown: String = message.chars().take(limit).collect();
    shown.push('…');
    shown
}

/// One alert line per item: status emoji, name, days left, expiry date.
fn alert_lines(items: &[Item], now: DateTime<Utc>, tz: Tz) -> Vec<String> {
    items
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
        .collect()
}

/// Distinct participants across the given items, sorted for stable output.
fn involved_participants(items: &[Item]) -> Vec<String> {
    let mut names: Vec<String> = items
        .iter()
        .flat_map(|item| item.participants.iter().cloned())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemType;
    use chrono::Duration;

    fn item(name: &str, participants: &[&str], days_left: i64, now: DateTime<Utc>) -> Item {
        Item {
            sheet_no: Some(1),
            name: name.to_string(),
            item_type: ItemType::Red,
            participants: participants.iter().map(|s| s.to_string()).collect(),
            created_at: now - Duration::days(30 - days_left),
            updated_at: now,
            expires_at: now + Duration::days(days_left),
        }
    }

    #[test]
    fn alert_lines_describe_each_state() {
        let now = Utc::now();
        let tz = chrono_tz::Asia::Jakarta;
        let items = vec![
            item("Gone", &["Alice"], -2, now),
            item("Today", &["Bob"], 0, now),
            item("Soon", &["Cara"], 5, now),
        ];

        let lines = alert_lines(&items, now, tz);

        assert!(lines[0].contains("expired 2 day(s) ago"));
        assert!(lines[1].contains("expires today"));
        assert!(lines[2].contains("5 day(s) left"));
        assert!(lines[2].starts_with("🟡"));
    }

    #[test]
    fn truncates_long_messages_on_char_boundaries() {
        let long = "あ".repeat(1200);
        let shown = truncate_chars(&long, 1000);
        assert_eq!(shown.chars().count(), 1001);
        assert!(shown.ends_with('…'));

        let short = "あ".repeat(400);
        assert_eq!(truncate_chars(&short, 1000), short);
    }

    #[test]
    fn alert_embeds_chunk_long_listings() {
        let now = Utc::now();
        let tz = chrono_tz::Asia::Jakarta;
        let items: Vec<Item> = (0..25)
            .map(|i| item(&format!("Item {i}"), &["Alice"], 5, now))
            .collect();

        assert_eq!(alert_embeds(&items, now, tz, 7).len(), 3);
        assert_eq!(alert_embeds(&items[..10], now, tz, 7).len(), 1);
    }

    #[test]
    fn involved_participants_dedupes_and_sorts() {
        let now = Utc::now();
        let items = vec![
            item("A", &["Zed", "Alice"], 1, now),
            item("B", &["Alice", "Bob"], 2, now),
        ];

        assert_eq!(involved_participants(&items), vec!["Alice", "Bob", "Zed"]);
    }
}
