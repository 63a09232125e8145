use std::str::FromStr;

use chrono::Utc;
use serenity::all::{CommandInteraction, CommandOptionType, Context, ResolvedOption, ResolvedValue};
use serenity::builder::{
    CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponseFollowup,
};
use serenity::model::Colour;
use tracing::{info, warn};

use crate::error::AppError;
use crate::model::{ItemType, NewItem};
use crate::state::AppState;
use crate::util::parse::{format_date, parse_created_date, sanitize_participants};

pub fn register() -> CreateCommand {
    let mut type_option =
        CreateCommandOption::new(CommandOptionType::String, "type", "Item type").required(true);
    for item_type in ItemType::ALL {
        type_option = type_option.add_string_choice(item_type.as_str(), item_type.as_str());
    }

    CreateCommand::new("add_item")
        .description("Store a new item in clan storage")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "name", "Item name")
                .required(true),
        )
        .add_option(type_option)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "participants",
                "Comma-separated participant names",
            )
            .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "created_date",
            "Date the item was obtained (e.g. 2026-08-29), defaults to now",
        ))
}

pub async fn run(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let options = command.data.options();

    let name = str_option(&options, "name")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Item name cannot be empty.".to_string()))?;

    let item_type = str_option(&options, "type")
        .and_then(|raw| ItemType::from_str(raw).ok())
        .ok_or_else(|| {
            AppError::BadRequest("Item type must be UNIQUE, RED, or CONSUMABLE.".to_string())
        })?;

    let participants = str_option(&options, "participants")
        .map(sanitize_participants)
        .unwrap_or_default();
    if participants.is_empty() {
        return Err(AppError::BadRequest(
            "At least one participant is required.".to_string(),
        ));
    }

    let created_at = match str_option(&options, "created_date") {
        Some(raw) => Some(parse_created_date(raw, state.config.timezone, Utc::now())?),
        None => None,
    };

    let item = state
        .store
        .add_item(NewItem {
            name: name.to_string(),
            item_type,
            participants,
            created_at,
        })
        .await?;

    info!(
        "User {} added item '{}' ({})",
        command.user.name,
        item.name,
        item.item_type.as_str()
    );

    let tz = state.config.timezone;
    let storage_note = match item.sheet_no {
        Some(no) => format!("Stored in the sheet as No. {no}."),
        None => "Google Sheets is unreachable; the item is queued locally and will sync automatically.".to_string(),
    };

    let embed = CreateEmbed::new()
        .title("✅ Item Stored")
        .field("Name", &item.name, true)
        .field("Type", item.item_type.as_str(), true)
        .field("Participants", item.participants_display(), false)
        .field("Created", format_date(item.created_at, tz), true)
        .field("Expires", format_date(item.expires_at, tz), true)
        .description(storage_note)
        .footer(CreateEmbedFooter::new(format!(
            "Added by {}",
            command.user.name
        )))
        .colour(Colour::new(0x00ff00));

    command
        .create_followup(&ctx.http, CreateInteractionResponseFollowup::new().embed(embed))
        .await?;

    if let Err(e) = state.notifier.send_item_added(&item, &command.user.name).await {
        warn!("Failed to send item-added notification: {:?}", e);
    }

    Ok(())
}

fn str_option<'a>(options: &'a [ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    options.iter().find_map(|opt| match &opt.value {
        ResolvedValue::String(s) if opt.name == name => Some(*s),
        _ => None,
    })
}
