use serenity::all::{CommandInteraction, Context, Interaction};
use serenity::builder::{
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage,
};
use serenity::model::Colour;
use tracing::{error, warn};

use crate::bot::commands;
use crate::error::AppError;
use crate::state::AppState;
use crate::util::throttle::RateLimiter;

/// Dispatches an incoming interaction to the matching slash command.
///
/// Authorization and rate limiting are checked before the command is
/// deferred; denials go out as immediate ephemeral responses so nothing
/// leaks into the channel.
pub async fn handle_interaction(
    state: &AppState,
    limiter: &RateLimiter,
    ctx: Context,
    interaction: Interaction,
) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    let user_id = command.user.id.get();

    if !state.config.is_authorized(user_id) {
        warn!(
            "Unauthorized user {} ({}) tried /{}",
            command.user.name, user_id, command.data.name
        );
        deny(&ctx, &command, "You are not authorized to use this bot.").await;
        return;
    }

    if !limiter.is_allowed(user_id) {
        deny(&ctx, &command, "Too many commands. Wait a minute and try again.").await;
        return;
    }

    if let Err(e) = command.defer(&ctx.http).await {
        error!("Failed to defer /{}: {:?}", command.data.name, e);
        return;
    }

    let result = match command.data.name.as_str() {
        "add_item" => commands::add_item::run(state, &ctx, &command).await,
        "list_items" => commands::list_items::run(state, &ctx, &command).await,
        "check_expiring" => commands::check_expiring::run(state, &ctx, &command).await,
        "status" => commands::status::run(state, &ctx, &command).await,
        other => {
            warn!("Unknown command /{}", other);
            return;
        }
    };

    if let Err(e) = result {
        error!("Command /{} failed: {}", command.data.name, e);

        let embed = CreateEmbed::new()
            .title("❌ Command Failed")
            .description(e.to_string())
            .colour(Colour::new(0xff0000));
        let followup = CreateInteractionResponseFollowup::new()
            .embed(embed)
            .ephemeral(true);

        if let Err(e) = command.create_followup(&ctx.http, followup).await {
            error!("Failed to report command error: {:?}", e);
        }

        if should_notify(&e) {
            if let Err(e) = state
                .notifier
                .send_error(&e.to_string(), Some(&format!("/{}", command.data.name)))
                .await
            {
                warn!("Failed to send error notification: {:?}", e);
            }
        }
    }
}

/// Whether a command failure warrants an ops webhook notification.
///
/// Validation mistakes stay in the caller's ephemeral reply; only
/// operational failures reach the channel.
fn should_notify(err: &AppError) -> bool {
    !matches!(err, AppError::BadRequest(_))
}


/// Sends an immediate ephemeral denial for an unauthorized or throttled call.
async fn deny(ctx: &Context, command: &CommandInteraction, reason: &str) {
    let embed = CreateEmbed::new()
        .title("🚫 Access Denied")
        .description(reason)
        .colour(Colour::new(0xff0000));
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new().embed(embed).ephemeral(true),
    );

    if let Err(e) = command.create_response(&ctx.http, response).await {
        error!("Failed to send denial response: {:?}", e);
    }
}
