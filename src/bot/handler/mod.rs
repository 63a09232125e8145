use serenity::all::{Context, EventHandler, Interaction, Ready};
use serenity::async_trait;

use crate::state::AppState;
use crate::util::throttle::RateLimiter;

pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub state: AppState,
    pub limiter: RateLimiter,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            limiter: RateLimiter::default(),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.state, ctx, ready).await;
    }

    /// Called for every incoming interaction; only slash commands are handled
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.state, &self.limiter, ctx, interaction).await;
    }
}
