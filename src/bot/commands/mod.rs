//! Slash command definitions and handlers.
//!
//! Each submodule owns one command: its `register()` builds the command
//! definition sent to Discord, its `run()` answers a deferred interaction
//! with follow-up embeds.

use serenity::builder::CreateCommand;

pub mod add_item;
pub mod check_expiring;
pub mod list_items;
pub mod status;

/// All global slash commands, registered on ready.
pub fn all() -> Vec<CreateCommand> {
    vec![
        add_item::register(),
        list_items::register(),
        check_expiring::register(),
        status::register(),
    ]
}
