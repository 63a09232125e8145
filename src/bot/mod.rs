//! Discord bot integration for the clan storage commands.
//!
//! The bot registers four global slash commands (`add_item`, `list_items`,
//! `check_expiring`, `status`) and answers them from the shared item store.
//! It is started from main in its own tokio task so the HTTP server and the
//! scheduler keep running independently; webhook notifications go through a
//! separate lightweight HTTP handle that needs no gateway connection.
//!
//! # Gateway Intents
//!
//! Only `GUILDS` is required: slash-command interactions arrive regardless,
//! and the bot never reads messages or member lists.

pub mod commands;
pub mod handler;
pub mod start;

pub use start::{init_bot, start_bot};
