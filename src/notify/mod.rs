//! Outbound Discord webhook notifications.

mod webhook;

pub use webhook::Notifier;
