use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::notify::Notifier;
use crate::store::ItemStore;

/// Shared application state handed to the bot, scheduler, and HTTP router.
#[derive(Clone)]
pub struct AppState {
    pub store: ItemStore,
    pub notifier: Notifier,
    pub config: Arc<Config>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: ItemStore, notifier: Notifier, config: Arc<Config>) -> Self {
        Self {
            store,
            notifier,
            config,
            started_at: Utc::now(),
        }
    }
}
