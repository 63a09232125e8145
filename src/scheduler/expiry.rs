use chrono::Utc;
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Runs the daily expiry check and sends the webhook alert when any items
/// fall inside the notification window.
pub async fn process_expiry_check(state: &AppState) -> Result<(), AppError> {
    let now = Utc::now();
    let items = state.store.expiring_items(now).await?;

    if items.is_empty() {
        info!("Expiry check: nothing expiring within the notification window");
        return Ok(());
    }

    info!("Expiry check: {} item(s) in the notification window", items.len());

    if let Err(e) = state.notifier.send_expiring_alert(&items, now).await {
        warn!("Failed to send expiry alert: {:?}", e);
        return Err(e);
    }

    Ok(())
}
