use tracing::{debug, info};

use crate::error::AppError;
use crate::state::AppState;

/// Runs the periodic reconciliation sweep.
///
/// Skips quietly when the store is connected and has nothing queued; a
/// failed pass is logged by the scheduler and retried on the next tick.
pub async fn process_reconcile(state: &AppState) -> Result<(), AppError> {
    if !state.store.needs_reconcile().await? {
        debug!("Reconcile sweep: nothing to do");
        return Ok(());
    }

    let report = state.store.reconcile().await?;
    info!(
        "Reconciled with Google Sheets: pushed {}, pulled {}",
        report.pushed, report.pulled
    );

    Ok(())
}
