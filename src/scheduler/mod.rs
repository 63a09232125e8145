//! Background jobs: the daily expiry check and the reconciliation sweep.

use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::error::AppError;
use crate::state::AppState;

pub mod expiry;
pub mod sync;

/// Daily expiry check at 09:00 in the configured clan timezone.
const EXPIRY_SCHEDULE: &str = "0 0 9 * * *";

/// Reconciliation sweep every five minutes.
const SYNC_SCHEDULE: &str = "0 */5 * * * *";

/// Starts the background job scheduler.
///
/// # Arguments
/// - `state` - Shared application state the jobs run against
///
/// # Returns
/// - `Ok(())` if both jobs are scheduled and the scheduler is running
/// - `Err(AppError)` if scheduling fails
pub async fn start_scheduler(state: AppState) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let expiry_state = state.clone();
    let expiry_job = Job::new_async_tz(EXPIRY_SCHEDULE, state.config.timezone, move |_uuid, _lock| {
        let state = expiry_state.clone();

        Box::pin(async move {
            if let Err(e) = expiry::process_expiry_check(&state).await {
                error!("Error processing expiry check: {}", e);
            }
        })
    })?;

    let sync_state = state.clone();
    let sync_job = Job::new_async(SYNC_SCHEDULE, move |_uuid, _lock| {
        let state = sync_state.clone();

        Box::pin(async move {
            if let Err(e) = sync::process_reconcile(&state).await {
                error!("Error reconciling with Google Sheets: {}", e);
            }
        })
    })?;

    scheduler.add(expiry_job).await?;
    scheduler.add(sync_job).await?;
    scheduler.start().await?;

    info!(
        "Scheduler started: expiry check daily at 09:00 {}, reconcile sweep every 5 minutes",
        state.config.timezone
    );

    Ok(())
}
