use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    sheets: bool,
    database: bool,
    uptime_seconds: i64,
    items: u64,
}

/// Liveness and degradation probe.
///
/// Always answers 200 so supervisors see the process is alive; `status`
/// drops to `degraded` when the spreadsheet is unreachable or the local
/// mirror fails to answer.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let sheets = state.store.is_remote_connected();

    let (database, items) = match state.store.total_items().await {
        Ok(count) => (true, count),
        Err(e) => {
            warn!("Health check: database query failed: {}", e);
            (false, 0)
        }
    };

    let status = if sheets && database { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        sheets,
        database,
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
        items,
    })
}
