//! Clan storage bot entry point.
//!
//! Wires the pieces together: configuration, the Sqlite mirror, the Google
//! Sheets client, the Discord bot, the background scheduler, and the health
//! endpoint. The bot and the HTTP server run as tokio tasks; main blocks on
//! ctrl-c and sends the shutdown notification on the way out.

mod bot;
mod config;
mod data;
mod error;
mod model;
mod notify;
mod router;
mod scheduler;
mod sheets;
mod startup;
mod state;
mod store;
mod util;

use std::sync::Arc;

use serenity::http::Http;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::notify::Notifier;
use crate::sheets::SheetsClient;
use crate::state::AppState;
use crate::store::ItemStore;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    startup::ensure_runtime_dirs()?;

    let file_appender = tracing_appender::rolling::never("logs", "clan_storage.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("clan_storage_bot=info,serenity=warn,tokio_cron_scheduler=warn")
        }))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    let config = Arc::new(Config::from_env()?);
    info!(
        "Configuration loaded: {} authorized user(s), timezone {}",
        config.authorized_users.len(),
        config.timezone
    );

    let db = startup::connect_to_database(&config).await?;
    info!("Database connected and migrations applied");

    let sheets = SheetsClient::new(
        config.sheets_id.clone(),
        config.worksheet_name.clone(),
        &config.credentials_path,
        config.timezone,
    );

    // Startup probe: verify (and if needed write) the header row. A failure
    // here boots the store in fallback mode; the reconcile sweep retries.
    let sheets_connected = match sheets.ensure_headers().await {
        Ok(()) => {
            info!("Google Sheets connection verified");
            true
        }
        Err(e) => {
            warn!("Google Sheets unavailable at startup, using local fallback: {}", e);
            false
        }
    };

    let webhook_http = Arc::new(Http::new(""));
    let notifier = Notifier::new(
        webhook_http,
        config.webhook_url.clone(),
        config.timezone,
        config.notification_days_before,
    );

    if let Err(e) = notifier.send_test().await {
        warn!("Webhook test failed, notifications may not arrive: {}", e);
    }

    let store = ItemStore::new(
        db,
        sheets,
        sheets_connected,
        config.notification_days_before,
    );

    let app_state = AppState::new(store, notifier.clone(), config.clone());

    let client = bot::init_bot(&config.discord_token, app_state.clone()).await?;
    tokio::spawn(async move {
        if let Err(e) = bot::start_bot(client).await {
            error!("Discord bot exited: {}", e);
        }
    });

    scheduler::start_scheduler(app_state.clone()).await?;

    let listener = tokio::net::TcpListener::bind(&config.health_addr).await?;
    info!("Health endpoint listening on {}", config.health_addr);
    let app = router::router().with_state(app_state);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server exited: {}", e);
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    if let Err(e) = notifier.send_shutdown().await {
        warn!("Failed to send shutdown notification: {}", e);
    }

    Ok(())
}
