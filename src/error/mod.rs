//! Application error types.
//!
//! `AppError` is the top-level error type aggregating everything that can go
//! wrong at runtime: configuration loading, database operations, Discord API
//! calls, Google Sheets requests, and scheduler setup. Most variants use
//! `#[from]` for automatic conversion so call sites can rely on `?`.

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Service-account JWT signing error.
    #[error(transparent)]
    JwtErr(#[from] jsonwebtoken::errors::Error),

    /// Filesystem error (credential key file, runtime directories).
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Google Sheets API returned a non-success response.
    #[error("Google Sheets API error: {0}")]
    SheetsErr(String),

    /// User-facing validation failure (invalid item type, bad date input).
    ///
    /// The message is safe to show in a command reply.
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
