use std::path::Path;

use crate::config::Config;
use crate::error::AppError;

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from
/// configuration, then runs all pending SeaORM migrations so the local
/// mirror schema is up-to-date before any item is written.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the runtime directories the bot writes into.
///
/// `data/` holds the Sqlite mirror, `logs/` the rolling log file, and
/// `credentials/` the Google service-account key. Existing directories are
/// left untouched.
pub fn ensure_runtime_dirs() -> Result<(), AppError> {
    for dir in ["data", "logs", "credentials"] {
        if !Path::new(dir).exists() {
            std::fs::create_dir_all(dir)?;
        }
    }

    Ok(())
}
