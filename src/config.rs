use std::path::PathBuf;

use chrono_tz::Tz;

use crate::error::config::ConfigError;

/// Days an item stays valid after its creation date.
pub const ITEM_EXPIRY_DAYS: i64 = 30;

const DEFAULT_CREDENTIALS_PATH: &str = "./credentials/google_service_account.json";
const DEFAULT_WORKSHEET_NAME: &str = "Sheet1";
const DEFAULT_TIMEZONE: &str = "Asia/Jakarta";
const DEFAULT_DATABASE_URL: &str = "sqlite://data/clan_storage.db?mode=rwc";
const DEFAULT_HEALTH_ADDR: &str = "127.0.0.1:8080";

pub struct Config {
    pub discord_token: String,
    pub webhook_url: String,

    pub sheets_id: String,
    pub credentials_path: PathBuf,
    pub worksheet_name: String,

    pub authorized_users: Vec<u64>,

    pub timezone: Tz,
    pub notification_days_before: i64,

    pub database_url: String,
    pub health_addr: String,
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// Validation problems are collected and reported together in a single
    /// `ConfigError::Invalid` so operators see every missing or malformed
    /// variable at once.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut errors = Vec::new();

        let discord_token = require(&mut errors, "DISCORD_TOKEN");
        let webhook_url = require(&mut errors, "DISCORD_WEBHOOK_URL");
        let sheets_id = require(&mut errors, "GOOGLE_SHEETS_ID");

        let credentials_path = PathBuf::from(
            std::env::var("GOOGLE_CREDENTIALS_PATH")
                .unwrap_or_else(|_| DEFAULT_CREDENTIALS_PATH.to_string()),
        );
        let worksheet_name = std::env::var("WORKSHEET_NAME")
            .unwrap_or_else(|_| DEFAULT_WORKSHEET_NAME.to_string());

        let authorized_users = match std::env::var("AUTHORIZED_USERS") {
            Ok(raw) => match parse_authorized_users(&raw) {
                Ok(users) => users,
                Err(reason) => {
                    errors.push(format!("AUTHORIZED_USERS {}", reason));
                    Vec::new()
                }
            },
            Err(_) => {
                errors.push("AUTHORIZED_USERS must be set".to_string());
                Vec::new()
            }
        };

        let tz_name =
            std::env::var("TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string());
        let timezone = match tz_name.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                errors.push(format!("TIMEZONE '{}' is not a known timezone", tz_name));
                chrono_tz::UTC
            }
        };

        let notification_days_before = match std::env::var("NOTIFICATION_DAYS_BEFORE") {
            Ok(raw) => match raw.parse::<i64>() {
                Ok(days) if days > 0 => days,
                _ => {
                    errors.push(format!(
                        "NOTIFICATION_DAYS_BEFORE '{}' must be a positive integer",
                        raw
                    ));
                    7
                }
            },
            Err(_) => 7,
        };

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let health_addr =
            std::env::var("HEALTH_ADDR").unwrap_or_else(|_| DEFAULT_HEALTH_ADDR.to_string());

        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors.join(", ")));
        }

        Ok(Self {
            discord_token,
            webhook_url,
            sheets_id,
            credentials_path,
            worksheet_name,
            authorized_users,
            timezone,
            notification_days_before,
            database_url,
            health_addr,
        })
    }

    /// Whether the given Discord user may run bot commands.
    pub fn is_authorized(&self, user_id: u64) -> bool {
        self.authorized_users.contains(&user_id)
    }
}

fn require(errors: &mut Vec<String>, var: &str) -> String {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            errors.push(format!("{} is required", var));
            String::new()
        }
    }
}

/// Parses the comma-separated numeric user ID list.
///
/// Empty segments are skipped; non-numeric segments are an error. At least
/// one ID must remain.
fn parse_authorized_users(raw: &str) -> Result<Vec<u64>, String> {
    let mut users = Vec::new();

    for segment in raw.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match segment.parse::<u64>() {
            Ok(id) => users.push(id),
            Err(_) => return Err(format!("contains non-numeric user ID '{}'", segment)),
        }
    }

    if users.is_empty() {
        return Err("must contain at least one user ID".to_string());
    }

    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_id_list() {
        let users = parse_authorized_users("123456789, 987654321").unwrap();
        assert_eq!(users, vec![123456789, 987654321]);
    }

    #[test]
    fn skips_empty_segments() {
        let users = parse_authorized_users("123,,456,").unwrap();
        assert_eq!(users, vec![123, 456]);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(parse_authorized_users("123,abc").is_err());
    }

    #[test]
    fn rejects_empty_list() {
        assert!(parse_authorized_users("").is_err());
        assert!(parse_authorized_users(" , ").is_err());
    }
}
