//! Service-account authentication for the Sheets API.
//!
//! Implements the two-legged OAuth flow for Google service accounts: sign a
//! short-lived RS256 JWT with the key file's private key, exchange it at the
//! key's `token_uri` for a bearer token, and cache that token until shortly
//! before it expires.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::AppError;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Refresh the cached token this long before it actually expires.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Relevant fields of a Google service-account JSON key file.
#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    token_uri: String,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Provides cached bearer tokens for Sheets API requests.
///
/// The key file is re-read on every token refresh rather than at startup, so
/// a credential file dropped in after boot is picked up by the next
/// reconnection attempt.
pub struct TokenProvider {
    key_path: PathBuf,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(key_path: &Path, http: reqwest::Client) -> Self {
        Self {
            key_path: key_path.to_path_buf(),
            http,
            cached: Mutex::new(None),
        }
    }

    /// Returns a valid bearer token, refreshing when the cached one is
    /// missing or within the refresh margin of expiry.
    pub async fn token(&self) -> Result<String, AppError> {
        let mut cached = self.cached.lock().await;

        if let Some(ref entry) = *cached {
            if entry.expires_at - Utc::now() > Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) {
                return Ok(entry.token.clone());
            }
        }

        let fresh = self.fetch_token().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);

        Ok(token)
    }

    async fn fetch_token(&self) -> Result<CachedToken, AppError> {
        let key = self.load_key()?;
        let assertion = sign_assertion(&key, Utc::now())?;

        let response = self
            .http
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_GRANT_TYPE), ("assertion", &assertion)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SheetsErr(format!(
                "token exchange failed with status {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await?;

        Ok(CachedToken {
            token: token.access_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        })
    }

    fn load_key(&self) -> Result<ServiceAccountKey, AppError> {
        let raw = std::fs::read_to_string(&self.key_path)?;
        serde_json::from_str(&raw).map_err(|e| {
            AppError::SheetsErr(format!(
                "invalid service account key file {}: {}",
                self.key_path.display(),
                e
            ))
        })
    }
}

/// Signs the one-hour JWT assertion for the token exchange.
fn sign_assertion(key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String, AppError> {
    let claims = Claims {
        iss: &key.client_email,
        scope: SHEETS_SCOPE,
        aud: &key.token_uri,
        iat: now.timestamp(),
        exp: (now + Duration::hours(1)).timestamp(),
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    let jwt = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)?;

    Ok(jwt)
}
