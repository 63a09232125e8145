use std::sync::Arc;

use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::error::AppError;
use crate::model::{Item, ItemType};
use crate::sheets::auth::TokenProvider;
use crate::util::parse::{format_sheet_datetime, parse_sheet_datetime};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Header row of the item worksheet. Column order is part of the wire
/// format and must match `item_to_row` / `parse_row`.
pub const HEADER: [&str; 7] = [
    "No",
    "Item Name",
    "Type",
    "Participants",
    "CreatedAt",
    "UpdatedAt",
    "Expire",
];

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Client for the item worksheet of the backing spreadsheet.
///
/// Cheap to clone; all clones share the HTTP connection pool and the cached
/// access token.
#[derive(Clone)]
pub struct SheetsClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    auth: TokenProvider,
    spreadsheet_id: String,
    worksheet: String,
    tz: Tz,
}

impl SheetsClient {
    /// Creates a client for the configured spreadsheet.
    ///
    /// No network traffic happens here; the credential key file is read
    /// lazily on the first authenticated request.
    pub fn new(
        spreadsheet_id: String,
        worksheet: String,
        credentials_path: &std::path::Path,
        tz: Tz,
    ) -> Self {
        let http = reqwest::Client::new();
        let auth = TokenProvider::new(credentials_path, http.clone());

        Self {
            inner: Arc::new(Inner {
                http,
                auth,
                spreadsheet_id,
                worksheet,
                tz,
            }),
        }
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}/{}/values/{}{}",
            SHEETS_API_BASE, self.inner.spreadsheet_id, range, suffix
        )
    }

    /// Ensures row 1 carries the expected header, writing it when missing
    /// or different. Also serves as the startup connectivity probe.
    pub async fn ensure_headers(&self) -> Result<(), AppError> {
        let range = format!("{}!1:1", self.inner.worksheet);
        let existing = self.get_values(&range).await?;

        let current: Vec<String> = existing
            .first()
            .map(|row| row.iter().map(cell_to_string).collect())
            .unwrap_or_default();

        if current != HEADER {
            let url = self.values_url(
                &format!("{}!A1:G1", self.inner.worksheet),
                "?valueInputOption=RAW",
            );
            let token = self.inner.auth.token().await?;
            let response = self
                .inner
                .http
                .put(&url)
                .bearer_auth(token)
                .json(&json!({ "values": [HEADER] }))
                .send()
                .await?;
            check_status(response).await?;
        }

        Ok(())
    }

    /// Reads every item row from the worksheet.
    ///
    /// The header row and rows that fail to parse (non-numeric `No`, bad
    /// dates, unknown type) are skipped with a warning, matching how a
    /// hand-edited sheet is treated as best-effort data.
    pub async fn fetch_items(&self) -> Result<Vec<Item>, AppError> {
        let rows = self.fetch_rows().await?;
        let tz = self.inner.tz;

        Ok(rows
            .iter()
            .filter_map(|row| {
                let parsed = parse_row(row, tz);
                if parsed.is_none() && !row.is_empty() {
                    warn!("Skipping unparsable sheet row: {:?}", row);
                }
                parsed
            })
            .collect())
    }

    /// Next sequential row number: max existing `No` plus one, starting at 1.
    pub async fn next_number(&self) -> Result<u32, AppError> {
        let rows = self.fetch_rows().await?;
        Ok(next_number_from(&rows))
    }

    /// Appends one item as a new row.
    ///
    /// The item must already have its `sheet_no` assigned.
    pub async fn append_item(&self, item: &Item) -> Result<(), AppError> {
        let url = self.values_url(
            &format!("{}:append", self.inner.worksheet),
            "?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
        );
        let token = self.inner.auth.token().await?;
        let row = item_to_row(item, self.inner.tz);

        let response = self
            .inner
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        check_status(response).await?;

        Ok(())
    }

    /// All data rows (header stripped), as display strings.
    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>, AppError> {
        let values = self.get_values(&self.inner.worksheet).await?;

        Ok(values
            .into_iter()
            .skip(1) // header
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect())
    }

    async fn get_values(&self, range: &str) -> Result<Vec<Vec<serde_json::Value>>, AppError> {
        let url = self.values_url(range, "");
        let token = self.inner.auth.token().await?;

        let response = self.inner.http.get(&url).bearer_auth(token).send().await?;
        let response = check_status(response).await?;
        let body: ValueRange = response.json().await?;

        Ok(body.values)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::SheetsErr(format!(
        "request failed with status {}: {}",
        status, body
    )))
}

fn cell_to_string(cell: &serde_json::Value) -> String {
    match cell.as_str() {
        Some(s) => s.to_string(),
        None => cell.to_string(),
    }
}

/// Parses a worksheet row into an item. Returns `None` for rows that do
/// not carry a full, well-formed record.
fn parse_row(row: &[String], tz: Tz) -> Option<Item> {
    if row.len() < 7 {
        return None;
    }

    let no = row[0].trim().parse::<u32>().ok()?;
    let name = row[1].trim();
    if name.is_empty() {
        return None;
    }
    let item_type = row[2].parse::<ItemType>().ok()?;
    let participants = crate::util::parse::sanitize_participants(&row[3]);
    let created_at = parse_sheet_datetime(&row[4], tz)?;
    let updated_at = parse_sheet_datetime(&row[5], tz)?;
    let expires_at = parse_sheet_datetime(&row[6], tz)?;

    Some(Item {
        sheet_no: Some(no),
        name: name.to_string(),
        item_type,
        participants,
        created_at,
        updated_at,
        expires_at,
    })
}

/// Serializes an item to its worksheet row form.
fn item_to_row(item: &Item, tz: Tz) -> Vec<String> {
    vec![
        item.sheet_no.map(|no| no.to_string()).unwrap_or_default(),
        item.name.clone(),
        item.item_type.to_string(),
        item.participants_display(),
        format_sheet_datetime(item.created_at, tz),
        format_sheet_datetime(item.updated_at, tz),
        format_sheet_datetime(item.expires_at, tz),
    ]
}

/// Max numeric `No` across rows plus one; 1 for an empty sheet. Rows with
/// non-numeric first cells are ignored, like any other junk row.
fn next_number_from(rows: &[Vec<String>]) -> u32 {
    rows.iter()
        .filter_map(|row| row.first())
        .filter_map(|cell| cell.trim().parse::<u32>().ok())
        .max()
        .map(|max| max + 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::Asia::Jakarta;

    fn sample_row() -> Vec<String> {
        vec![
            "3".to_string(),
            "Ancient Relic".to_string(),
            "UNIQUE".to_string(),
            "Alice, Bob".to_string(),
            "2024-06-01 10:00:00".to_string(),
            "2024-06-01 10:00:00".to_string(),
            "2024-07-01 10:00:00".to_string(),
        ]
    }

    #[test]
    fn parses_well_formed_row() {
        let item = parse_row(&sample_row(), Jakarta).unwrap();

        assert_eq!(item.sheet_no, Some(3));
        assert_eq!(item.name, "Ancient Relic");
        assert_eq!(item.item_type, ItemType::Unique);
        assert_eq!(item.participants, vec!["Alice", "Bob"]);
        assert_eq!(
            item.expires_at,
            Jakarta
                .with_ymd_and_hms(2024, 7, 1, 10, 0, 0)
                .unwrap()
                .with_timezone(&Utc)
        );
    }

    #[test]
    fn skips_rows_with_bad_number_or_type() {
        let mut bad_no = sample_row();
        bad_no[0] = "total:".to_string();
        assert!(parse_row(&bad_no, Jakarta).is_none());

        let mut bad_type = sample_row();
        bad_type[2] = "LEGENDARY".to_string();
        assert!(parse_row(&bad_type, Jakarta).is_none());

        let mut bad_date = sample_row();
        bad_date[6] = "soon".to_string();
        assert!(parse_row(&bad_date, Jakarta).is_none());

        assert!(parse_row(&sample_row()[..5], Jakarta).is_none());
    }

    #[test]
    fn serializes_row_in_wire_format() {
        let item = parse_row(&sample_row(), Jakarta).unwrap();
        let row = item_to_row(&item, Jakarta);

        assert_eq!(row, sample_row());
    }

    #[test]
    fn next_number_skips_junk_rows() {
        let rows = vec![
            vec!["1".to_string(), "Item".to_string()],
            vec!["note to self".to_string()],
            vec!["5".to_string(), "Other".to_string()],
        ];
        assert_eq!(next_number_from(&rows), 6);
        assert_eq!(next_number_from(&[]), 1);
    }
}
