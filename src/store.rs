//! Item store facade: spreadsheet-primary with SQLite fallback.
//!
//! The spreadsheet is the primary backing store. Every accepted item is
//! written to the local mirror first so nothing is lost when the remote is
//! unreachable; reads prefer the spreadsheet and fail over to the mirror.
//! A reconciliation pass pushes locally queued rows and pulls the remote
//! state back into the mirror once connectivity returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::config::ITEM_EXPIRY_DAYS;
use crate::data::{item::to_domain, ItemRepository};
use crate::error::AppError;
use crate::model::{Item, NewItem};
use crate::sheets::SheetsClient;
use crate::util::parse::sanitize_participants;

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Locally queued rows appended to the spreadsheet.
    pub pushed: usize,
    /// Remote rows upserted into the local mirror.
    pub pulled: usize,
}

/// Clan item store combining the remote spreadsheet and the local mirror.
///
/// Cheap to clone; clones share the database pool, the sheets client, and
/// the connectivity flag.
#[derive(Clone)]
pub struct ItemStore {
    db: DatabaseConnection,
    sheets: SheetsClient,
    connected: Arc<AtomicBool>,
    notification_days: i64,
}

impl ItemStore {
    pub fn new(
        db: DatabaseConnection,
        sheets: SheetsClient,
        remote_connected: bool,
        notification_days: i64,
    ) -> Self {
        Self {
            db,
            sheets,
            connected: Arc::new(AtomicBool::new(remote_connected)),
            notification_days,
        }
    }

    /// Whether the spreadsheet was reachable at last contact.
    pub fn is_remote_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    fn mark_disconnected(&self, err: &AppError) {
        if self.connected.swap(false, Ordering::Relaxed) {
            warn!("Google Sheets unreachable, falling back to local mirror: {}", err);
        }
    }

    fn mark_connected(&self) {
        if !self.connected.swap(true, Ordering::Relaxed) {
            info!("Google Sheets connection restored");
        }
    }

    /// Adds a new item.
    ///
    /// The item is written to the local mirror first and then appended to
    /// the spreadsheet. A remote failure downgrades the store to fallback
    /// mode but the item is still accepted; the reconciliation sweep pushes
    /// it later.
    pub async fn add_item(&self, new: NewItem) -> Result<Item, AppError> {
        let created_at = new.created_at.unwrap_or_else(Utc::now);
        // Re-sanitize here so the invariant holds for every caller, not
        // just the command layer.
        let participants = sanitize_participants(&new.participants.join(", "));
        let mut item = Item {
            sheet_no: None,
            name: new.name,
            item_type: new.item_type,
            participants,
            created_at,
            updated_at: created_at,
            expires_at: created_at + Duration::days(ITEM_EXPIRY_DAYS),
        };

        let repo = ItemRepository::new(&self.db);
        let row = repo.create(&item, false).await?;

        if self.is_remote_connected() {
            match self.append_remote(&mut item).await {
                Ok(no) => repo.mark_synced(row.id, no).await?,
                Err(e) => self.mark_disconnected(&e),
            }
        }

        Ok(item)
    }

    async fn append_remote(&self, item: &mut Item) -> Result<u32, AppError> {
        let no = self.sheets.next_number().await?;
        item.sheet_no = Some(no);
        self.sheets.append_item(item).await?;
        Ok(no)
    }

    /// All items, oldest first.
    ///
    /// Reads the spreadsheet when connected, extended with any rows still
    /// queued locally; falls back to the mirror on remote failure.
    pub async fn all_items(&self) -> Result<Vec<Item>, AppError> {
        if self.is_remote_connected() {
            match self.sheets.fetch_items().await {
                Ok(mut items) => {
                    let pending = ItemRepository::new(&self.db).get_unsynced().await?;
                    items.extend(pending.iter().filter_map(to_domain));
                    return Ok(items);
                }
                Err(e) => self.mark_disconnected(&e),
            }
        }

        Ok(ItemRepository::new(&self.db).get_all().await?)
    }

    /// Items expiring within the notification window, including those
    /// already past their expiry date.
    pub async fn expiring_items(&self, now: DateTime<Utc>) -> Result<Vec<Item>, AppError> {
        let cutoff = now + Duration::days(self.notification_days);

        if self.is_remote_connected() {
            match self.sheets.fetch_items().await {
                Ok(items) => {
                    let mut expiring: Vec<Item> = items
                        .into_iter()
                        .filter(|item| item.expires_at <= cutoff)
                        .collect();
                    expiring.sort_by_key(|item| item.expires_at);
                    return Ok(expiring);
                }
                Err(e) => self.mark_disconnected(&e),
            }
        }

        Ok(ItemRepository::new(&self.db).get_expiring(cutoff).await?)
    }

    /// Total item count from the local mirror.
    ///
    /// The mirror tracks the spreadsheet through reconciliation, so this is
    /// served locally regardless of connectivity.
    pub async fn total_items(&self) -> Result<u64, AppError> {
        Ok(ItemRepository::new(&self.db).count().await?)
    }

    /// Whether a reconciliation pass would do any work.
    pub async fn needs_reconcile(&self) -> Result<bool, AppError> {
        if !self.is_remote_connected() {
            return Ok(true);
        }
        Ok(ItemRepository::new(&self.db).count_unsynced().await? > 0)
    }

    /// Reconciles the mirror with the spreadsheet.
    ///
    /// Pushes every locally queued row (assigning fresh sheet numbers in
    /// creation order), then pulls all remote rows back into the mirror so
    /// fallback reads stay current. Any remote error aborts the pass and
    /// leaves the store disconnected.
    pub async fn reconcile(&self) -> Result<ReconcileReport, AppError> {
        let repo = ItemRepository::new(&self.db);
        let mut report = ReconcileReport { pushed: 0, pulled: 0 };

        let pending = repo.get_unsynced().await?;
        let mut next_no = self.sheets.next_number().await?;

        for row in pending {
            let Some(mut item) = to_domain(&row) else {
                continue;
            };
            item.sheet_no = Some(next_no);
            self.sheets.append_item(&item).await?;
            repo.mark_synced(row.id, next_no).await?;
            next_no += 1;
            report.pushed += 1;
        }

        for item in self.sheets.fetch_items().await? {
            repo.upsert_remote(&item).await?;
            report.pulled += 1;
        }

        self.mark_connected();

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemType;
    use test_utils::builder::TestBuilder;

    fn offline_store(db: DatabaseConnection) -> ItemStore {
        let sheets = SheetsClient::new(
            "test-spreadsheet".to_string(),
            "Sheet1".to_string(),
            std::path::Path::new("/nonexistent/key.json"),
            chrono_tz::Asia::Jakarta,
        );
        ItemStore::new(db, sheets, false, 7)
    }

    fn new_item(name: &str) -> NewItem {
        NewItem {
            name: name.to_string(),
            item_type: ItemType::Unique,
            participants: vec!["Alice".to_string()],
            created_at: None,
        }
    }

    /// While disconnected the store must accept items, queue them
    /// unsynced, and never touch the network.
    #[tokio::test]
    async fn add_item_queues_locally_when_disconnected() {
        let test = TestBuilder::new().with_store_tables().build().await.unwrap();
        let db = test.db.clone().unwrap();
        let store = offline_store(db.clone());

        let item = store.add_item(new_item("Ancient Relic")).await.unwrap();

        assert!(item.sheet_no.is_none());
        assert_eq!(
            item.expires_at,
            item.created_at + Duration::days(ITEM_EXPIRY_DAYS)
        );

        let pending = ItemRepository::new(&db).get_unsynced().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "Ancient Relic");
        assert!(store.needs_reconcile().await.unwrap());
    }

    /// Backdated creation shifts the expiry window with it.
    #[tokio::test]
    async fn add_item_derives_expiry_from_backdated_creation() {
        let test = TestBuilder::new().with_store_tables().build().await.unwrap();
        let store = offline_store(test.db.clone().unwrap());

        let created = Utc::now() - Duration::days(28);
        let mut new = new_item("Old Relic");
        new.created_at = Some(created);

        let item = store.add_item(new).await.unwrap();

        assert_eq!(item.created_at, created);
        assert_eq!(item.expires_at, created + Duration::days(ITEM_EXPIRY_DAYS));
        assert_eq!(item.days_until_expiry(Utc::now()), 1);
    }

    /// Fallback reads come from the local mirror while disconnected.
    #[tokio::test]
    async fn reads_fall_back_to_local_mirror() {
        let test = TestBuilder::new().with_store_tables().build().await.unwrap();
        let store = offline_store(test.db.clone().unwrap());

        store.add_item(new_item("First")).await.unwrap();
        store.add_item(new_item("Second")).await.unwrap();

        let items = store.all_items().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "First");

        assert_eq!(store.total_items().await.unwrap(), 2);
    }

    /// The expiring window includes expired rows and excludes distant ones.
    #[tokio::test]
    async fn expiring_items_respects_window_offline() {
        let test = TestBuilder::new().with_store_tables().build().await.unwrap();
        let store = offline_store(test.db.clone().unwrap());

        let now = Utc::now();
        let mut expired = new_item("Expired");
        expired.created_at = Some(now - Duration::days(31));
        let mut soon = new_item("Soon");
        soon.created_at = Some(now - Duration::days(25));
        let fresh = new_item("Fresh");

        store.add_item(expired).await.unwrap();
        store.add_item(soon).await.unwrap();
        store.add_item(fresh).await.unwrap();

        let expiring = store.expiring_items(now).await.unwrap();
        let names: Vec<&str> = expiring.iter().map(|i| i.name.as_str()).collect();

        assert_eq!(names, vec!["Expired", "Soon"]);
    }
}
