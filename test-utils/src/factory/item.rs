//! Item factory for creating test item entities.
//!
//! Provides factory methods for inserting item rows with sensible defaults,
//! reducing boilerplate in tests. The factory supports customization through
//! a builder pattern.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test items with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::item::ItemFactory;
///
/// let item = ItemFactory::new(&db)
///     .name("Ancient Relic")
///     .item_type("RED")
///     .synced(true, Some(3))
///     .build()
///     .await?;
/// ```
pub struct ItemFactory<'a> {
    db: &'a DatabaseConnection,
    sheet_no: Option<i32>,
    name: String,
    item_type: String,
    participants: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    synced: bool,
}

impl<'a> ItemFactory<'a> {
    /// Creates a new ItemFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Item {id}"` where id is auto-incremented
    /// - item_type: `"UNIQUE"`
    /// - participants: `"Player1, Player2"`
    /// - created_at: now, expires_at: 30 days from now
    /// - synced: `false`, sheet_no: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        let now = Utc::now();
        Self {
            db,
            sheet_no: None,
            name: format!("Item {}", id),
            item_type: "UNIQUE".to_string(),
            participants: "Player1, Player2".to_string(),
            created_at: now,
            expires_at: now + Duration::days(30),
            synced: false,
        }
    }

    /// Sets the item name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the item type (stored as its uppercase wire form).
    pub fn item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = item_type.into();
        self
    }

    /// Sets the comma-joined participant list.
    pub fn participants(mut self, participants: impl Into<String>) -> Self {
        self.participants = participants.into();
        self
    }

    /// Sets the creation timestamp. `expires_at` is not adjusted; use
    /// `expires_at()` when the test cares about the expiry window.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the expiry timestamp.
    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Sets the sync state and spreadsheet row number together, since a
    /// synced row always carries one.
    pub fn synced(mut self, synced: bool, sheet_no: Option<i32>) -> Self {
        self.synced = synced;
        self.sheet_no = sheet_no;
        self
    }

    /// Builds and inserts the item entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::item::Model)` - Created item entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::item::Model, DbErr> {
        entity::item::ActiveModel {
            id: ActiveValue::NotSet,
            sheet_no: ActiveValue::Set(self.sheet_no),
            name: ActiveValue::Set(self.name),
            item_type: ActiveValue::Set(self.item_type),
            participants: ActiveValue::Set(self.participants),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            expires_at: ActiveValue::Set(self.expires_at),
            synced: ActiveValue::Set(self.synced),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an item with default values.
///
/// Shorthand for `ItemFactory::new(db).build().await`.
pub async fn create_item(db: &DatabaseConnection) -> Result<entity::item::Model, DbErr> {
    ItemFactory::new(db).build().await
}
