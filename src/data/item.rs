use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use tracing::warn;

use crate::model::{Item, ItemType};
use crate::util::parse::sanitize_participants;

pub struct ItemRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ItemRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an item into the local mirror.
    ///
    /// # Arguments
    /// - `item`: Domain item to store
    /// - `synced`: Whether the row is already present in the spreadsheet
    ///
    /// # Returns
    /// - `Ok(Model)`: The created row
    /// - `Err(DbErr)`: Database error
    pub async fn create(
        &self,
        item: &Item,
        synced: bool,
    ) -> Result<entity::item::Model, DbErr> {
        entity::item::ActiveModel {
            id: ActiveValue::NotSet,
            sheet_no: ActiveValue::Set(item.sheet_no.map(|no| no as i32)),
            name: ActiveValue::Set(item.name.clone()),
            item_type: ActiveValue::Set(item.item_type.to_string()),
            participants: ActiveValue::Set(item.participants_display()),
            created_at: ActiveValue::Set(item.created_at),
            updated_at: ActiveValue::Set(item.updated_at),
            expires_at: ActiveValue::Set(item.expires_at),
            synced: ActiveValue::Set(synced),
        }
        .insert(self.db)
        .await
    }

    /// All items ordered by creation time (oldest first).
    pub async fn get_all(&self) -> Result<Vec<Item>, DbErr> {
        let rows = entity::prelude::Item::find()
            .order_by_asc(entity::item::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(to_domain_list(rows))
    }

    /// Items expiring on or before `cutoff`, soonest first. Includes rows
    /// that are already past their expiry date.
    pub async fn get_expiring(&self, cutoff: DateTime<Utc>) -> Result<Vec<Item>, DbErr> {
        let rows = entity::prelude::Item::find()
            .filter(entity::item::Column::ExpiresAt.lte(cutoff))
            .order_by_asc(entity::item::Column::ExpiresAt)
            .all(self.db)
            .await?;

        Ok(to_domain_list(rows))
    }

    /// Rows not yet written to the spreadsheet, oldest first so pushed
    /// rows keep their creation order.
    pub async fn get_unsynced(&self) -> Result<Vec<entity::item::Model>, DbErr> {
        entity::prelude::Item::find()
            .filter(entity::item::Column::Synced.eq(false))
            .order_by_asc(entity::item::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Marks a row as present in the spreadsheet under `sheet_no`.
    pub async fn mark_synced(&self, id: i32, sheet_no: u32) -> Result<(), DbErr> {
        let row = entity::prelude::Item::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("item {}", id)))?;

        let mut active: entity::item::ActiveModel = row.into();
        active.sheet_no = ActiveValue::Set(Some(sheet_no as i32));
        active.synced = ActiveValue::Set(true);
        active.update(self.db).await?;

        Ok(())
    }

    /// Upserts a remote row into the mirror, keyed by its sheet number.
    ///
    /// An existing row with the same `sheet_no` is overwritten with the
    /// remote field values; otherwise a new synced row is inserted.
    ///
    /// # Returns
    /// - `Ok(true)`: A new row was inserted
    /// - `Ok(false)`: An existing row was updated
    /// - `Err(DbErr)`: Database error
    pub async fn upsert_remote(&self, item: &Item) -> Result<bool, DbErr> {
        let sheet_no = item
            .sheet_no
            .ok_or_else(|| DbErr::Custom("remote item without sheet number".to_string()))?;

        let existing = entity::prelude::Item::find()
            .filter(entity::item::Column::SheetNo.eq(sheet_no as i32))
            .one(self.db)
            .await?;

        match existing {
            Some(row) => {
                let mut active: entity::item::ActiveModel = row.into();
                active.name = ActiveValue::Set(item.name.clone());
                active.item_type = ActiveValue::Set(item.item_type.to_string());
                active.participants = ActiveValue::Set(item.participants_display());
                active.created_at = ActiveValue::Set(item.created_at);
                active.updated_at = ActiveValue::Set(item.updated_at);
                active.expires_at = ActiveValue::Set(item.expires_at);
                active.synced = ActiveValue::Set(true);
                active.update(self.db).await?;
                Ok(false)
            }
            None => {
                self.create(item, true).await?;
                Ok(true)
            }
        }
    }

    /// Total number of mirrored items.
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Item::find().count(self.db).await
    }

    /// Number of rows still waiting to be pushed to the spreadsheet.
    pub async fn count_unsynced(&self) -> Result<u64, DbErr> {
        entity::prelude::Item::find()
            .filter(entity::item::Column::Synced.eq(false))
            .count(self.db)
            .await
    }
}

/// Converts an entity row to a domain item.
///
/// Returns `None` when the stored type string is not a known item type,
/// which only happens if the database was edited by hand.
pub fn to_domain(model: &entity::item::Model) -> Option<Item> {
    let item_type = match model.item_type.parse::<ItemType>() {
        Ok(item_type) => item_type,
        Err(()) => {
            warn!(
                "Item {} has unknown type '{}', skipping",
                model.id, model.item_type
            );
            return None;
        }
    };

    Some(Item {
        sheet_no: model.sheet_no.map(|no| no as u32),
        name: model.name.clone(),
        item_type,
        participants: sanitize_participants(&model.participants),
        created_at: model.created_at,
        updated_at: model.updated_at,
        expires_at: model.expires_at,
    })
}

fn to_domain_list(rows: Vec<entity::item::Model>) -> Vec<Item> {
    rows.iter().filter_map(to_domain).collect()
}
