use crate::data::ItemRepository;
use crate::model::{Item, ItemType};
use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod expiring;
mod sync;

/// Domain item fixture without a sheet number, as produced by `add_item`
/// while the spreadsheet is unreachable.
fn local_item(name: &str) -> Item {
    let now = Utc::now();
    Item {
        sheet_no: None,
        name: name.to_string(),
        item_type: ItemType::Unique,
        participants: vec!["Alice".to_string(), "Bob".to_string()],
        created_at: now,
        updated_at: now,
        expires_at: now + Duration::days(30),
    }
}

/// Domain item fixture carrying a sheet number, as parsed from a remote row.
fn remote_item(no: u32, name: &str) -> Item {
    Item {
        sheet_no: Some(no),
        ..local_item(name)
    }
}
