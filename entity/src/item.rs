use sea_orm::entity::prelude::*;

/// A tracked clan storage item.
///
/// `sheet_no` is the row number in the backing spreadsheet; it stays `None`
/// until the row has been written remotely. `synced` marks whether the local
/// row matches the spreadsheet.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sheet_no: Option<i32>,
    pub name: String,
    pub item_type: String,
    pub participants: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub expires_at: DateTimeUtc,
    pub synced: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
