use super::*;

/// Tests fetching rows pending a push to the spreadsheet.
///
/// Expected: Ok with only unsynced rows, oldest first
#[tokio::test]
async fn lists_unsynced_rows_oldest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_store_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::item::ItemFactory::new(db)
        .name("Synced")
        .synced(true, Some(1))
        .build()
        .await?;
    factory::item::ItemFactory::new(db)
        .name("Pending B")
        .build()
        .await?;
    factory::item::ItemFactory::new(db)
        .name("Pending A")
        .created_at(Utc::now() - Duration::days(1))
        .build()
        .await?;

    let repo = ItemRepository::new(db);
    let unsynced = repo.get_unsynced().await?;

    assert_eq!(unsynced.len(), 2);
    assert_eq!(unsynced[0].name, "Pending A");
    assert_eq!(unsynced[1].name, "Pending B");

    Ok(())
}

/// Tests marking a pushed row as synced.
///
/// Expected: Ok with sheet_no assigned and synced set
#[tokio::test]
async fn marks_row_synced_with_sheet_number() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_store_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let row = factory::item::create_item(db).await?;

    let repo = ItemRepository::new(db);
    repo.mark_synced(row.id, 12).await?;

    let updated = entity::prelude::Item::find_by_id(row.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(updated.sheet_no, Some(12));
    assert!(updated.synced);
    assert_eq!(repo.count_unsynced().await?, 0);

    Ok(())
}

/// Tests marking a missing row.
///
/// Expected: Err(RecordNotFound)
#[tokio::test]
async fn mark_synced_fails_for_missing_row() {
    let test = TestBuilder::new().with_store_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ItemRepository::new(db);
    let result = repo.mark_synced(999, 1).await;

    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));
}

/// Tests upserting a remote row that does not exist locally.
///
/// Expected: Ok(true) with a new synced row inserted
#[tokio::test]
async fn upsert_inserts_new_remote_row() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_store_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ItemRepository::new(db);
    let inserted = repo.upsert_remote(&remote_item(4, "Ancient Relic")).await?;

    assert!(inserted);
    let row = entity::prelude::Item::find()
        .one(db)
        .await?
        .unwrap();
    assert_eq!(row.sheet_no, Some(4));
    assert_eq!(row.name, "Ancient Relic");
    assert!(row.synced);

    Ok(())
}

/// Tests upserting a remote row already mirrored locally.
///
/// Verifies the existing row is updated in place with the remote field
/// values instead of a duplicate being created.
///
/// Expected: Ok(false) with the row updated
#[tokio::test]
async fn upsert_updates_existing_remote_row() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_store_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::item::ItemFactory::new(db)
        .name("Old Name")
        .synced(true, Some(4))
        .build()
        .await?;

    let repo = ItemRepository::new(db);
    let mut remote = remote_item(4, "New Name");
    remote.item_type = ItemType::Red;
    let inserted = repo.upsert_remote(&remote).await?;

    assert!(!inserted);
    assert_eq!(repo.count().await?, 1);

    let row = entity::prelude::Item::find()
        .one(db)
        .await?
        .unwrap();
    assert_eq!(row.name, "New Name");
    assert_eq!(row.item_type, "RED");

    Ok(())
}

/// Tests upserting a remote item without a sheet number.
///
/// Expected: Err(Custom) since the sheet number is the row identity
#[tokio::test]
async fn upsert_rejects_item_without_sheet_number() {
    let test = TestBuilder::new().with_store_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ItemRepository::new(db);
    let result = repo.upsert_remote(&local_item("No Number")).await;

    assert!(result.is_err());
}
