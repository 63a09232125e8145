use super::*;

/// Tests inserting a locally created item.
///
/// Verifies that the row lands with no sheet number and the synced flag
/// mirroring the caller's argument.
///
/// Expected: Ok with unsynced row created
#[tokio::test]
async fn creates_unsynced_local_item() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_store_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ItemRepository::new(db);
    let model = repo.create(&local_item("Ancient Relic"), false).await?;

    assert_eq!(model.name, "Ancient Relic");
    assert_eq!(model.item_type, "UNIQUE");
    assert_eq!(model.participants, "Alice, Bob");
    assert!(model.sheet_no.is_none());
    assert!(!model.synced);

    Ok(())
}

/// Tests that `get_all` returns items oldest first and converts entity
/// rows back to domain items.
///
/// Expected: Ok with items in creation order
#[tokio::test]
async fn lists_items_in_creation_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_store_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let older = Utc::now() - Duration::days(2);
    factory::item::ItemFactory::new(db)
        .name("Second")
        .build()
        .await?;
    factory::item::ItemFactory::new(db)
        .name("First")
        .created_at(older)
        .build()
        .await?;

    let repo = ItemRepository::new(db);
    let items = repo.get_all().await?;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "First");
    assert_eq!(items[1].name, "Second");

    Ok(())
}

/// Tests that rows with a hand-edited unknown type are skipped rather
/// than failing the whole listing.
///
/// Expected: Ok with only the valid row returned
#[tokio::test]
async fn skips_rows_with_unknown_type() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_store_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::item::ItemFactory::new(db)
        .name("Good")
        .build()
        .await?;
    factory::item::ItemFactory::new(db)
        .name("Bad")
        .item_type("LEGENDARY")
        .build()
        .await?;

    let repo = ItemRepository::new(db);
    let items = repo.get_all().await?;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Good");

    Ok(())
}

/// Tests item counting.
///
/// Expected: Ok with counts tracking inserts
#[tokio::test]
async fn counts_items() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_store_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ItemRepository::new(db);
    assert_eq!(repo.count().await?, 0);

    factory::item::create_item(db).await?;
    factory::item::create_item(db).await?;

    assert_eq!(repo.count().await?, 2);

    Ok(())
}
