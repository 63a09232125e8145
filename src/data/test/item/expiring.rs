use super::*;

/// Tests the expiring-items query window.
///
/// Verifies that items expiring on or before the cutoff are returned,
/// including already-expired ones, while items outside the window are not.
///
/// Expected: Ok with expired and soon-expiring rows, soonest first
#[tokio::test]
async fn returns_items_within_window() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_store_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::item::ItemFactory::new(db)
        .name("Expired")
        .expires_at(now - Duration::days(1))
        .build()
        .await?;
    factory::item::ItemFactory::new(db)
        .name("Soon")
        .expires_at(now + Duration::days(3))
        .build()
        .await?;
    factory::item::ItemFactory::new(db)
        .name("Later")
        .expires_at(now + Duration::days(20))
        .build()
        .await?;

    let repo = ItemRepository::new(db);
    let expiring = repo.get_expiring(now + Duration::days(7)).await?;

    assert_eq!(expiring.len(), 2);
    assert_eq!(expiring[0].name, "Expired");
    assert_eq!(expiring[1].name, "Soon");

    Ok(())
}

/// Tests the empty case.
///
/// Expected: Ok with no items when nothing expires within the window
#[tokio::test]
async fn returns_empty_when_nothing_expires() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_store_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::item::ItemFactory::new(db)
        .name("Later")
        .expires_at(Utc::now() + Duration::days(20))
        .build()
        .await?;

    let repo = ItemRepository::new(db);
    let expiring = repo.get_expiring(Utc::now() + Duration::days(7)).await?;

    assert!(expiring.is_empty());

    Ok(())
}
