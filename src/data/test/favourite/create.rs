use super::*;

/// Tests creating a favourite.
///
/// Expected: Ok with created flag set and the record stored
#[tokio::test]
async fn creates_favourite() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = FavouriteRepository::new(db);
    let (favourite, created) = repo.create(100, &record(ProviderKind::Pixiv, "1")).await?;

    assert!(created);
    assert_eq!(favourite.user_id, 100);
    assert_eq!(favourite.record.kind, ProviderKind::Pixiv);
    assert_eq!(favourite.record.title.as_deref(), Some("Title"));

    Ok(())
}

/// Tests that favouriting the same artwork twice keeps one row.
///
/// Expected: Ok with created flag unset on the second call
#[tokio::test]
async fn does_not_duplicate_favourite() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = FavouriteRepository::new(db);
    let (first, _) = repo.create(100, &record(ProviderKind::Pixiv, "1")).await?;
    let (second, created) = repo.create(100, &record(ProviderKind::Pixiv, "1")).await?;

    assert!(!created);
    assert_eq!(first.id, second.id);
    assert_eq!(entity::prelude::Favourite::find().count(db).await?, 1);

    Ok(())
}

/// Tests that identical ids from different providers are separate favourites.
///
/// Expected: Ok with two rows
#[tokio::test]
async fn distinguishes_providers() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = FavouriteRepository::new(db);
    repo.create(100, &record(ProviderKind::Pixiv, "1")).await?;
    let (_, created) = repo.create(100, &record(ProviderKind::Nhentai, "1")).await?;

    assert!(created);
    assert_eq!(entity::prelude::Favourite::find().count(db).await?, 2);

    Ok(())
}

/// Tests that duplicate reaction events racing on one favourite keep the first row.
///
/// Expected: Ok for every call, exactly one reports creation, one row stored
#[tokio::test]
async fn concurrent_creates_keep_one_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = FavouriteRepository::new(db);
    let record = record(ProviderKind::Pixiv, "1");
    let results = join_all((0..4).map(|_| repo.create(100, &record))).await;

    let mut created = 0;
    for result in results {
        let (favourite, was_created) = result?;
        assert_eq!(favourite.record.artwork_id, "1");
        if was_created {
            created += 1;
        }
    }
    assert_eq!(created, 1);
    assert_eq!(entity::prelude::Favourite::find().count(db).await?, 1);

    Ok(())
}
