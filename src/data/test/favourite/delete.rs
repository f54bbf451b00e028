use super::*;

/// Tests deleting an existing favourite.
///
/// Expected: Ok(true) and the row is gone
#[tokio::test]
async fn deletes_favourite() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = FavouriteRepository::new(db);
    repo.create(100, &record(ProviderKind::Pixiv, "1")).await?;

    assert!(repo.delete(100, ProviderKind::Pixiv, "1").await?);
    assert!(repo.find(100, ProviderKind::Pixiv, "1").await?.is_none());

    Ok(())
}

/// Tests deleting another user's favourite has no effect.
///
/// Expected: Ok(false) and the row remains
#[tokio::test]
async fn ignores_other_users() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = FavouriteRepository::new(db);
    repo.create(100, &record(ProviderKind::Pixiv, "1")).await?;

    assert!(!repo.delete(200, ProviderKind::Pixiv, "1").await?);
    assert_eq!(entity::prelude::Favourite::find().count(db).await?, 1);

    Ok(())
}
