use super::*;

/// Tests that only expired records are purged.
///
/// Expected: Ok(1) and the live record remains
#[tokio::test]
async fn purges_only_expired_records() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RepostRepository::new(db);
    repo.upsert(&repost(10, "pixiv:1", Duration::seconds(-5)))
        .await?;
    repo.upsert(&repost(10, "pixiv:2", Duration::hours(1)))
        .await?;

    let purged = repo.delete_expired(Utc::now()).await?;

    assert_eq!(purged, 1);
    let count = entity::prelude::Repost::find().count(db).await?;
    assert_eq!(count, 1);
    assert!(repo.find(10, "pixiv:2", Utc::now()).await?.is_some());

    Ok(())
}
