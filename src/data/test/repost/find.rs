use super::*;

/// Tests that lookups before any write find nothing.
///
/// Expected: Ok(None) on repeated lookups
#[tokio::test]
async fn returns_none_before_create() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RepostRepository::new(db);

    assert!(repo.find(10, "pixiv:1", Utc::now()).await?.is_none());
    assert!(repo.find(10, "pixiv:1", Utc::now()).await?.is_none());

    Ok(())
}

/// Tests that a stored record is returned for the same channel only.
///
/// Expected: Ok(Some) in the original channel, Ok(None) elsewhere
#[tokio::test]
async fn finds_record_in_same_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RepostRepository::new(db);
    let record = repost(10, "pixiv:1", Duration::hours(1));
    repo.upsert(&record).await?;

    let first = repo.find(10, "pixiv:1", Utc::now()).await?;
    let second = repo.find(10, "pixiv:1", Utc::now()).await?;

    assert_eq!(first.as_ref().map(|r| r.message_id), Some(500));
    assert_eq!(first, second);
    assert!(repo.find(11, "pixiv:1", Utc::now()).await?.is_none());
    assert!(repo.find(10, "twitter:1", Utc::now()).await?.is_none());

    Ok(())
}

/// Tests that expired records are ignored.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_expired_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RepostRepository::new(db);
    repo.upsert(&repost(10, "pixiv:1", Duration::seconds(-5)))
        .await?;

    assert!(repo.find(10, "pixiv:1", Utc::now()).await?.is_none());

    Ok(())
}
