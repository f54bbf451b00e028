use super::*;

/// Tests that writing the same key twice keeps one row with the latest values.
///
/// Expected: Ok with a single row pointing at the second message
#[tokio::test]
async fn last_write_wins() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RepostRepository::new(db);
    repo.upsert(&repost(10, "pixiv:1", Duration::hours(1)))
        .await?;

    let mut newer = repost(10, "pixiv:1", Duration::hours(2));
    newer.message_id = 600;
    repo.upsert(&newer).await?;

    let count = entity::prelude::Repost::find().count(db).await?;
    assert_eq!(count, 1);

    let stored = repo.find(10, "pixiv:1", Utc::now()).await?.unwrap();
    assert_eq!(stored.message_id, 600);

    Ok(())
}

/// Tests that an expired record is replaced by a fresh one.
///
/// Expected: Ok and the record is live again
#[tokio::test]
async fn revives_expired_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RepostRepository::new(db);
    repo.upsert(&repost(10, "pixiv:1", Duration::seconds(-5)))
        .await?;
    repo.upsert(&repost(10, "pixiv:1", Duration::hours(1)))
        .await?;

    assert!(repo.find(10, "pixiv:1", Utc::now()).await?.is_some());

    Ok(())
}

/// Tests that concurrent writers for one key never hit the unique index.
///
/// Expected: Ok for every write and a single row afterwards
#[tokio::test]
async fn concurrent_writes_keep_one_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let writes: Vec<Repost> = (0..8)
        .map(|message_id| Repost {
            message_id,
            ..repost(10, "pixiv:1", Duration::hours(1))
        })
        .collect();
    let repo = RepostRepository::new(db);
    let results = join_all(writes.iter().map(|repost| repo.upsert(repost))).await;

    for result in results {
        result?;
    }
    assert_eq!(entity::prelude::Repost::find().count(db).await?, 1);

    let stored = repo.find(10, "pixiv:1", Utc::now()).await?.unwrap();
    assert!(stored.message_id < 8);

    Ok(())
}
