use super::*;

/// Tests storing a posted artwork.
///
/// Expected: Ok and the record can be read back unchanged
#[tokio::test]
async fn stores_posted_artwork() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostedArtwork)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PostedArtworkRepository::new(db);
    let record = posted(700);
    repo.create(&record).await?;

    let stored = repo.find_by_message_id(700).await?;
    assert_eq!(stored, Some(record));

    Ok(())
}

/// Tests that a message can only be tracked once.
///
/// Expected: Err(AppError::DbErr) on the second insert
#[tokio::test]
async fn rejects_duplicate_message() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostedArtwork)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PostedArtworkRepository::new(db);
    repo.create(&posted(700)).await?;

    let result = repo.create(&posted(700)).await;
    assert!(matches!(result, Err(AppError::DbErr(_))));

    Ok(())
}
