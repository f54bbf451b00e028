use super::*;

/// Tests lookup of a message the bot never tracked.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_untracked_message() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostedArtwork)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PostedArtworkRepository::new(db);
    repo.create(&posted(700)).await?;

    assert!(repo.find_by_message_id(701).await?.is_none());

    Ok(())
}
