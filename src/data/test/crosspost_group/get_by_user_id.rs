use super::*;

/// Tests that only the requested user's groups are returned.
///
/// Expected: Ok with the user's two groups in creation order
#[tokio::test]
async fn returns_only_users_groups() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    CrosspostGroupFactory::new(db, "100")
        .name("first")
        .parent_channel_id("10")
        .children(vec!["11".to_string()])
        .build()
        .await?;
    CrosspostGroupFactory::new(db, "100")
        .name("second")
        .parent_channel_id("20")
        .build()
        .await?;
    CrosspostGroupFactory::new(db, "200")
        .name("other")
        .build()
        .await?;

    let repo = CrosspostGroupRepository::new(db);
    let groups = repo.get_by_user_id(100).await?;

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "first");
    assert_eq!(groups[0].parent, 10);
    assert_eq!(groups[0].children, vec![11]);
    assert_eq!(groups[1].name, "second");
    assert!(groups[1].children.is_empty());

    Ok(())
}

/// Tests a user with no groups.
///
/// Expected: Ok with empty Vec
#[tokio::test]
async fn returns_empty_for_user_without_groups() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CrosspostGroupRepository::new(db);

    assert!(repo.get_by_user_id(100).await?.is_empty());

    Ok(())
}
