use super::*;

/// Tests removing a child channel keeps the remaining order.
///
/// Expected: Ok(true) and the other children unchanged
#[tokio::test]
async fn removes_child_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let group = CrosspostGroupFactory::new(db, "100")
        .children(vec!["11".to_string(), "12".to_string(), "13".to_string()])
        .build()
        .await?;

    let repo = CrosspostGroupRepository::new(db);
    let removed = repo.remove_channel(group.id, 12).await?;

    assert!(removed);
    let groups = repo.get_by_user_id(100).await?;
    assert_eq!(groups[0].children, vec![11, 13]);

    Ok(())
}

/// Tests removing a channel that is not in the group.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let group = CrosspostGroupFactory::new(db, "100")
        .children(vec!["11".to_string()])
        .build()
        .await?;

    let repo = CrosspostGroupRepository::new(db);

    assert!(!repo.remove_channel(group.id, 99).await?);

    Ok(())
}

/// Tests that removal is scoped to the given group.
///
/// Expected: Ok(true) and the same channel remains in the other group
#[tokio::test]
async fn only_affects_target_group() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = CrosspostGroupFactory::new(db, "100")
        .children(vec!["11".to_string()])
        .build()
        .await?;
    CrosspostGroupFactory::new(db, "100")
        .children(vec!["11".to_string()])
        .build()
        .await?;

    let repo = CrosspostGroupRepository::new(db);
    repo.remove_channel(first.id, 11).await?;

    let groups = repo.get_by_user_id(100).await?;
    assert!(groups[0].children.is_empty());
    assert_eq!(groups[1].children, vec![11]);

    Ok(())
}
