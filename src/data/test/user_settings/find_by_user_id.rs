use super::*;

/// Tests loading user settings with their crosspost groups.
///
/// Expected: Ok(Some) with the group and its children in insertion order
#[tokio::test]
async fn loads_settings_with_groups() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, group) =
        factory::helpers::create_user_with_group(db, "100", &["203", "201", "202"]).await?;

    let repo = UserSettingsRepository::new(db);
    let settings = repo.find_by_user_id(100).await?.unwrap();

    assert_eq!(settings.user_id, 100);
    assert!(settings.crosspost);
    assert_eq!(settings.groups.len(), 1);
    assert_eq!(settings.groups[0].id, group.id);
    assert_eq!(settings.groups[0].children, vec![203, 201, 202]);

    Ok(())
}

/// Tests that preferences are read from the stored row.
///
/// Expected: Ok(Some) with crosspost and dm disabled and no groups
#[tokio::test]
async fn reads_preferences() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    UserSettingsFactory::new(db)
        .user_id("100")
        .crosspost(false)
        .dm(false)
        .build()
        .await?;

    let repo = UserSettingsRepository::new(db);
    let settings = repo.find_by_user_id(100).await?.unwrap();

    assert!(!settings.crosspost);
    assert!(!settings.dm);
    assert!(settings.groups.is_empty());

    Ok(())
}

/// Tests lookup of a user without settings.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserSettingsRepository::new(db);

    assert!(repo.find_by_user_id(100).await?.is_none());

    Ok(())
}
