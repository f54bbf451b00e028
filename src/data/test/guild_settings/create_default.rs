use super::*;

/// Tests inserting defaults for a new guild.
///
/// Expected: Ok with default settings stored
#[tokio::test]
async fn inserts_defaults_for_new_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    let settings = repo.create_default(100).await?;

    assert_eq!(settings.guild_id, 100);
    assert_eq!(settings.repost, RepostMode::Enabled);
    assert_eq!(settings.limit, DEFAULT_PAGE_LIMIT);
    assert_eq!(settings.repost_expiration.num_hours(), 24);

    let stored = repo.find_by_guild_id(100).await?;
    assert_eq!(stored, Some(settings));

    Ok(())
}

/// Tests that existing settings are left untouched.
///
/// Expected: Ok with the stored settings and a single row
#[tokio::test]
async fn keeps_existing_settings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildSettingsFactory::new(db)
        .guild_id("100")
        .repost("disabled")
        .build()
        .await?;

    let repo = GuildSettingsRepository::new(db);
    let settings = repo.create_default(100).await?;

    assert_eq!(settings.repost, RepostMode::Disabled);

    let count = entity::prelude::GuildSettings::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that duplicate guild events for a new guild insert one row.
///
/// Expected: Ok for every call with the same settings and a single row
#[tokio::test]
async fn concurrent_bootstrap_keeps_one_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_migrations()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    let results = join_all((0..4).map(|_| repo.create_default(100))).await;

    for result in results {
        assert_eq!(result?.guild_id, 100);
    }
    let count = entity::prelude::GuildSettings::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}
