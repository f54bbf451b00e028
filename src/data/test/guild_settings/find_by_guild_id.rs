use super::*;

/// Tests loading stored guild settings.
///
/// Verifies that stored columns are converted into the domain model, including the
/// repost mode and page limit.
///
/// Expected: Ok(Some) with matching values
#[tokio::test]
async fn returns_stored_settings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildSettingsFactory::new(db)
        .guild_id("100")
        .repost("strict")
        .page_limit(3)
        .nsfw(false)
        .twitter(false)
        .build()
        .await?;

    let repo = GuildSettingsRepository::new(db);
    let settings = repo.find_by_guild_id(100).await?.unwrap();

    assert_eq!(settings.guild_id, 100);
    assert_eq!(settings.repost, RepostMode::Strict);
    assert_eq!(settings.limit, 3);
    assert!(!settings.nsfw);
    assert!(!settings.providers.twitter);
    assert!(settings.providers.pixiv);
    assert!(settings.art_channels.is_empty());

    Ok(())
}

/// Tests that art channels are loaded with the guild.
///
/// Expected: Ok(Some) with both art channels present
#[tokio::test]
async fn loads_art_channels() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildSettingsFactory::new(db)
        .guild_id("100")
        .art_channel("200")
        .art_channel("201")
        .build()
        .await?;
    GuildSettingsFactory::new(db)
        .guild_id("101")
        .art_channel("300")
        .build()
        .await?;

    let repo = GuildSettingsRepository::new(db);
    let mut settings = repo.find_by_guild_id(100).await?.unwrap();
    settings.art_channels.sort();

    assert_eq!(settings.art_channels, vec![200, 201]);
    assert!(settings.allows_channel(200));
    assert!(!settings.allows_channel(300));

    Ok(())
}

/// Tests lookup of a guild without settings.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    let result = repo.find_by_guild_id(999).await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests that a corrupted repost mode surfaces as an internal error.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn fails_on_unknown_repost_mode() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GuildSettingsFactory::new(db)
        .guild_id("100")
        .repost("sometimes")
        .build()
        .await?;

    let repo = GuildSettingsRepository::new(db);
    let result = repo.find_by_guild_id(100).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
