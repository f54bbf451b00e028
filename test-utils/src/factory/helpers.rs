//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates user settings together with one crosspost group.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Discord user ID owning the group
/// - `children` - Child channel IDs, inserted in order
///
/// # Returns
/// - `Ok((user_settings, group))` - Tuple of the created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_user_with_group(
    db: &DatabaseConnection,
    user_id: &str,
    children: &[&str],
) -> Result<
    (
        entity::user_settings::Model,
        entity::crosspost_group::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user_settings::UserSettingsFactory::new(db)
        .user_id(user_id)
        .build()
        .await?;
    let group = crate::factory::crosspost_group::CrosspostGroupFactory::new(db, user_id)
        .children(children.iter().map(|c| c.to_string()).collect())
        .build()
        .await?;

    Ok((user, group))
}
