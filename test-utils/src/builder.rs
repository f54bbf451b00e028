use entity::prelude::*;
use migration::{Migrator, MigratorTrait};
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{GuildSettings, ArtChannel};
///
/// let test = TestBuilder::new()
///     .with_table(GuildSettings)
///     .with_table(ArtChannel)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
    /// Whether `build()` runs the real migrations instead of the entity tables.
    migrate: bool,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            migrate: false,
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after the tables they reference).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables backing guild settings.
    ///
    /// Adds `GuildSettings` followed by `ArtChannel`, which references it.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_guild_settings_tables(self) -> Self {
        self.with_table(GuildSettings).with_table(ArtChannel)
    }

    /// Adds the tables backing user settings and crosspost groups.
    ///
    /// Adds `UserSettings`, `CrosspostGroup` and `CrosspostGroupChannel` in dependency
    /// order.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_user_settings_tables(self) -> Self {
        self.with_table(UserSettings)
            .with_table(CrosspostGroup)
            .with_table(CrosspostGroupChannel)
    }

    /// Creates the schema by running every migration.
    ///
    /// Tables built from entities carry no secondary indexes. Tests relying on the unique
    /// keys declared in migrations use this instead of `with_table`.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_migrations(mut self) -> Self {
        self.migrate = true;
        self
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// Creates an in-memory SQLite database connection and executes all CREATE TABLE
    /// statements that were added via `with_table()`.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        if self.migrate {
            Migrator::up(setup.database().await?, None).await?;
        }
        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
