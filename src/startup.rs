use sea_orm::DatabaseConnection;
use std::{sync::Arc, time::Duration};
use tokio_cron_scheduler::JobScheduler;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    config::Config,
    error::AppError,
    provider::{http::USER_AGENT, ProviderOptions, ProviderRegistry},
    scheduler::{cleanup::MessageCleanupScheduler, repost_purge},
    service::{
        chat::ChatPlatform,
        favourite::FavouriteService,
        post::{
            crosspost::CrosspostService,
            resolve::{FailurePolicy, Resolver},
            PostService,
        },
        repost::{
            database::DatabaseRepostDetector, memory::MemoryRepostDetector, RepostBackend,
            RepostDetector,
        },
        settings::{GuildSettingsCache, SettingsService, SettingsSource},
    },
    state::BotState,
};

const DEFAULT_LOG_FILTER: &str = "info,artbot=debug";
const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

/// Initializes the tracing subscriber.
///
/// The filter is read from `RUST_LOG`, falling back to `info,artbot=debug`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client shared by every provider.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()?;

    Ok(client)
}

/// Creates the configured repost detector backend.
pub fn setup_repost_detector(config: &Config, db: &DatabaseConnection) -> Arc<dyn RepostDetector> {
    match config.repost_backend {
        RepostBackend::Memory => Arc::new(MemoryRepostDetector::new()),
        RepostBackend::Database => Arc::new(DatabaseRepostDetector::new(db.clone())),
    }
}

/// Wires the bot services together.
///
/// Adds the repost purge job to `scheduler`; the caller starts and shuts it down.
///
/// # Arguments
/// - `config` - Application configuration
/// - `db` - Migrated database connection
/// - `http_client` - HTTP client for providers
/// - `chat` - Chat platform adapter
/// - `scheduler` - Job scheduler owned by the caller
///
/// # Returns
/// - `Ok(BotState)` - Services ready to be handed to the event handler
/// - `Err(AppError::SchedulerErr)` - Purge job could not be added
pub async fn build_state(
    config: &Config,
    db: DatabaseConnection,
    http_client: reqwest::Client,
    chat: Arc<dyn ChatPlatform>,
    scheduler: &JobScheduler,
) -> Result<BotState, AppError> {
    let registry = ProviderRegistry::standard(
        http_client,
        &ProviderOptions {
            pixiv_proxy: config.pixiv_image_proxy.clone(),
            cache_ttl: config.provider_cache_ttl,
        },
    );

    let reposts = setup_repost_detector(config, &db);
    repost_purge::add_purge_job(scheduler, reposts.clone()).await?;

    let settings = Arc::new(SettingsService::new(
        db.clone(),
        GuildSettingsCache::new(config.settings_cache_capacity),
    ));
    let settings_source: Arc<dyn SettingsSource> = settings.clone();

    let resolver = Resolver::new(
        registry,
        reposts.clone(),
        config.fetch_concurrency,
        config.resolve_timeout,
    );
    let crosspost = CrosspostService::new(
        resolver.clone(),
        reposts,
        settings_source.clone(),
        chat.clone(),
        db.clone(),
        FailurePolicy::FailFast,
    );
    let cleanup = MessageCleanupScheduler::new(scheduler.clone(), chat.clone());

    let post = PostService::new(
        resolver,
        crosspost,
        settings_source.clone(),
        chat.clone(),
        cleanup,
        db.clone(),
        config.repost_notice_ttl,
    );
    let favourites = FavouriteService::new(db, settings_source, chat);

    Ok(BotState::new(post, favourites, settings))
}
