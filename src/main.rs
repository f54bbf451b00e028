mod bot;
mod config;
mod data;
mod error;
mod model;
mod provider;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::JobScheduler;

use crate::{
    bot::discord::SerenityChat, config::Config, error::AppError, service::chat::ChatPlatform,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;

    let discord_http = Arc::new(Http::new(&config.discord_bot_token));
    let chat: Arc<dyn ChatPlatform> = Arc::new(SerenityChat::new(discord_http));

    let mut scheduler = JobScheduler::new().await?;
    let state = startup::build_state(&config, db, http_client, chat, &scheduler).await?;
    scheduler.start().await?;

    let client = bot::start::init_bot(&config, state).await?;
    let shard_manager = client.shard_manager.clone();

    // Start Discord bot in a separate task
    let bot_task = tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down");
            shard_manager.shutdown_all().await;
        }
        _ = bot_task => {
            tracing::warn!("Discord bot stopped");
        }
    }

    scheduler.shutdown().await?;

    Ok(())
}
