use std::{str::FromStr, time::Duration};

use crate::{
    error::{config::ConfigError, AppError},
    service::{
        post::{
            resolve::{DEFAULT_FETCH_CONCURRENCY, DEFAULT_RESOLVE_TIMEOUT},
            DEFAULT_NOTICE_TTL,
        },
        repost::RepostBackend,
    },
};

const DEFAULT_PIXIV_IMAGE_PROXY: &str = "i.pixiv.re";
const DEFAULT_PROVIDER_CACHE_SECS: u64 = 300;
const DEFAULT_SETTINGS_CACHE_CAPACITY: u64 = 1000;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    pub repost_backend: RepostBackend,
    pub fetch_concurrency: usize,
    pub resolve_timeout: Duration,
    pub repost_notice_ttl: Duration,
    pub pixiv_image_proxy: String,
    pub provider_cache_ttl: Duration,
    pub settings_cache_capacity: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            repost_backend: optional("REPOST_BACKEND", RepostBackend::Memory)?,
            fetch_concurrency: optional("FETCH_CONCURRENCY", DEFAULT_FETCH_CONCURRENCY)?,
            resolve_timeout: Duration::from_secs(optional(
                "RESOLVE_TIMEOUT_SECS",
                DEFAULT_RESOLVE_TIMEOUT.as_secs(),
            )?),
            repost_notice_ttl: Duration::from_secs(optional(
                "REPOST_NOTICE_SECS",
                DEFAULT_NOTICE_TTL.as_secs(),
            )?),
            pixiv_image_proxy: optional(
                "PIXIV_IMAGE_PROXY",
                DEFAULT_PIXIV_IMAGE_PROXY.to_string(),
            )?,
            provider_cache_ttl: Duration::from_secs(optional(
                "PROVIDER_CACHE_SECS",
                DEFAULT_PROVIDER_CACHE_SECS,
            )?),
            settings_cache_capacity: optional(
                "SETTINGS_CACHE_CAPACITY",
                DEFAULT_SETTINGS_CACHE_CAPACITY,
            )?,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => parse_value(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
    })
}
