//! Error types and user-facing error messages.
//!
//! This module provides the application's error hierarchy. `AppError` is the top-level
//! error type wrapping domain-specific errors. Where an HTTP backend maps errors to status
//! codes, the bot maps them to the short message shown in the channel that triggered the
//! failing operation (`AppError::user_message`).

pub mod config;
pub mod internal;
pub mod provider;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError, provider::ProviderError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot. Most variants use
/// `#[from]` for automatic error conversion so `?` can be used freely across layers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client error from reqwest outside of a provider call.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Artwork provider failure (not found, rate limited, transient).
    #[error(transparent)]
    ProviderErr(#[from] ProviderError),

    /// Internal issue indicating unexpected behavior or a bug.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// An operation did not finish before its deadline.
    ///
    /// # Fields
    /// - Name of the operation that timed out
    #[error("{0} timed out")]
    Timeout(String),

    /// Resource not found error.
    #[error("{0}")]
    NotFound(String),

    /// Invalid input error, e.g. a crosspost group violating its invariants.
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Message shown to the invoking channel when an operation fails.
    ///
    /// Not found and rate limit errors get their own wording since users can act on them.
    /// Everything else collapses into one generic message so internals never leak into
    /// chat.
    ///
    /// # Returns
    /// - `String` - Text suitable for a chat message
    pub fn user_message(&self) -> String {
        match self {
            Self::ProviderErr(ProviderError::NotFound { kind, .. }) => {
                format!("Couldn't find that {} artwork, it may have been deleted.", kind)
            }
            Self::ProviderErr(ProviderError::RateLimited { kind }) => format!(
                "{} is rate limiting requests right now, try again in a few minutes.",
                kind
            ),
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::Timeout(_) => "Fetching artworks took too long, try again later.".to_string(),
            _ => "Something went wrong while fetching artworks.".to_string(),
        }
    }

    /// Whether this error is expected during normal operation.
    ///
    /// Expected errors are logged at debug level by event handlers rather than as errors.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::ProviderErr(ProviderError::NotFound { .. })
                | Self::ProviderErr(ProviderError::RateLimited { .. })
                | Self::NotFound(_)
                | Self::BadRequest(_)
        )
    }
}
