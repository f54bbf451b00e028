use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Snowflakes are stored as strings in the database, so this indicates a corrupted
    /// row rather than bad user input.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Stored repost mode is not one of the known modes.
    #[error("Unknown repost mode '{0}'")]
    UnknownRepostMode(String),

    /// Stored provider name is not one of the known providers.
    #[error("Unknown provider '{0}'")]
    UnknownProvider(String),

    /// The fetch limiter was closed while a fetch was waiting on it.
    #[error("Fetch limiter closed")]
    FetchLimiterClosed,

    /// Failure to convert a Unix timestamp to a Discord timestamp.
    #[error("Failed to convert Unix timestamp {timestamp} to Discord timestamp: {reason}")]
    InvalidDiscordTimestamp {
        /// The Unix timestamp that failed to convert
        timestamp: i64,
        /// The reason for conversion failure
        reason: String,
    },
}
