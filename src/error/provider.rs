use thiserror::Error;

use crate::model::artwork::ProviderKind;

/// Failure while resolving an artwork from an upstream site.
///
/// Providers classify every failure into one of these variants so callers can decide
/// what to tell the user. None of them are retried inside the provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The site reports the artwork does not exist (deleted, private or never existed).
    #[error("{kind} artwork {id} was not found")]
    NotFound {
        /// Provider that was queried
        kind: ProviderKind,
        /// Provider-native artwork id
        id: String,
    },

    /// The site is throttling requests.
    #[error("{kind} is rate limiting requests")]
    RateLimited {
        /// Provider that was queried
        kind: ProviderKind,
    },

    /// Network, server or decoding failure.
    #[error("{kind} request failed: {reason}")]
    Transient {
        /// Provider that was queried
        kind: ProviderKind,
        /// Description of the underlying failure
        reason: String,
    },
}
