//! Shared HTTP handling for providers.
//!
//! Every provider funnels its requests through `get_json` so upstream failures are
//! classified the same way everywhere.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::{error::provider::ProviderError, model::artwork::ProviderKind};

pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Maps an unsuccessful upstream status to a provider error.
///
/// # Arguments
/// - `kind` - Provider that made the request
/// - `id` - Artwork id that was requested
/// - `status` - Response status
///
/// # Returns
/// - `ProviderError::NotFound` - 400, 404 or 410
/// - `ProviderError::RateLimited` - 429
/// - `ProviderError::Transient` - Any other status
pub fn classify_status(kind: ProviderKind, id: &str, status: StatusCode) -> ProviderError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::GONE => {
            ProviderError::NotFound {
                kind,
                id: id.to_string(),
            }
        }
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited { kind },
        _ => ProviderError::Transient {
            kind,
            reason: format!("unexpected response: {}", status),
        },
    }
}

/// Sends a request and decodes a JSON body, classifying every failure.
///
/// # Arguments
/// - `kind` - Provider making the request
/// - `id` - Artwork id being resolved, used in NotFound errors
/// - `request` - Prepared request
///
/// # Returns
/// - `Ok(T)` - Decoded body of a successful response
/// - `Err(ProviderError)` - Classified failure
pub async fn get_json<T: DeserializeOwned>(
    kind: ProviderKind,
    id: &str,
    request: RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!("Failed to reach {}: {}", kind, e);
            ProviderError::Transient {
                kind,
                reason: if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    e.to_string()
                },
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!("{} returned {} for {}", kind, status, id);
        return Err(classify_status(kind, id, status));
    }

    response.json::<T>().await.map_err(|e| {
        tracing::warn!("Failed to decode {} response for {}: {}", kind, id, e);
        ProviderError::Transient {
            kind,
            reason: format!("failed to parse response: {}", e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_not_found() {
        for status in [StatusCode::BAD_REQUEST, StatusCode::NOT_FOUND, StatusCode::GONE] {
            assert!(matches!(
                classify_status(ProviderKind::Pixiv, "1", status),
                ProviderError::NotFound { .. }
            ));
        }
    }

    #[test]
    fn too_many_requests_is_rate_limited() {
        assert_eq!(
            classify_status(ProviderKind::Twitter, "1", StatusCode::TOO_MANY_REQUESTS),
            ProviderError::RateLimited {
                kind: ProviderKind::Twitter
            }
        );
    }

    #[test]
    fn server_errors_are_transient() {
        for status in [StatusCode::INTERNAL_SERVER_ERROR, StatusCode::FORBIDDEN] {
            assert!(matches!(
                classify_status(ProviderKind::Bluesky, "1", status),
                ProviderError::Transient { .. }
            ));
        }
    }
}
