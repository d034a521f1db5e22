//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used for page retrieval.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Redirect following with reqwest's default policy
/// - No overall request timeout
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails
/// (for example, a User-Agent that is not a valid header value).
pub async fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
