//! `reqwest`-backed retrieval.

use std::sync::Arc;

use futures::TryStreamExt;

use super::{error_chain_message, FetchedPage, Retriever};
use crate::app::ResolvedUrl;
use crate::error_handling::FetchError;

/// Retrieves pages with a shared `reqwest::Client`.
///
/// Redirects follow the client's policy. No timeout is applied beyond the
/// client's own defaults.
#[derive(Clone)]
pub struct HttpRetriever {
    client: Arc<reqwest::Client>,
}

impl HttpRetriever {
    /// Wraps an already configured client.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

impl Retriever for HttpRetriever {
    async fn retrieve(&self, url: &ResolvedUrl) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.as_url().clone())
            .send()
            .await
            .map_err(|e| FetchError::Retrieval {
                url: url.to_string(),
                message: error_chain_message(&e),
            })?;

        let final_url =
            ResolvedUrl::try_from(response.url().clone()).unwrap_or_else(|_| url.clone());
        let status = response.status();
        let headers = response.headers().clone();
        let body = Box::pin(response.bytes_stream().map_err(std::io::Error::other));

        Ok(FetchedPage {
            url: final_url,
            status,
            headers,
            body,
        })
    }
}
