//! Page retrieval.
//!
//! The orchestrator only sees the [`Retriever`] trait: give it a URL, get back
//! the response head and a streaming body. [`HttpRetriever`] is the `reqwest`
//! implementation used by the binary.

mod request;

use std::future::Future;

use bytes::Bytes;
use futures::stream::BoxStream;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::app::ResolvedUrl;
use crate::error_handling::FetchError;

pub use request::HttpRetriever;

/// Response body delivered incrementally.
pub type BodyStream = BoxStream<'static, Result<Bytes, std::io::Error>>;

/// A successful retrieval whose body has not been read yet.
pub struct FetchedPage {
    /// URL the response came from (after redirects)
    pub url: ResolvedUrl,
    /// Response status; non-2xx pages are still archived
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Unread response body
    pub body: BodyStream,
}

impl std::fmt::Debug for FetchedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchedPage")
            .field("url", &self.url)
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Capability to retrieve a page.
///
/// Transport failures come back as [`FetchError::Retrieval`]. A response with
/// a non-success status is still a successful retrieval.
pub trait Retriever {
    /// Sends the request and returns once the response head has arrived.
    fn retrieve(&self, url: &ResolvedUrl)
        -> impl Future<Output = Result<FetchedPage, FetchError>>;
}

/// Flattens an error and its sources into one line.
pub(crate) fn error_chain_message(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
