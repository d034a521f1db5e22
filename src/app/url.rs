//! Target resolution.
//!
//! Turns a raw, user-supplied site reference into an absolute URL, retrying
//! with an `https://` prefix when the string is not a URL on its own.

use std::fmt;

use url::Url;

use crate::config::FALLBACK_SCHEME_PREFIX;
use crate::error_handling::FetchError;

/// An absolute URL that is guaranteed to carry a host.
///
/// Only constructed through [`resolve_target`] or `TryFrom<Url>`, so the
/// host invariant holds for every value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl(Url);

impl ResolvedUrl {
    /// Host component exactly as the URL parser produced it.
    pub fn host(&self) -> &str {
        // Non-empty host is checked on construction
        self.0.host_str().unwrap_or_default()
    }

    /// Underlying parsed URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Serialized URL.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<Url> for ResolvedUrl {
    type Error = Url;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(ResolvedUrl(url)),
            _ => Err(url),
        }
    }
}

impl fmt::Display for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Resolves a raw target into a [`ResolvedUrl`].
///
/// 1. Parse `raw` as an absolute URL.
/// 2. Only if that parse fails, parse `https://` + `raw`.
/// 3. Otherwise fail with [`FetchError::InvalidTarget`] carrying `raw`.
///
/// A string that parses as an absolute URL is never rewritten. If it has no
/// host (`mailto:someone@example.com`, or `localhost:8080`, which the URL
/// grammar reads as scheme `localhost`) there is nothing to fetch, and the
/// target is invalid.
///
/// # Errors
///
/// Returns `FetchError::InvalidTarget` when `raw` is a hostless URL or when
/// neither form parses.
pub fn resolve_target(raw: &str) -> Result<ResolvedUrl, FetchError> {
    let invalid = || FetchError::InvalidTarget {
        raw: raw.to_string(),
    };

    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => {
            let prefixed = format!("{FALLBACK_SCHEME_PREFIX}{raw}");
            let url = Url::parse(&prefixed).map_err(|_| invalid())?;
            log::debug!("Expanded {raw} to {url}");
            url
        }
    };

    ResolvedUrl::try_from(url).map_err(|_| invalid())
}
