//! Configuration constants.
//!
//! Defaults and fixed strings shared by the fetch path and the file server.

/// Scheme prepended to targets that do not parse as absolute URLs.
pub const FALLBACK_SCHEME_PREFIX: &str = "https://";

/// Suffix of every archived page (`<hostname>.html`).
pub const ARCHIVE_EXTENSION: &str = ".html";

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Port the file server binds when neither an explicit port nor an
/// environment override is available.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Interface the file server listens on (all of them).
pub const SERVER_BIND_ADDR: &str = "0.0.0.0";

/// Environment variables consulted for the server port, in precedence order.
pub const PORT_ENV_VARS: [&str; 3] = ["SITE_ARCHIVER_PORT", "PORT", "HTTP_PORT"];

/// Body returned for any request that does not match an archived page.
pub const NOT_FOUND_BODY: &str = "404! The file has not been fetched";

/// Timestamp layout for the `last_fetch` line of the metadata summary.
pub const LAST_FETCH_FORMAT: &str = "%a %b %d %Y %H:%M:%S %:z";
