//! HTTP server for archived pages.
//!
//! Serves `<hostname>.html` files from the archive directory by name. It reads
//! whatever is on disk at request time and does not coordinate with fetch
//! runs, so a page being rewritten may be served partially.

mod handlers;
mod port;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::SERVER_BIND_ADDR;
use crate::error_handling::ServerError;
use crate::storage::ArchiveStore;

use handlers::archived_page_handler;
pub use port::resolve_port;

/// A bound, not yet running, file server.
pub struct FileServer {
    listener: TcpListener,
    app: Router,
    local_addr: SocketAddr,
}

/// Binds the file server to `port` on all interfaces.
///
/// Port 0 asks the OS for a free port; see [`FileServer::local_addr`].
///
/// # Errors
///
/// Returns `ServerError::Bind` if the port cannot be bound.
pub async fn bind_file_server(port: u16, store: ArchiveStore) -> Result<FileServer, ServerError> {
    let app = Router::new()
        .fallback(archived_page_handler)
        .with_state(Arc::new(store));

    let bind_error = |source| ServerError::Bind { port, source };
    let listener = TcpListener::bind((SERVER_BIND_ADDR, port))
        .await
        .map_err(bind_error)?;
    let local_addr = listener.local_addr().map_err(bind_error)?;

    Ok(FileServer {
        listener,
        app,
        local_addr,
    })
}

impl FileServer {
    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serves requests until the process exits.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Serve` if the accept loop fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        log::info!(
            "Started server on http://localhost:{}",
            self.local_addr.port()
        );
        axum::serve(self.listener, self.app)
            .await
            .map_err(ServerError::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_reports_port_in_use() {
        let taken = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        match bind_file_server(port, ArchiveStore::new(".")).await {
            Err(ServerError::Bind { port: reported, .. }) => assert_eq!(reported, port),
            Ok(_) => panic!("binding an occupied port should fail"),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let server = bind_file_server(0, ArchiveStore::new("."))
            .await
            .expect("Failed to bind ephemeral port");
        assert_ne!(server.local_addr().port(), 0);
        assert!(server.local_addr().ip().is_unspecified());
    }
}
