//! HTTP server configuration object.

use std::net::SocketAddr;

/// Listener and browser-facing settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) client_origin: String,
    pub(crate) swagger_ui: bool,
}

impl ServerConfig {
    /// Swagger UI is served in debug builds only.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, client_origin: impl Into<String>) -> Self {
        Self {
            bind_addr,
            client_origin: client_origin.into(),
            swagger_ui: cfg!(debug_assertions),
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
