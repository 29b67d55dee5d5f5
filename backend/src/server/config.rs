//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use folder_consistency::domain::ports::InconsistencyDetection;

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) detection: Arc<dyn InconsistencyDetection>,
}

impl ServerConfig {
    /// Construct a server configuration around the detection use-case.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, detection: Arc<dyn InconsistencyDetection>) -> Self {
        Self {
            bind_addr,
            detection,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
