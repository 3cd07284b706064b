//! HTTP server configuration.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::ConfigError;

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address the HTTP API listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl ServerConfig {
    /// Parse `bind` as a socket address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `bind` is not `host:port`.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.bind".into(),
                reason: e.to_string(),
            })
    }
}
