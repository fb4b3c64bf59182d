//! Server settings and the configuration handed to [`super::create_server`].
//!
//! Settings layer CLI flags, `USERBASE_*` environment variables and config
//! files through OrthoConfig.

use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use userbase::domain::ports::UserRepository;
use userbase::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Process settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERBASE")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without one the process keeps users in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Connections kept open while idle.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_connection_timeout_secs: Option<u64>,
    /// Assume the `users` table already exists.
    #[ortho_config(default = false)]
    pub skip_schema_bootstrap: bool,
}

impl ServerSettings {
    /// Interface to bind, `0.0.0.0` unless configured.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Port to bind, 3000 unless configured.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve `host:port` to the first matching socket address.
    ///
    /// # Errors
    ///
    /// Fails when the host does not resolve.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{}:{} did not resolve to an address", self.host(), self.port()),
                )
            })
    }

    /// Pool settings for the configured database, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().filter(|url| !url.trim().is_empty())?;
        Some(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
                .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)))
                .with_connection_timeout(Duration::from_secs(
                    self.pool_connection_timeout_secs
                        .unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
                )),
        )
    }
}

/// Everything the HTTP server needs once the store is open.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) repository: Arc<dyn UserRepository>,
}

impl ServerConfig {
    /// Pair the resolved address with the repository to serve.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, repository: Arc<dyn UserRepository>) -> Self {
        Self {
            bind_addr,
            repository,
        }
    }
}
