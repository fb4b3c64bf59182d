//! Store handle lifecycle.
//!
//! Built once before the server binds and released after it stops.

use std::sync::Arc;

use tracing::{info, warn};
use userbase::domain::ports::UserRepository;
use userbase::inbound::http::health::StoreKind;
use userbase::outbound::memory::InMemoryUserRepository;
use userbase::outbound::persistence::{DbPool, DieselUserRepository, bootstrap_schema};

use super::config::ServerSettings;

/// The open store backing the process.
pub enum UserStore {
    Postgres(DbPool),
    Memory(Arc<InMemoryUserRepository>),
}

impl UserStore {
    /// Open the configured store.
    ///
    /// With a database URL this builds the pool and, unless disabled,
    /// creates the `users` table. Without one it falls back to memory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the schema cannot be applied or the pool
    /// cannot be built.
    pub async fn open(settings: &ServerSettings) -> std::io::Result<Self> {
        let Some(pool_config) = settings.pool_config() else {
            warn!("no database_url configured; users are kept in memory and lost on exit");
            return Ok(Self::Memory(Arc::new(InMemoryUserRepository::new())));
        };

        if settings.skip_schema_bootstrap {
            info!("schema bootstrap skipped");
        } else {
            bootstrap_schema(pool_config.database_url())
                .await
                .map_err(|err| std::io::Error::other(err.to_string()))?;
        }

        let max_size = pool_config.max_size();
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        info!(max_size, "database pool ready");
        Ok(Self::Postgres(pool))
    }

    /// Which store this is, for the health probes.
    pub fn kind(&self) -> StoreKind {
        match self {
            Self::Postgres(_) => StoreKind::Postgres,
            Self::Memory(_) => StoreKind::Memory,
        }
    }

    /// Repository over this store for the HTTP state.
    pub fn repository(&self) -> Arc<dyn UserRepository> {
        match self {
            Self::Postgres(pool) => Arc::new(DieselUserRepository::new(pool.clone())),
            Self::Memory(repo) => repo.clone(),
        }
    }

    /// Drop the handle, logging what was still open.
    pub fn release(self) {
        match self {
            Self::Postgres(pool) => {
                let status = pool.status();
                info!(
                    connections = status.connections,
                    idle = status.idle,
                    "releasing database pool"
                );
                drop(pool);
            }
            Self::Memory(_) => info!("releasing in-memory store"),
        }
    }
}
