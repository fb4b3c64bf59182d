//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! - **Thin adapter**: [`DieselUserRepository`] only translates between
//!   Diesel rows and domain types.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never reach the domain.
//! - **Async-safe pooling**: connections come from a `bb8` pool through
//!   `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use userbase::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod models;
mod pool;
mod schema;
mod schema_bootstrap;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError, PoolStatus};
pub use schema_bootstrap::{SchemaBootstrapError, bootstrap_schema};
