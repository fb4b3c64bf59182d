//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::{Error, User, UserFilter, UserId};

/// Read-side use cases consumed by inbound adapters.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// List users passing `filter`.
    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, Error>;

    /// Fetch one user; fails with a not-found error when absent.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}
