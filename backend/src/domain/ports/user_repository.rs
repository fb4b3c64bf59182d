//! Port abstraction for user persistence adapters and their errors.
//!
//! Lookups that target a single id return `Ok(None)` when no row matches;
//! turning that into a not-found error is the service's job.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserFilter, UserId, UserPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Record store for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its newly assigned id.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Return users passing `filter`, in insertion order.
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Apply `patch` and return the post-update record.
    ///
    /// An empty patch returns the stored record unchanged.
    async fn update(
        &self,
        id: UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user and return the record as it was before deletion.
    async fn delete_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Remove every user, returning how many rows were deleted.
    async fn delete_all(&self) -> Result<u64, UserPersistenceError>;
}
