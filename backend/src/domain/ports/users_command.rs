//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId, UserPatch};

/// Write-side use cases consumed by inbound adapters.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Persist a new user.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Apply a partial update and return the full updated record.
    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, Error>;

    /// Delete one user and return its pre-deletion snapshot.
    async fn delete_user(&self, id: UserId) -> Result<User, Error>;

    /// Delete every user.
    async fn delete_all_users(&self) -> Result<(), Error>;
}
