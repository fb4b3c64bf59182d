//! User domain service.
//!
//! Implements the [`UsersQuery`] and [`UsersCommand`] driving ports on top of
//! a [`UserRepository`]. Absent rows become [`ErrorCode::NotFound`] and
//! persistence failures are logged then replaced with a client-safe message
//! naming the operation that failed.
//!
//! [`ErrorCode::NotFound`]: crate::domain::ErrorCode::NotFound

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User, UserFilter, UserId, UserPatch};

/// Message returned when a point lookup misses.
pub const USER_NOT_FOUND: &str = "User not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Create,
    List,
    Fetch,
    Update,
    Delete,
    DeleteAll,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Fetch => "fetch",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::DeleteAll => "delete_all",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Failed to create user",
            Self::List => "Failed to get users",
            Self::Fetch => "Failed to get user",
            Self::Update => "Failed to update user",
            Self::Delete => "Failed to delete user",
            Self::DeleteAll => "Failed to delete all users",
        }
    }
}

fn map_persistence_error(operation: Operation, failure: UserPersistenceError) -> Error {
    match failure {
        UserPersistenceError::Connection { message } => {
            warn!(operation = operation.name(), %message, "user store unavailable");
            Error::service_unavailable(operation.failure_message())
        }
        UserPersistenceError::Query { message } => {
            error!(operation = operation.name(), %message, "user store query failed");
            Error::internal(operation.failure_message())
        }
    }
}

fn require_found(id: UserId, user: Option<User>) -> Result<User, Error> {
    user.ok_or_else(|| {
        debug!(user_id = %id, "user not found");
        Error::not_found(USER_NOT_FOUND)
    })
}

/// Service implementing the user driving ports.
pub struct UserService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> UserService<R> {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, Error> {
        self.repository
            .list(filter)
            .await
            .map_err(|err| map_persistence_error(Operation::List, err))
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        let user = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|err| map_persistence_error(Operation::Fetch, err))?;
        require_found(id, user)
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn create_user(&self, user: NewUser) -> Result<User, Error> {
        let created = self
            .repository
            .insert(&user)
            .await
            .map_err(|err| map_persistence_error(Operation::Create, err))?;
        debug!(user_id = %created.id(), "user created");
        Ok(created)
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, Error> {
        let updated = self
            .repository
            .update(id, &patch)
            .await
            .map_err(|err| map_persistence_error(Operation::Update, err))?;
        require_found(id, updated)
    }

    async fn delete_user(&self, id: UserId) -> Result<User, Error> {
        let deleted = self
            .repository
            .delete_by_id(id)
            .await
            .map_err(|err| map_persistence_error(Operation::Delete, err))?;
        require_found(id, deleted)
    }

    async fn delete_all_users(&self) -> Result<(), Error> {
        let removed = self
            .repository
            .delete_all()
            .await
            .map_err(|err| map_persistence_error(Operation::DeleteAll, err))?;
        debug!(removed, "all users deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
