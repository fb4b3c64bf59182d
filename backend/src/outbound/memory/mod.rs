//! In-process `UserRepository` used when no database is configured.
//!
//! Mirrors the PostgreSQL adapter's observable behaviour: ids start at 1,
//! increase monotonically and are never reused, and listings come back in
//! insertion order.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserFilter, UserId, UserPatch};

#[derive(Debug)]
struct Table {
    rows: BTreeMap<UserId, User>,
    next_id: i32,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Mutex-guarded map of users keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, UserPersistenceError> {
        self.table
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user table poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut table = self.lock()?;
        let id = UserId::new(table.next_id)
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        table.next_id = table
            .next_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        let stored = user.clone().into_user(id);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, UserPersistenceError> {
        let table = self.lock()?;
        Ok(table
            .rows
            .values()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn update(
        &self,
        id: UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut table = self.lock()?;
        Ok(table.rows.get_mut(&id).map(|user| {
            *user = user.patched(patch);
            user.clone()
        }))
    }

    async fn delete_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.rows.remove(&id))
    }

    async fn delete_all(&self) -> Result<u64, UserPersistenceError> {
        let mut table = self.lock()?;
        let removed = table.rows.len();
        table.rows.clear();
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}
