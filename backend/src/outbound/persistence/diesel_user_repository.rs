//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Every operation is a single statement. Mutations use `RETURNING` so the
//! post-update record and the pre-deletion snapshot come back from the same
//! round trip that changed the row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserFilter, UserId, UserPatch};

use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::DatabaseError(DatabaseErrorKind::UnableToSendCommand, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, _) => {
            UserPersistenceError::query("required user column was null")
        }
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}

fn into_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserPersistenceError> {
    rows.into_iter().map(User::try_from).collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        User::try_from(row)
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = match filter.role() {
            Some(role) => {
                users::table
                    .filter(users::role.eq(role.as_str()))
                    .order(users::id.asc())
                    .select(UserRow::as_select())
                    .load(&mut conn)
                    .await
            }
            None => {
                users::table
                    .order(users::id.asc())
                    .select(UserRow::as_select())
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        into_users(rows)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(User::try_from).transpose()
    }

    async fn update(
        &self,
        id: UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        // Diesel refuses an UPDATE with no columns to set.
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = diesel::update(users::table.find(id.get()))
            .set(UserChangeset::from(patch))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(User::try_from).transpose()
    }

    async fn delete_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = diesel::delete(users::table.find(id.get()))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(User::try_from).transpose()
    }

    async fn delete_all(&self) -> Result<u64, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(users::table)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}
