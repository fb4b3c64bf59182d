//! Internal Diesel row structs for the `users` table.
//!
//! These never leave the persistence layer; repositories convert them to
//! domain types on the way out.

use diesel::prelude::*;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{FullName, NewUser, Role, User, UserId, UserPatch};

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub full_name: String,
    pub role: String,
    pub efficiency: i32,
}

impl TryFrom<UserRow> for User {
    type Error = UserPersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let invalid =
            |err| UserPersistenceError::query(format!("stored user {} is invalid: {err}", row.id));
        let id = UserId::new(row.id).map_err(invalid)?;
        let full_name = FullName::new(row.full_name.clone()).map_err(invalid)?;
        let role = Role::new(row.role.clone()).map_err(invalid)?;
        Ok(User::new(id, full_name, role, row.efficiency))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub full_name: &'a str,
    pub role: &'a str,
    pub efficiency: i32,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            full_name: user.full_name().as_str(),
            role: user.role().as_str(),
            efficiency: user.efficiency(),
        }
    }
}

/// Changeset for partial updates; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub full_name: Option<&'a str>,
    pub role: Option<&'a str>,
    pub efficiency: Option<i32>,
}

impl<'a> From<&'a UserPatch> for UserChangeset<'a> {
    fn from(patch: &'a UserPatch) -> Self {
        Self {
            full_name: patch.full_name().map(FullName::as_str),
            role: patch.role().map(Role::as_str),
            efficiency: patch.efficiency(),
        }
    }
}
