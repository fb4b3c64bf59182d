//! Domain primitives, ports and services.
//!
//! Purpose: define the user record model and the persistence contract the
//! adapters implement. Nothing in here depends on Actix or Diesel.
//!
//! Public surface:
//! - [`User`], [`NewUser`], [`UserPatch`], [`UserFilter`] and the field
//!   newtypes.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.
//! - [`UserService`]: implementation of the driving ports in [`ports`].
//! - [`TraceId`]: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    FullName, NewUser, Role, User, UserField, UserFilter, UserId, UserPatch, UserValidationError,
};
pub use self::user_service::{USER_NOT_FOUND, UserService};
