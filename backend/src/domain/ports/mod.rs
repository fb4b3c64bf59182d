//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (implemented by outbound adapters) and driving ports (called
//! by inbound adapters) live side by side so the domain never imports
//! framework or database crates.

mod macros;
pub(crate) use macros::define_port_error;

mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_command::UsersCommand;
pub use users_query::UsersQuery;
