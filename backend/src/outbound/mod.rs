//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL-backed repository using Diesel ORM.
//! - **memory**: process-local repository for tests and database-less runs.
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod memory;
pub mod persistence;
