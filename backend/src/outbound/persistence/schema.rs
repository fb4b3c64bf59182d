//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; `diesel print-schema` against a
//! migrated database regenerates it.

diesel::table! {
    /// User records.
    ///
    /// `id` is a `SERIAL`, so ids are assigned by the database in insertion
    /// order and never reused.
    users (id) {
        id -> Int4,
        #[max_length = 255]
        full_name -> Varchar,
        #[max_length = 255]
        role -> Varchar,
        efficiency -> Int4,
    }
}
