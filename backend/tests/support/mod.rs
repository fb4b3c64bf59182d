//! Shared helpers for integration tests.
//!
//! Integration tests compile as separate crates, so small helpers live here
//! and are pulled in with `mod support;`.

/// Environment variable naming the PostgreSQL database used by the Diesel
/// suite. The database is wiped by the tests.
pub const TEST_DATABASE_URL_VAR: &str = "USERBASE_TEST_DATABASE_URL";

/// Database URL for the Diesel suite, or `None` with a skip marker.
///
/// Unlike the HTTP suites these tests need a live server, so they are
/// opt-in: leave the variable unset to skip.
pub fn test_database_url() -> Option<String> {
    match std::env::var(TEST_DATABASE_URL_VAR) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-DATABASE: {TEST_DATABASE_URL_VAR} is not set");
            None
        }
    }
}
