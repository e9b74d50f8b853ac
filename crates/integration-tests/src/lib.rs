//! Integration tests for the helpdesk API.
//!
//! The tests drive a running server over HTTP and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the API against a database with the helpdesk schema, triggers
//! # and stored procedures installed
//! cargo run -p helpdesk-api
//!
//! # Run the ignored tests
//! cargo test -p helpdesk-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `HELPDESK_BASE_URL` - Server under test (default: `http://localhost:5000`)
//! - `HELPDESK_TEST_DEPARTMENT_ID` - An existing department (default: 1)
//! - `HELPDESK_TEST_MISSING_DEPARTMENT_ID` - A department id that does not exist (default: 999999)
//! - `HELPDESK_DATABASE_URL` - Database the server under test uses, for tests
//!   that inspect tables directly

use helpdesk_core::DepartmentId;
use sqlx::MySqlPool;
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("HELPDESK_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// URL of an employees route, `path` starting with `/`.
#[must_use]
pub fn employees_url(path: &str) -> String {
    format!("{}/api/employees{path}", base_url())
}

/// Department every test employee is created in.
#[must_use]
pub fn existing_department() -> DepartmentId {
    DepartmentId::new(env_i32("HELPDESK_TEST_DEPARTMENT_ID", 1))
}

/// Department id guaranteed not to exist.
#[must_use]
pub fn missing_department() -> DepartmentId {
    DepartmentId::new(env_i32("HELPDESK_TEST_MISSING_DEPARTMENT_ID", 999_999))
}

/// Email address no other test run has used.
#[must_use]
pub fn unique_email() -> String {
    format!("it-{}@helpdesk.test", Uuid::new_v4().simple())
}

/// HTTP client for the tests.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Connect to the database behind the server under test.
///
/// # Panics
///
/// Panics if `HELPDESK_DATABASE_URL` is unset or the connection fails.
pub async fn database() -> MySqlPool {
    let url = std::env::var("HELPDESK_DATABASE_URL").expect("HELPDESK_DATABASE_URL must be set");
    MySqlPool::connect(&url)
        .await
        .expect("Failed to connect to database")
}

fn env_i32(key: &str, default: i32) -> i32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_emails_differ() {
        assert_ne!(unique_email(), unique_email());
    }

    #[test]
    fn test_employees_url() {
        assert!(employees_url("/42").ends_with("/api/employees/42"));
    }
}
