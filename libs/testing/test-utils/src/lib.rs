//! Shared test utilities for the items crates
//!
//! - `TestDatabase`: PostgreSQL container with the item schema migrated
//!   (feature: "postgres", on by default)
//! - `assertions`: assertion helpers with readable failure messages
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::TestDatabase;
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let connection = db.connection();
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that ids are strictly increasing (storage order)
    pub fn assert_ids_ascending(ids: impl IntoIterator<Item = i64>) {
        let ids: Vec<i64> = ids.into_iter().collect();
        assert!(
            ids.windows(2).all(|pair| pair[0] < pair[1]),
            "expected strictly ascending ids, got {:?}",
            ids
        );
    }
}
