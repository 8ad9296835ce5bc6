//! PostgreSQL plumbing for the items service
//!
//! - [`postgres`]: pool configuration, connecting with retry, migrations and
//!   the readiness ping
//! - [`repository`]: [`BaseRepository`], generic insert/find/update over a
//!   SeaORM entity
//! - [`common`]: shared error type and exponential backoff
//!
//! # Features
//!
//! - `postgres` (default) - SeaORM connection and repository support
//! - `config` - `PostgresConfig::from_env` through `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "items_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};

#[cfg(feature = "postgres")]
pub use repository::{BaseRepository, PrimaryKeyOf};
