//! Items Domain
//!
//! One entity (`Item`) behind a single repository contract with five
//! interchangeable storage variants. The variant is chosen once when the
//! service is built; everything above the repository is variant-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (generic over ItemOperations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← ItemService (one repository) / CqrsItemService (command + query)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← memory | sql | named sql | orm | query builder
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Item, NewItem, UpdateItem, ItemFilter
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{handlers, MemoryItemRepository, ItemService};
//!
//! let service = ItemService::new(MemoryItemRepository::default());
//! let router = handlers::router(service);
//! ```

pub mod cqrs;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod orm;
pub mod query_builder;
pub mod repository;
pub mod seed;
pub mod service;
pub mod sql;

// Re-export commonly used types
pub use cqrs::{ItemCommandRepository, ItemCommands, ItemQueries, ItemQueryRepository};
pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use memory::{MemoryItemRepository, MemoryItemStore};
pub use models::{FilterConstraint, Item, ItemFilter, NewItem, UpdateItem};
pub use orm::OrmItemRepository;
pub use query_builder::QueryBuilderItemRepository;
pub use repository::ItemRepository;
pub use seed::seed_sample_items;
pub use service::{CqrsItemService, ItemOperations, ItemService};
pub use sql::{NamedSqlItemRepository, SqlItemRepository};
