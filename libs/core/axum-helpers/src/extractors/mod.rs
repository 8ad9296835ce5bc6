//! Custom extractors for Axum handlers.
//!
//! All of them reject with an [`AppError`](crate::errors::AppError), so malformed
//! input gets the same JSON error body as every other failure.

pub mod id_path;
pub mod query_params;
pub mod validated_form;

pub use id_path::IdPath;
pub use query_params::QueryParams;
pub use validated_form::ValidatedForm;
