//! Domain layer for the book catalog.
//!
//! No I/O lives here: shared id/timestamp types, the domain error enum,
//! field validation rules and pagination helpers used by both the store
//! and the HTTP layer.

pub mod catalog;
pub mod error;
pub mod search;
pub mod types;
