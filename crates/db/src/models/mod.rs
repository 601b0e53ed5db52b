//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create/update DTOs (updates replace every field)
//! - Joined read shapes returned to API clients

pub mod book;
pub mod category;
pub mod stats;
