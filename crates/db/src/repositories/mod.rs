//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod book_repo;
pub mod category_repo;
pub mod stats_repo;

pub use book_repo::BookRepo;
pub use category_repo::CategoryRepo;
pub use stats_repo::StatsRepo;
