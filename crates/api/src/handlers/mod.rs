pub mod books;
pub mod categories;
pub mod stats;
