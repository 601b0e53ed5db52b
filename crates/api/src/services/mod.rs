//! Business-rule layer between handlers and repositories.

pub mod catalog;
