//! Book catalog API server library.
//!
//! Exposes the core building blocks (config, state, error handling, the
//! catalog service, routes) so integration tests and the binary entrypoint
//! can both access them.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
