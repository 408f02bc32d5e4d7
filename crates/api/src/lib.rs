//! Vitrine API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! poll engine and the corporate feed resolver) so integration tests and the
//! binary entrypoint can both access them.

pub mod config;
pub mod corporate;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
