//! Server module for hosting the proxy over HTTP
//!
//! This module provides a `ServerBuilder` that wires configuration and an
//! upstream client into an axum router with:
//! - The proxy endpoint (`/` and `/swapi`)
//! - Health check routes

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
