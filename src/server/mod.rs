//! HTTP server implementation
//!
//! This module provides the tracking proxy's HTTP server and routing.

// Submodules
pub mod middleware;
pub mod routes;

pub mod builder;
mod handlers;
pub mod server;
pub mod state;
