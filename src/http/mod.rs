//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with the playlist and introspection endpoints
//! - Request handlers mapping relay errors to fixed response bodies
//! - HTTP headers (Content-Type)
//! - CORS middleware

pub mod handlers;
pub mod routes;

pub use routes::create_router;
