//! API Module
//!
//! HTTP handlers and routing for the identity cache REST API.
//!
//! # Endpoints
//! - `PUT /identity/:domain` - Store an identity record
//! - `GET /identity/:domain/*username` - Load an identity record
//! - `DELETE /identity/:domain/*username` - Remove an identity record
//! - `GET /stats` - Identity cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
