//! API Module
//!
//! HTTP handlers and routing for the semantic cache.
//!
//! # Endpoints
//! - `POST /message` - `searchCache` and `cachePrompt` messages
//! - `GET /stats` - Get cache statistics
//! - `DELETE /cache` - Clear the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
