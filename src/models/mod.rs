//! Request and Response models for the semantic cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{is_searchable, validate_record, CacheRequest};
pub use responses::{
    ErrorResponse, HealthResponse, MessageResponse, ResetResponse, SearchResponse, StatsResponse,
    SuccessResponse,
};
