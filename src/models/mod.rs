//! Data models for the identity cache
//!
//! The cached identity record plus the DTOs used for serializing and
//! deserializing HTTP request and response bodies.

pub mod record;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use record::IdentityRecord;
pub use requests::StoreRecordRequest;
pub use responses::{
    ErrorResponse, HealthResponse, RecordResponse, RemoveResponse, StatsResponse, StoreResponse,
};
