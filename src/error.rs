//! Error types for the identity cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::identity::UserStoreError;
use crate::models::ErrorResponse;

// == Identity Cache Error Enum ==
/// Unified error type for the identity cache.
#[derive(Error, Debug)]
pub enum IdentityCacheError {
    /// Tenant id or domain lookup on the user store failed
    #[error("User store access failed: {0}")]
    StoreAccess(String),

    /// The user store manager lacks a capability the operation needs
    #[error("User store manager is not {0}")]
    Unsupported(&'static str),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Cache is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<UserStoreError> for IdentityCacheError {
    fn from(err: UserStoreError) -> Self {
        IdentityCacheError::StoreAccess(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for IdentityCacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            IdentityCacheError::StoreAccess(_) => StatusCode::BAD_GATEWAY,
            IdentityCacheError::Unsupported(_) => StatusCode::NOT_IMPLEMENTED,
            IdentityCacheError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            IdentityCacheError::CacheFull(_) => StatusCode::SERVICE_UNAVAILABLE,
            IdentityCacheError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the identity cache.
pub type Result<T> = std::result::Result<T, IdentityCacheError>;
