//! Identity Cache - tenant-aware in-memory cache for identity claim records
//!
//! Records are keyed by user store domain, tenant and normalized username,
//! and every cache access runs inside an explicit super tenant scope.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{IdentityCacheError, Result};
pub use identity::{IdentityDataCache, StaticUserStore, UserStoreManager};
pub use models::IdentityRecord;
pub use tasks::spawn_cleanup_task;
