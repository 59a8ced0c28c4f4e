//! API Handlers
//!
//! HTTP request handlers for each identity cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::InMemoryCacheManager;
use crate::config::Config;
use crate::error::{IdentityCacheError, Result};
use crate::identity::{
    IdentityDataCache, TenantContext, TenantScope, UserStoreManager, UserStoreRegistry,
};
use crate::models::{
    HealthResponse, IdentityRecord, RecordResponse, RemoveResponse, StatsResponse,
    StoreRecordRequest, StoreResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Facade every record operation goes through
    pub identity_cache: IdentityDataCache,
    /// Provider backing the facade, kept for stats and the TTL sweeper
    pub cache_manager: Arc<InMemoryCacheManager<IdentityRecord>>,
    /// User stores addressable by domain name
    pub user_stores: Arc<UserStoreRegistry>,
}

impl AppState {
    /// Creates a new AppState over an existing manager and registry.
    pub fn new(
        identity_cache: IdentityDataCache,
        cache_manager: Arc<InMemoryCacheManager<IdentityRecord>>,
        user_stores: UserStoreRegistry,
    ) -> Self {
        Self {
            identity_cache,
            cache_manager,
            user_stores: Arc::new(user_stores),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Provisions the identity cache under the super tenant and registers
    /// the configured user store.
    pub fn from_config(config: &Config) -> Self {
        let cache_manager: Arc<InMemoryCacheManager<IdentityRecord>> =
            Arc::new(InMemoryCacheManager::new());
        {
            let scope = TenantScope::enter(TenantContext::super_tenant());
            cache_manager.provision(
                &scope,
                &config.cache_manager_name,
                &config.cache_name,
                config.max_entries,
                config.ttl(),
            );
        }

        let identity_cache = IdentityDataCache::with_names(
            cache_manager.clone(),
            config.cache_manager_name.clone(),
            config.cache_name.clone(),
        );

        let mut user_stores = UserStoreRegistry::new();
        user_stores.register(&config.user_store_domain, Arc::new(config.user_store()));

        Self::new(identity_cache, cache_manager, user_stores)
    }

    fn user_store(&self, domain: &str) -> Result<Arc<dyn UserStoreManager>> {
        self.user_stores.get(domain).ok_or_else(|| {
            IdentityCacheError::NotFound(format!("user store domain '{}'", domain))
        })
    }
}

/// Handler for PUT /identity/:domain
pub async fn store_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Json(req): Json<StoreRecordRequest>,
) -> Result<Json<StoreResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(IdentityCacheError::InvalidInput(error_msg));
    }

    let user_store = state.user_store(&domain)?;
    let record = req.into_record();
    state
        .identity_cache
        .store(Some(&record), user_store.as_ref())?;

    Ok(Json(StoreResponse::new(domain, record.username)))
}

/// Handler for GET /identity/:domain/*username
pub async fn load_handler(
    State(state): State<AppState>,
    Path((domain, username)): Path<(String, String)>,
) -> Result<Json<RecordResponse>> {
    let user_store = state.user_store(&domain)?;
    let record = state
        .identity_cache
        .load(&username, user_store.as_ref())?
        .ok_or_else(|| {
            IdentityCacheError::NotFound(format!("identity record for '{}'", username))
        })?;

    Ok(Json(RecordResponse::new(domain, record)))
}

/// Handler for DELETE /identity/:domain/*username
pub async fn remove_handler(
    State(state): State<AppState>,
    Path((domain, username)): Path<(String, String)>,
) -> Result<Json<RemoveResponse>> {
    let user_store = state.user_store(&domain)?;
    state
        .identity_cache
        .remove(&username, user_store.as_ref())?;

    Ok(Json(RemoveResponse::new(domain, username)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache_name = state.identity_cache.cache_name();
    let stats = {
        let scope = TenantScope::enter(TenantContext::super_tenant());
        state
            .cache_manager
            .cache(&scope, state.identity_cache.manager_name(), cache_name)
            .map(|cache| cache.stats())
    };

    Json(StatsResponse::new(cache_name, stats))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.user_stores.domains()))
}
