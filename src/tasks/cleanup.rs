//! TTL Cleanup Task
//!
//! Background task that periodically purges expired records from every
//! provisioned cache.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::InMemoryCacheManager;

/// Spawns a background task that sweeps expired entries out of `manager`.
///
/// Expired entries are already invisible to lookups; the sweep only
/// reclaims their memory. Abort the returned handle on shutdown.
///
/// # Arguments
/// * `manager` - Cache manager whose caches are swept
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
pub fn spawn_cleanup_task<V>(
    manager: Arc<InMemoryCacheManager<V>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = manager.cleanup_expired();
            if removed > 0 {
                info!("TTL cleanup: removed {} expired records", removed);
            } else {
                debug!("TTL cleanup: no expired records found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheHandle;
    use crate::identity::{TenantContext, TenantScope};

    fn provisioned(ttl: Option<u64>) -> Arc<InMemoryCacheManager<String>> {
        let manager: Arc<InMemoryCacheManager<String>> = Arc::new(InMemoryCacheManager::new());
        let scope = TenantScope::enter(TenantContext::super_tenant());
        let cache = manager.provision(&scope, "MGR", "CACHE", 100, ttl);
        cache.put("record".to_string(), "value".to_string()).unwrap();
        manager
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let manager = provisioned(Some(1));

        let handle = spawn_cleanup_task(manager.clone(), 1);
        tokio::time::sleep(Duration::from_millis(2500)).await;

        let scope = TenantScope::enter(TenantContext::super_tenant());
        let cache = manager.cache(&scope, "MGR", "CACHE").unwrap();
        assert!(cache.is_empty(), "Expired record should have been swept");
        assert_eq!(cache.stats().expirations, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let manager = provisioned(Some(3600));

        let handle = spawn_cleanup_task(manager.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let scope = TenantScope::enter(TenantContext::super_tenant());
        let cache = manager.cache(&scope, "MGR", "CACHE").unwrap();
        assert_eq!(cache.get("record").as_deref(), Some("value"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let handle = spawn_cleanup_task(provisioned(None), 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
