//! Manage Cache use case.
//!
//! Whole-directory cache operations behind `cache clear` / `cache info`.

use crate::ports::metadata_cache::{CacheError, CacheInfo, CacheMaintenance};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct ManageCacheUseCase {
    store: Arc<dyn CacheMaintenance>,
}

impl ManageCacheUseCase {
    pub fn new(store: Arc<dyn CacheMaintenance>) -> Self {
        Self { store }
    }

    /// Remove every cached snapshot.
    pub fn clear(&self) -> Result<usize, CacheError> {
        let removed = self.store.clear_all()?;
        info!("Removed {} cache files", removed);
        Ok(removed)
    }

    pub fn info(&self) -> Result<CacheInfo, CacheError> {
        self.store.info()
    }
}
