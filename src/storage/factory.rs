use std::sync::Arc;

use super::config::StorageConfig;
use super::error::StorageResult;
use super::object_store::ObjectStoreBackend;
use super::provider::ObjectBackend;

/// Factory for creating storage backends
pub struct BackendFactory;

impl BackendFactory {
    /// Create a storage backend from a configuration.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * Required configuration options are missing
    /// * The backend cannot be initialized
    pub async fn from_config(config: StorageConfig) -> StorageResult<Arc<dyn ObjectBackend>> {
        let backend = ObjectStoreBackend::new(config).await?;
        Ok(Arc::new(backend))
    }
}
