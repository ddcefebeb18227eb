// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use super::config::{StorageConfig, StorageType};
use super::error::{StorageError, StorageResult};
use super::provider::{key_to_path, ObjectBackend, ObjectEntry};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use object_store::{
    aws::AmazonS3Builder, local::LocalFileSystem, ClientOptions, ObjectStore, RetryConfig,
};
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Backend implementation over any object_store store
///
/// One instance is bound to one bucket (or one local base directory) for its
/// whole lifetime; the binding is fixed at construction.
pub struct ObjectStoreBackend {
    pub config: StorageConfig,
    pub store: Arc<dyn ObjectStore>,
    pub location: String,
}

impl ObjectStoreBackend {
    /// Create a backend from configuration.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * Required configuration options are missing (local `path`, S3 `bucket`)
    /// * The underlying store cannot be initialized
    pub async fn new(config: StorageConfig) -> StorageResult<Self> {
        let (store, location) = Self::build_store(&config)?;

        Ok(Self {
            config,
            store: Arc::new(store),
            location,
        })
    }

    /// Build the appropriate object store based on configuration.
    fn build_store(config: &StorageConfig) -> StorageResult<(Box<dyn ObjectStore>, String)> {
        match config.storage_type {
            StorageType::Local => Self::build_local_store(config),
            StorageType::Aws => Self::build_aws_store(config),
        }
    }

    /// Build a local filesystem store rooted at the configured 'path' option.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The 'path' option is missing from configuration
    /// * The path cannot be canonicalized (doesn't exist or permission denied)
    /// * The path is not a directory
    fn build_local_store(config: &StorageConfig) -> StorageResult<(Box<dyn ObjectStore>, String)> {
        let path = config.options.get("path").ok_or_else(|| {
            StorageError::Config("Local storage requires 'path' option".to_string())
        })?;
        let base_path = PathBuf::from(path);

        // Canonicalize the path (handles both relative and absolute paths, resolves symlinks)
        let canonical_path = base_path.canonicalize().map_err(|e| {
            StorageError::Config(format!(
                "Failed to resolve path '{}': {} (path must exist)",
                path, e
            ))
        })?;

        if !canonical_path.is_dir() {
            return Err(StorageError::Config(format!(
                "Base path is not a directory: {}",
                canonical_path.display()
            )));
        }

        let store = LocalFileSystem::new_with_prefix(&canonical_path)
            .map_err(|e| StorageError::Config(format!("Failed to create local store: {}", e)))?;

        let location = canonical_path.to_string_lossy().to_string();
        Ok((Box::new(store), location))
    }

    /// Build an AWS S3 store bound to the configured bucket.
    ///
    /// The builder starts from the ambient environment (`AWS_*` variables,
    /// profile files, instance metadata), so a config carrying only a
    /// `bucket` option yields a default-credentialed client. Explicit
    /// credential options override the environment.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The 'bucket' option is missing from configuration
    /// * The S3 store cannot be initialized
    fn build_aws_store(config: &StorageConfig) -> StorageResult<(Box<dyn ObjectStore>, String)> {
        let bucket = config.options.get("bucket").ok_or_else(|| {
            StorageError::Config("AWS storage requires 'bucket' option".to_string())
        })?;

        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .with_client_options(Self::build_connection_options(config))
            .with_retry(Self::build_retry_options(config));
        let mut endpoint: Option<&String> = None;

        // Apply configuration options
        for (key, value) in &config.options {
            match key.as_str() {
                "bucket" => (),
                "region" => builder = builder.with_region(value),
                "access_key_id" => builder = builder.with_access_key_id(value),
                "secret_access_key" => builder = builder.with_secret_access_key(value),
                "session_token" | "token" => builder = builder.with_token(value),
                "endpoint" => {
                    endpoint = Some(value);
                    builder = builder.with_endpoint(value);
                }
                "allow_http" => {
                    if value.to_lowercase() == "true" {
                        builder = builder.with_allow_http(true);
                    }
                }
                // Already handled by `build_connection_options` and `build_retry_options`
                "timeout" | "connect_timeout" | "max_retries" | "retry_timeout" => (),
                _ => {
                    tracing::warn!("Unknown AWS S3 option: {}", key);
                }
            }
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::Config(format!("Failed to create S3 store: {}", e)))?;

        let location = if let Some(endpoint_url) = endpoint {
            format!("{}/{}", endpoint_url.trim_end_matches('/'), bucket)
        } else {
            format!("s3://{}", bucket)
        };

        Ok((Box::new(store), location))
    }

    /// Build transport options from configuration.
    fn build_connection_options(config: &StorageConfig) -> ClientOptions {
        let mut client_options = ClientOptions::default();
        if let Some(timeout_str) = config.options.get("timeout") {
            if timeout_str == "0" || timeout_str == "disabled" {
                client_options = client_options.with_timeout_disabled();
            } else if let Ok(sec) = timeout_str.parse::<u64>() {
                client_options = client_options.with_timeout(Duration::from_secs(sec))
            }
        };
        if let Some(connect_timeout_str) = config.options.get("connect_timeout") {
            if connect_timeout_str == "0" || connect_timeout_str == "disabled" {
                client_options = client_options.with_connect_timeout_disabled();
            } else if let Ok(sec) = connect_timeout_str.parse::<u64>() {
                client_options = client_options.with_connect_timeout(Duration::from_secs(sec))
            }
        }
        client_options
    }

    /// Build transport-level retry options from configuration.
    ///
    /// Retries live entirely in the object_store client; the facade itself
    /// never re-issues an operation.
    fn build_retry_options(config: &StorageConfig) -> RetryConfig {
        let default_retry_config = RetryConfig::default();
        let max_retries = config
            .options
            .get("max_retries")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(default_retry_config.max_retries);
        let retry_timeout = config
            .options
            .get("retry_timeout")
            .and_then(|s| Some(Duration::from_secs(s.parse::<u64>().ok()?)))
            .unwrap_or(default_retry_config.retry_timeout);
        RetryConfig {
            backoff: Default::default(),
            max_retries,
            retry_timeout,
        }
    }
}

#[async_trait]
impl ObjectBackend for ObjectStoreBackend {
    fn location(&self) -> &str {
        &self.location
    }

    async fn get_object(&self, key: &str) -> StorageResult<Bytes> {
        let object_path = key_to_path(key);
        let result = self.store.get(&object_path).await?;
        let bytes = result.bytes().await?;
        debug!("Fetched key={} bytes={}", key, bytes.len());
        Ok(bytes)
    }

    async fn put_object(&self, key: &str, data: Bytes) -> StorageResult<()> {
        let object_path = key_to_path(key);
        let size = data.len();
        self.store.put(&object_path, data.into()).await?;
        debug!("Stored key={} bytes={}", key, size);
        Ok(())
    }

    async fn list_objects(&self, prefix: &str) -> StorageResult<Vec<ObjectEntry>> {
        let object_path = if prefix.is_empty() {
            None
        } else {
            Some(key_to_path(prefix))
        };

        let mut entries = Vec::new();
        let mut stream = self.store.list(object_path.as_ref());

        while let Some(meta) = stream.next().await {
            let meta = meta?;
            entries.push(ObjectEntry {
                key: meta.location.to_string(),
                size: meta.size,
                last_modified: Some(meta.last_modified),
            });
        }

        debug!("Listed prefix={} count={}", prefix, entries.len());
        Ok(entries)
    }
}

impl Debug for ObjectStoreBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ObjectStoreBackend(type={}, location={})",
            self.config.storage_type_str(),
            self.location
        )
    }
}
