// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License. You may obtain a copy
// of the License at http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under
// the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR REPRESENTATIONS
// OF ANY KIND, either express or implied. See the License for the specific language
// governing permissions and limitations under the License.

use async_trait::async_trait;
use bytes::Bytes;
use object_store::path::Path as ObjectPath;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use super::error::StorageResult;

/// Metadata about one object in storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    /// Full key of the object within the bucket
    pub key: String,

    /// Object size in bytes
    pub size: u64,

    /// Last modified timestamp (if the backend reports one)
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// Capability trait over the storage backend primitives.
///
/// The facade consumes exactly three backend operations: fetch an object's
/// bytes, store an object's bytes, and list keys under a prefix. Anything
/// implementing this trait can be injected into [`Bucket`]; the production
/// implementation is [`ObjectStoreBackend`].
///
/// [`Bucket`]: super::bucket::Bucket
/// [`ObjectStoreBackend`]: super::object_store::ObjectStoreBackend
#[async_trait]
pub trait ObjectBackend: Send + Sync {
    /// Human-readable location of the bound bucket, e.g. `s3://my-bucket`
    /// or a local base directory.
    fn location(&self) -> &str;

    /// Fetch the full payload of the object at `key`.
    ///
    /// # Errors
    ///
    /// * `NotFound` if the key does not exist
    /// * `AccessDenied` if the credentials lack permission
    /// * `Backend` for any other backend fault
    async fn get_object(&self, key: &str) -> StorageResult<Bytes>;

    /// Store `data` as the object at `key`, overwriting any existing object.
    ///
    /// # Errors
    ///
    /// * `AccessDenied` if the credentials lack permission
    /// * `Backend` for any other backend fault (quota, transport)
    async fn put_object(&self, key: &str, data: Bytes) -> StorageResult<()>;

    /// List all objects whose key starts with `prefix`. An empty prefix
    /// lists the whole bucket. A prefix matching nothing yields an empty
    /// vector, not an error. Entry order follows the backend.
    async fn list_objects(&self, prefix: &str) -> StorageResult<Vec<ObjectEntry>>;
}

impl Debug for dyn ObjectBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "ObjectBackend(location={})", self.location())
    }
}

/// Helper function to create an ObjectPath from a key string
pub(crate) fn key_to_path(key: &str) -> ObjectPath {
    ObjectPath::from(key)
}
