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

use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The requested key does not exist in the bucket.
    #[error("Object not found: {path}")]
    NotFound {
        path: String,
        #[source]
        source: BoxedSource,
    },

    /// The ambient credentials lack permission for the requested object.
    #[error("Access denied: {path}")]
    AccessDenied {
        path: String,
        #[source]
        source: BoxedSource,
    },

    /// Any other backend fault, propagated unmodified. Retryable faults land
    /// here too; the facade never retries on the caller's behalf.
    #[error("Object store error: {0}")]
    Backend(object_store::Error),

    /// Structurally invalid CSV content (ragged rows, bad quoting).
    #[error("Malformed CSV in '{path}': {source}")]
    MalformedCsv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// A requested column is absent from the CSV header row.
    #[error("Column not present in CSV header: {0}")]
    UnknownColumn(String),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, source } => {
                StorageError::NotFound { path, source }
            }
            object_store::Error::PermissionDenied { path, source } => {
                StorageError::AccessDenied { path, source }
            }
            object_store::Error::Unauthenticated { path, source } => {
                StorageError::AccessDenied { path, source }
            }
            other => StorageError::Backend(other),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
