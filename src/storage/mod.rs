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

//! Cloud storage access layer
//!
//! This module provides the bucket facade and the backend it is built on.
//! The backend uses the `object_store` crate's configuration system, so the
//! same facade runs against AWS S3 (or S3-compatible services) and local
//! filesystems.

pub mod bucket;
pub mod config;
pub mod error;
pub mod factory;
pub mod object_store;
pub mod provider;

// Public exports
pub use bucket::{Bucket, CsvFetch};
pub use config::{StorageConfig, StorageType};
pub use error::{StorageError, StorageResult};
pub use factory::BackendFactory;
pub use provider::{ObjectBackend, ObjectEntry};
