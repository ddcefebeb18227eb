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

//! # Bucketframe
//!
//! A Rust library for fetching, parsing, and uploading CSV and raw files in
//! cloud object storage buckets.
//!
//! Bucketframe wraps one storage bucket behind a small facade: raw object
//! fetch and upload, CSV fetch-and-parse into a [`TabularFrame`], CSV
//! serialize-and-upload, and prefix listing. It runs against AWS S3 (and
//! S3-compatible services) or a local filesystem, with the backend injected
//! at construction.
//!
//! ## Quick Start
//!
//! ### Local Filesystem Example
//!
//! ```rust,no_run
//! use bucketframe::{Bucket, CsvReadOptions, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = StorageConfig::local()
//!     .with_option("path", "./demos/data");
//!
//! let bucket = Bucket::from_config(config).await?;
//!
//! // Fetch and parse a CSV object; non-.csv keys return CsvFetch::NotCsv
//! let fetched = bucket.fetch_csv("reports/jan.csv", &CsvReadOptions::default()).await?;
//! if let Some(frame) = fetched.into_frame() {
//!     println!("{}", frame);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### AWS S3 Example
//!
//! ```rust,no_run
//! use bucketframe::{Bucket, CsvReadOptions, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! // Credentials are read from the ambient environment when not configured
//! let config = StorageConfig::aws()
//!     .with_option("bucket", "my-bucket")
//!     .with_option("region", "us-east-1");
//!
//! let bucket = Bucket::from_config(config).await?;
//!
//! for entry in bucket.list_prefix("reports/").await? {
//!     println!("{} ({} bytes)", entry.key, entry.size);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`storage`] - Bucket facade, backend trait, and object_store backend
//! - [`frame`] - In-memory tabular data and its CSV encoding

pub mod frame;
pub mod storage;

// Re-export commonly used types
pub use frame::{CsvReadOptions, CsvWriteOptions, TabularFrame};
pub use storage::{
    Bucket, CsvFetch, ObjectBackend, ObjectEntry, StorageConfig, StorageError, StorageResult,
};
