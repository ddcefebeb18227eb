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

//! Bucket facade over an injected storage backend.
//!
//! Every operation is one stateless round trip to the backend; the only
//! internal composition is that [`Bucket::fetch_csv`] reuses
//! [`Bucket::fetch`]. There is no caching, no retry, and no coordination
//! between calls.

use bytes::Bytes;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::debug;

use crate::frame::{parse_frame, write_frame, CsvReadOptions, CsvWriteOptions, TabularFrame};

use super::config::StorageConfig;
use super::error::StorageResult;
use super::factory::BackendFactory;
use super::provider::{ObjectBackend, ObjectEntry};

/// Result of a CSV fetch.
///
/// Keys whose extension is not `csv` yield [`CsvFetch::NotCsv`] without any
/// backend traffic; this is a marker, not an error, and callers must match
/// on it explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvFetch {
    /// The object was fetched and parsed.
    Frame(TabularFrame),
    /// The key does not name a CSV file; no fetch was attempted.
    NotCsv,
}

impl CsvFetch {
    /// The parsed frame, or `None` for the not-a-csv marker.
    pub fn into_frame(self) -> Option<TabularFrame> {
        match self {
            CsvFetch::Frame(frame) => Some(frame),
            CsvFetch::NotCsv => None,
        }
    }

    pub fn is_not_csv(&self) -> bool {
        matches!(self, CsvFetch::NotCsv)
    }
}

/// Facade over one storage bucket.
///
/// Wraps an injected [`ObjectBackend`] and exposes raw fetch/upload, CSV
/// fetch-and-parse, CSV serialize-and-upload, and prefix listing. The
/// backend binding is fixed for the lifetime of the instance.
#[derive(Clone)]
pub struct Bucket {
    backend: Arc<dyn ObjectBackend>,
}

impl Bucket {
    /// Create a facade over an already-constructed backend.
    pub fn new(backend: Arc<dyn ObjectBackend>) -> Self {
        Self { backend }
    }

    /// Convenience constructor: build the backend from configuration first.
    ///
    /// # Errors
    ///
    /// Backend construction errors (missing options, builder failures)
    /// surface as `Config`.
    pub async fn from_config(config: StorageConfig) -> StorageResult<Self> {
        let backend = BackendFactory::from_config(config).await?;
        Ok(Self::new(backend))
    }

    /// Location of the bound bucket, e.g. `s3://my-bucket`.
    pub fn location(&self) -> &str {
        self.backend.location()
    }

    /// Fetch the raw bytes of the object at `key`.
    ///
    /// # Errors
    ///
    /// * `NotFound` if the key does not exist
    /// * `AccessDenied` if the ambient credentials lack permission
    /// * `Backend` for any other backend fault, propagated without retry
    pub async fn fetch(&self, key: &str) -> StorageResult<Bytes> {
        self.backend.get_object(key).await
    }

    /// Fetch the object at `key` and parse it as CSV.
    ///
    /// The key's final dot-delimited suffix must be exactly `csv`
    /// (case-sensitive); otherwise `Ok(CsvFetch::NotCsv)` is returned and the
    /// backend is never contacted.
    ///
    /// # Errors
    ///
    /// Fetch errors as in [`Bucket::fetch`], plus `MalformedCsv` for
    /// structurally invalid content and `UnknownColumn` when
    /// `options.columns` names a column absent from the header row.
    pub async fn fetch_csv(
        &self,
        key: &str,
        options: &CsvReadOptions,
    ) -> StorageResult<CsvFetch> {
        if !has_csv_suffix(key) {
            debug!("Skipping non-csv key={}", key);
            return Ok(CsvFetch::NotCsv);
        }

        let data = self.fetch(key).await?;
        let frame = parse_frame(&data, key, options)?;
        Ok(CsvFetch::Frame(frame))
    }

    /// Serialize `frame` to CSV and upload it as the object at `key`,
    /// overwriting any existing object.
    ///
    /// # Errors
    ///
    /// Upload errors (permission, quota, transport) propagate unmodified
    /// from the backend.
    pub async fn store_csv(
        &self,
        frame: &TabularFrame,
        key: &str,
        options: &CsvWriteOptions,
    ) -> StorageResult<()> {
        let data = write_frame(frame, options)?;
        self.backend.put_object(key, Bytes::from(data)).await
    }

    /// Upload an arbitrary byte payload as the object at `key`, overwriting
    /// any existing object. No content-type inference is performed.
    pub async fn upload(&self, data: impl Into<Bytes>, key: &str) -> StorageResult<()> {
        self.backend.put_object(key, data.into()).await
    }

    /// List all objects whose key starts with `prefix`. An empty prefix
    /// lists the whole bucket. A prefix matching nothing yields an empty
    /// vector. Entry order follows the backend.
    pub async fn list_prefix(&self, prefix: &str) -> StorageResult<Vec<ObjectEntry>> {
        self.backend.list_objects(prefix).await
    }
}

impl Debug for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bucket(location={})", self.backend.location())
    }
}

/// Only the final dot-delimited segment counts, case-sensitively: a bare
/// key `csv` passes, `data.CSV` and `data.csv.gz` do not.
fn has_csv_suffix(key: &str) -> bool {
    key.rsplit('.').next() == Some("csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::error::StorageError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Backend that counts every call, for asserting an operation performed
    /// zero backend traffic
    #[derive(Default)]
    struct CountingBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ObjectBackend for CountingBackend {
        fn location(&self) -> &str {
            "mem://counting"
        }

        async fn get_object(&self, _key: &str) -> StorageResult<Bytes> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Bytes::from_static(b"a,b\n1,2\n"))
        }

        async fn put_object(&self, _key: &str, _data: Bytes) -> StorageResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn list_objects(&self, _prefix: &str) -> StorageResult<Vec<ObjectEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    async fn local_bucket(temp_dir: &TempDir) -> Bucket {
        let config =
            StorageConfig::local().with_option("path", temp_dir.path().to_str().unwrap());
        Bucket::from_config(config).await.unwrap()
    }

    fn sample_frame() -> TabularFrame {
        TabularFrame::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec!["1".to_string(), "2".to_string()],
                vec!["3".to_string(), "4".to_string()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_has_csv_suffix() {
        assert!(has_csv_suffix("data.csv"));
        assert!(has_csv_suffix("dir/archive.tar.csv"));
        // Final dot-delimited segment only, case-sensitive
        assert!(has_csv_suffix("csv"));
        assert!(!has_csv_suffix("data.CSV"));
        assert!(!has_csv_suffix("data.csv.gz"));
        assert!(!has_csv_suffix("data.txt"));
        assert!(!has_csv_suffix("noext"));
    }

    #[tokio::test]
    async fn test_fetch_csv_non_csv_key_skips_backend() {
        let backend = Arc::new(CountingBackend::default());
        let bucket = Bucket::new(backend.clone());

        for key in ["a.txt", "a.CSV", "noext", "data.csv.gz"] {
            let result = bucket
                .fetch_csv(key, &CsvReadOptions::default())
                .await
                .unwrap();
            assert!(result.is_not_csv(), "key {} should be rejected", key);
        }

        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_csv_parses_through_backend() {
        let backend = Arc::new(CountingBackend::default());
        let bucket = Bucket::new(backend.clone());

        let result = bucket
            .fetch_csv("data.csv", &CsvReadOptions::default())
            .await
            .unwrap();
        let frame = result.into_frame().unwrap();

        assert_eq!(frame.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(frame.rows()[0], vec!["1", "2"]);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_upload_then_fetch_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let bucket = local_bucket(&temp_dir).await;

        let payload: &[u8] = b"\x00\x01binary payload\xff";
        bucket.upload(payload, "blobs/raw.bin").await.unwrap();

        let fetched = bucket.fetch("blobs/raw.bin").await.unwrap();
        assert_eq!(fetched.as_ref(), payload);
    }

    #[tokio::test]
    async fn test_upload_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let bucket = local_bucket(&temp_dir).await;

        bucket.upload(&b"first"[..], "data.bin").await.unwrap();
        bucket.upload(&b"second"[..], "data.bin").await.unwrap();

        let fetched = bucket.fetch("data.bin").await.unwrap();
        assert_eq!(fetched.as_ref(), b"second");
    }

    #[tokio::test]
    async fn test_fetch_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let bucket = local_bucket(&temp_dir).await;

        let result = bucket.fetch("missing.bin").await;
        assert!(matches!(result, Err(StorageError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_store_csv_then_fetch_csv() {
        let temp_dir = TempDir::new().unwrap();
        let bucket = local_bucket(&temp_dir).await;
        let frame = sample_frame();

        bucket
            .store_csv(&frame, "out/frame.csv", &CsvWriteOptions::default())
            .await
            .unwrap();

        let fetched = bucket
            .fetch_csv("out/frame.csv", &CsvReadOptions::default())
            .await
            .unwrap();
        assert_eq!(fetched.into_frame().unwrap(), frame);
    }

    #[tokio::test]
    async fn test_store_csv_emits_plain_csv() {
        let temp_dir = TempDir::new().unwrap();
        let bucket = local_bucket(&temp_dir).await;
        let frame = sample_frame();

        bucket
            .store_csv(&frame, "frame.csv", &CsvWriteOptions::default())
            .await
            .unwrap();

        // Header row then data rows; no index column
        let raw = bucket.fetch("frame.csv").await.unwrap();
        assert_eq!(raw.as_ref(), b"a,b\n1,2\n3,4\n");
    }

    #[tokio::test]
    async fn test_fetch_csv_column_subset() {
        let temp_dir = TempDir::new().unwrap();
        let bucket = local_bucket(&temp_dir).await;

        bucket
            .upload(&b"a,b,c\n1,2,3\n4,5,6\n"[..], "table.csv")
            .await
            .unwrap();

        let options = CsvReadOptions::with_columns(["b"]);
        let frame = bucket
            .fetch_csv("table.csv", &options)
            .await
            .unwrap()
            .into_frame()
            .unwrap();

        assert_eq!(frame.columns(), &["b".to_string()]);
        assert_eq!(frame.column("b"), Some(vec!["2", "5"]));
    }

    #[tokio::test]
    async fn test_fetch_csv_unknown_column() {
        let temp_dir = TempDir::new().unwrap();
        let bucket = local_bucket(&temp_dir).await;

        bucket.upload(&b"a,b\n1,2\n"[..], "table.csv").await.unwrap();

        let options = CsvReadOptions::with_columns(["z"]);
        let result = bucket.fetch_csv("table.csv", &options).await;

        match result {
            Err(StorageError::UnknownColumn(name)) => assert_eq!(name, "z"),
            _ => panic!("Expected UnknownColumn"),
        }
    }

    #[tokio::test]
    async fn test_fetch_csv_malformed_content() {
        let temp_dir = TempDir::new().unwrap();
        let bucket = local_bucket(&temp_dir).await;

        bucket
            .upload(&b"a,b\n1,2,3\n"[..], "ragged.csv")
            .await
            .unwrap();

        let result = bucket
            .fetch_csv("ragged.csv", &CsvReadOptions::default())
            .await;
        match result {
            Err(StorageError::MalformedCsv { path, .. }) => assert_eq!(path, "ragged.csv"),
            _ => panic!("Expected MalformedCsv"),
        }
    }

    #[tokio::test]
    async fn test_fetch_csv_custom_separator() {
        let temp_dir = TempDir::new().unwrap();
        let bucket = local_bucket(&temp_dir).await;

        bucket
            .upload(&b"a;b\n1;2\n"[..], "semi.csv")
            .await
            .unwrap();

        let frame = bucket
            .fetch_csv("semi.csv", &CsvReadOptions::with_delimiter(b';'))
            .await
            .unwrap()
            .into_frame()
            .unwrap();

        assert_eq!(frame.columns(), &["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_list_prefix_whole_bucket() {
        let temp_dir = TempDir::new().unwrap();
        let bucket = local_bucket(&temp_dir).await;

        bucket.upload(&b""[..], "a/b.txt").await.unwrap();
        bucket.upload(&b"1,2,3\n"[..], "a/c.csv").await.unwrap();
        bucket.upload(&b""[..], "d").await.unwrap();

        // Backend-defined order; sort for a stable comparison
        let mut entries = bucket.list_prefix("").await.unwrap();
        entries.sort_by(|x, y| x.key.cmp(&y.key));

        let pairs: Vec<(&str, u64)> = entries.iter().map(|e| (e.key.as_str(), e.size)).collect();
        assert_eq!(pairs, vec![("a/b.txt", 0), ("a/c.csv", 6), ("d", 0)]);
    }

    #[tokio::test]
    async fn test_list_prefix_subset() {
        let temp_dir = TempDir::new().unwrap();
        let bucket = local_bucket(&temp_dir).await;

        bucket.upload(&b"x"[..], "logs/app.log").await.unwrap();
        bucket.upload(&b"y"[..], "data/rows.csv").await.unwrap();

        let entries = bucket.list_prefix("logs").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "logs/app.log");
    }

    #[tokio::test]
    async fn test_list_prefix_zero_matches_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let bucket = local_bucket(&temp_dir).await;

        let entries = bucket.list_prefix("nothing/here").await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_bucket_debug_format() {
        let backend = Arc::new(CountingBackend::default());
        let bucket = Bucket::new(backend);

        let debug_str = format!("{:?}", bucket);
        assert!(debug_str.contains("Bucket"));
        assert!(debug_str.contains("mem://counting"));
    }

    #[test]
    fn test_csv_fetch_accessors() {
        let frame = sample_frame();
        let fetched = CsvFetch::Frame(frame.clone());

        assert!(!fetched.is_not_csv());
        assert_eq!(fetched.into_frame(), Some(frame));
        assert_eq!(CsvFetch::NotCsv.into_frame(), None);
        assert!(CsvFetch::NotCsv.is_not_csv());
    }
}
