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

//! In-memory tabular data and its CSV encoding.
//!
//! [`TabularFrame`] is the exchange type between CSV objects in storage and
//! callers: named, ordered columns over ordered rows of string cells. Parsing
//! and serialization delegate quoting/escaping to the `csv` crate.

use std::fmt;

use csv::{ReaderBuilder, WriterBuilder};

use crate::storage::error::{StorageError, StorageResult};

/// Options controlling how CSV bytes are parsed into a frame.
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Columns to retain, in the order given. `None` (or an empty list)
    /// keeps every column.
    pub columns: Option<Vec<String>>,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            columns: None,
        }
    }
}

impl CsvReadOptions {
    /// Options with a non-default field delimiter.
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter,
            ..Default::default()
        }
    }

    /// Options retaining only the named columns, in the order given.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: Some(columns.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }
}

/// Options controlling how a frame is serialized to CSV bytes.
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Write the column names as the first row when true.
    pub include_header: bool,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_header: true,
        }
    }
}

/// An in-memory table with named, ordered columns and ordered rows.
///
/// Every row holds exactly one cell per column; the constructor rejects
/// ragged input. No index or row-number column exists, so serialization
/// emits data columns only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularFrame {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TabularFrame {
    /// Create a frame from column names and rows.
    ///
    /// # Errors
    ///
    /// `InvalidFrame` if any row's width differs from the number of columns.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> StorageResult<Self> {
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(StorageError::InvalidFrame(format!(
                    "row {} has {} cells, expected {}",
                    idx,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, in order. Each row has one cell per column.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Values of the named column, in row order, or `None` if the column
    /// does not exist.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// A new frame retaining only the named columns, in the order given.
    ///
    /// # Errors
    ///
    /// `UnknownColumn` if any requested name is absent.
    pub fn select(&self, columns: &[String]) -> StorageResult<TabularFrame> {
        let mut indices = Vec::with_capacity(columns.len());
        for name in columns {
            let idx = self
                .columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| StorageError::UnknownColumn(name.clone()))?;
            indices.push(idx);
        }

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(TabularFrame {
            columns: columns.to_vec(),
            rows,
        })
    }
}

impl fmt::Display for TabularFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.columns.join(" | "))?;
        for row in &self.rows {
            writeln!(f, "{}", row.join(" | "))?;
        }
        Ok(())
    }
}

/// Parse CSV bytes into a frame.
///
/// The first record is the header row. `key` is carried into error values
/// for context only.
///
/// # Errors
///
/// * `MalformedCsv` on structurally invalid input (ragged rows, bad quoting)
/// * `UnknownColumn` if a requested column is absent from the header
pub fn parse_frame(data: &[u8], key: &str, options: &CsvReadOptions) -> StorageResult<TabularFrame> {
    let malformed = |source: csv::Error| StorageError::MalformedCsv {
        path: key.to_string(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(data);

    let columns: Vec<String> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(malformed)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let frame = TabularFrame { columns, rows };
    match &options.columns {
        Some(requested) if !requested.is_empty() => frame.select(requested),
        _ => Ok(frame),
    }
}

/// Serialize a frame to CSV bytes: optional header row, then one record per
/// row, no index column.
pub fn write_frame(frame: &TabularFrame, options: &CsvWriteOptions) -> StorageResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(Vec::new());

    if options.include_header {
        writer.write_record(frame.columns()).map_err(csv_write_error)?;
    }
    for row in frame.rows() {
        writer.write_record(row).map_err(csv_write_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| StorageError::InvalidFrame(format!("CSV serialization failed: {}", e)))
}

fn csv_write_error(err: csv::Error) -> StorageError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => StorageError::Io(io),
        kind => StorageError::InvalidFrame(format!("CSV serialization failed: {:?}", kind)),
    }
}
