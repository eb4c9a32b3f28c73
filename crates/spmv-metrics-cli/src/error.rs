// Dweve SpMV Metrics - Sparse-matrix benchmark speedup and efficiency toolkit
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Structured error types for the SpMV metrics CLI.
//!
//! All CLI operations below the clap boundary return `Result<T, CliError>`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for CLI operations.
///
/// Implements `Clone` so per-matrix failures can be collected from parallel
/// batch runs.
///
/// # Examples
///
/// ```rust,no_run
/// use spmv_metrics_cli::error::CliError;
///
/// fn read(path: &str) -> Result<String, CliError> {
///     std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read, write, directory creation).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Input file exceeds `SPMV_METRICS_MAX_FILE_SIZE`.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        /// The file path that exceeded the limit
        path: PathBuf,
        /// The actual file size in bytes
        actual: u64,
        /// The maximum allowed file size in bytes
        max: u64,
        /// The maximum allowed file size in MB (for display)
        max_mb: u64,
    },

    /// The benchmark table could not be read.
    #[error("CSV error: {0}")]
    Csv(String),

    /// Metric derivation failed for a matrix (e.g. no sequential baseline).
    #[error("{0}")]
    Metrics(String),

    /// JSON serialization error.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    ///
    /// ```rust
    /// use spmv_metrics_cli::error::CliError;
    ///
    /// let err = CliError::file_too_large("bench.csv", 3 * 1024 * 1024, 1024 * 1024);
    /// assert!(err.to_string().contains("(1 MB)"));
    /// ```
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<spmv_metrics_csv::CsvError> for CliError {
    fn from(source: spmv_metrics_csv::CsvError) -> Self {
        Self::Csv(source.to_string())
    }
}

impl From<spmv_metrics_core::MetricsError> for CliError {
    fn from(source: spmv_metrics_core::MetricsError) -> Self {
        Self::Metrics(source.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spmv_metrics_core::{BaselineFailure, MetricsError};

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "bench.csv",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("bench.csv"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_file_too_large_display() {
        let err = CliError::file_too_large("big.csv", 200_000_000, 100 * 1024 * 1024);
        let msg = err.to_string();
        assert!(msg.contains("big.csv"));
        assert!(msg.contains("200000000 bytes"));
        assert!(msg.contains("100 MB"));
    }

    #[test]
    fn test_metrics_error_conversion_keeps_message() {
        let err: CliError = MetricsError::NoBaseline {
            matrix: "cant.mtx".to_string(),
            reason: BaselineFailure::NoSequentialSample,
        }
        .into();
        assert!(matches!(err, CliError::Metrics(_)));
        assert!(err.to_string().contains("cant.mtx"));
    }

    #[test]
    fn test_csv_error_conversion() {
        let err: CliError = spmv_metrics_csv::CsvError::MissingColumn("p90".to_string()).into();
        assert_eq!(err.to_string(), "CSV error: Missing required column: p90");
    }

    #[test]
    fn test_json_format_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let cli_err: CliError = json_err.into();
        assert!(matches!(cli_err, CliError::JsonFormat { .. }));
    }

    #[test]
    fn test_error_cloning() {
        let err = CliError::invalid_input("unknown schedule 'auto'");
        assert_eq!(err.to_string(), err.clone().to_string());
    }
}
