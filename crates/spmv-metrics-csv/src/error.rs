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

//! Error types for CSV reading and writing.

use spmv_metrics_core::MetricsError;
use thiserror::Error;

/// CSV conversion error types.
///
/// # Examples
///
/// ```
/// use spmv_metrics_csv::CsvError;
///
/// let err = CsvError::MissingColumn("p90".to_string());
/// assert_eq!(err.to_string(), "Missing required column: p90");
/// ```
#[derive(Debug, Error)]
pub enum CsvError {
    /// CSV parsing error at a specific line.
    ///
    /// ```
    /// use spmv_metrics_csv::CsvError;
    ///
    /// let err = CsvError::ParseError {
    ///     line: 42,
    ///     message: "unterminated quote".to_string(),
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("CSV parse error at line {line}: {message}")]
    ParseError {
        /// Line number where the error occurred (1-based).
        line: usize,
        /// Detailed error message.
        message: String,
    },

    /// A column the benchmark table needs is absent from the header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Invalid header format or content.
    #[error("Invalid header at position {position}: {reason}")]
    InvalidHeader {
        /// Position of the invalid header (0-based).
        position: usize,
        /// Reason the header is invalid.
        reason: String,
    },

    /// Row count exceeded the configured limit.
    ///
    /// ```
    /// use spmv_metrics_csv::CsvError;
    ///
    /// let err = CsvError::SecurityLimit {
    ///     limit: 1_000_000,
    ///     actual: 1_000_001,
    /// };
    /// assert!(err.to_string().contains("Security limit"));
    /// ```
    #[error("Security limit exceeded: row count {actual} exceeds maximum {limit}")]
    SecurityLimit {
        /// Maximum allowed rows.
        limit: usize,
        /// Actual row count encountered.
        actual: usize,
    },

    /// I/O error during CSV reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from underlying CSV library.
    #[error("CSV library error: {0}")]
    CsvLib(#[from] csv::Error),

    /// Strict normalization rejected a record.
    #[error("Normalization error: {0}")]
    Normalize(#[from] MetricsError),
}

/// Convenience type alias for `Result` with `CsvError`.
pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_header_display() {
        let err = CsvError::InvalidHeader {
            position: 3,
            reason: "duplicate column 'p90'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid header at position 3: duplicate column 'p90'"
        );
    }

    #[test]
    fn test_normalize_error_conversion() {
        let err: CsvError = MetricsError::Format {
            row: 2,
            field: "mode",
            value: "mpi".to_string(),
        }
        .into();
        assert!(matches!(err, CsvError::Normalize(_)));
        assert!(err.to_string().contains("invalid mode 'mpi'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = CsvError::from(io_err);
        assert!(matches!(err, CsvError::Io(_)));
    }
}
