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

//! Error and warning types for normalization and metric derivation.
//!
//! Errors abort an operation: a malformed record in strict mode, or a matrix
//! without a usable sequential baseline. Everything that only affects a single
//! record or a single group is a [`Warning`] and travels next to the result.

use crate::engine::GroupKey;
use std::fmt;
use thiserror::Error;

/// Errors raised by the normalizer and the metric engine.
///
/// # Examples
///
/// ```
/// use spmv_metrics_core::{BaselineFailure, MetricsError};
///
/// let err = MetricsError::NoBaseline {
///     matrix: "pdb1HYS.mtx".to_string(),
///     reason: BaselineFailure::NoSequentialSample,
/// };
/// assert_eq!(
///     err.to_string(),
///     "No baseline for matrix 'pdb1HYS.mtx': no sequential sample"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    /// A categorical field held a value outside its allowed set.
    ///
    /// Only returned when strict normalization is requested; otherwise the
    /// record is dropped and reported as [`Warning::DroppedRecord`].
    #[error("Format error in record {row}: invalid {field} '{value}'")]
    Format {
        /// Record number (1-based).
        row: usize,
        /// Name of the offending field.
        field: &'static str,
        /// Value after trimming and lower-casing.
        value: String,
    },

    /// The matrix has no valid sequential sample to divide by.
    #[error("No baseline for matrix '{matrix}': {reason}")]
    NoBaseline {
        /// Matrix whose derivation was aborted.
        matrix: String,
        /// Why no baseline could be established.
        reason: BaselineFailure,
    },
}

impl MetricsError {
    /// Returns `true` for [`MetricsError::NoBaseline`].
    pub fn is_no_baseline(&self) -> bool {
        matches!(self, MetricsError::NoBaseline { .. })
    }
}

/// Reason attached to [`MetricsError::NoBaseline`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BaselineFailure {
    #[error("no sequential sample")]
    NoSequentialSample,

    #[error("best sequential p90 {0} is not strictly positive")]
    NonPositive(f64),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// A non-fatal problem found while normalizing records or deriving metrics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Warning {
    /// Record removed because a categorical field was invalid.
    DroppedRecord {
        row: usize,
        field: &'static str,
        value: String,
    },

    /// Schedule text did not name a known policy; the sample keeps no schedule.
    UnknownSchedule { row: usize, value: String },

    /// Parallel record with an empty or `na` schedule; the sample keeps no
    /// schedule.
    MissingSchedule { row: usize },

    /// A numeric field could not be parsed and is treated as missing.
    MissingNumeric {
        row: usize,
        field: &'static str,
        value: String,
    },

    /// Group skipped because its thread count is zero or missing.
    InvalidThreads { matrix: String, key: GroupKey },

    /// Group skipped because its best time is zero.
    NonPositiveTime {
        matrix: String,
        key: GroupKey,
        best_p90: f64,
    },

    /// Group skipped because its best time is so small that the speedup
    /// overflows.
    NonFiniteSpeedup {
        matrix: String,
        key: GroupKey,
        best_p90: f64,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DroppedRecord { row, field, value } => {
                write!(f, "record {}: dropped, invalid {} '{}'", row, field, value)
            }
            Warning::UnknownSchedule { row, value } => {
                write!(f, "record {}: unknown schedule '{}'", row, value)
            }
            Warning::MissingSchedule { row } => {
                write!(f, "record {}: parallel run without schedule", row)
            }
            Warning::MissingNumeric { row, field, value } => {
                write!(f, "record {}: {} '{}' is not a valid number", row, field, value)
            }
            Warning::InvalidThreads { matrix, key } => {
                write!(
                    f,
                    "{} [{}]: skipped, thread count is zero or missing",
                    matrix, key
                )
            }
            Warning::NonPositiveTime {
                matrix,
                key,
                best_p90,
            } => write!(
                f,
                "{} [{}]: skipped, best p90 {} is not strictly positive",
                matrix, key, best_p90
            ),
            Warning::NonFiniteSpeedup {
                matrix,
                key,
                best_p90,
            } => write!(
                f,
                "{} [{}]: skipped, best p90 {:e} yields a non-finite speedup",
                matrix, key, best_p90
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Schedule;

    #[test]
    fn test_format_error_display() {
        let err = MetricsError::Format {
            row: 3,
            field: "mode",
            value: "mpi".to_string(),
        };
        assert_eq!(err.to_string(), "Format error in record 3: invalid mode 'mpi'");
        assert!(!err.is_no_baseline());
    }

    #[test]
    fn test_non_positive_baseline_display() {
        let err = MetricsError::NoBaseline {
            matrix: "m".to_string(),
            reason: BaselineFailure::NonPositive(0.0),
        };
        assert!(err.to_string().contains("not strictly positive"));
        assert!(err.is_no_baseline());
    }

    #[test]
    fn test_invalid_threads_warning_names_group() {
        let warning = Warning::InvalidThreads {
            matrix: "m".to_string(),
            key: GroupKey {
                threads: Some(0),
                schedule: Some(Schedule::Static),
                chunk: None,
            },
        };
        let msg = warning.to_string();
        assert!(msg.contains("schedule=static"));
        assert!(msg.contains("threads=0"));
    }
}
