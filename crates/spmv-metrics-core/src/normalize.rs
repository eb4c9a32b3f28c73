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

//! Raw record normalization.
//!
//! Coerces the loosely typed fields of [`RawRecord`]s into [`Sample`]s:
//!
//! - `mode` and `schedule` are trimmed and lower-cased
//! - `threads` and `chunk` are parsed as non-negative integers
//! - `p90` is parsed as a finite, non-negative float
//!
//! A numeric field that does not parse becomes `None` and is reported as a
//! [`Warning::MissingNumeric`]; the record itself is kept. A parallel record
//! without a schedule is kept as well, with a [`Warning::MissingSchedule`].
//! A record whose mode is not `seq` or `omp` is dropped (or rejected in strict
//! mode).

use crate::error::{MetricsError, Result, Warning};
use crate::sample::{Mode, RawRecord, Sample, Schedule};
use crate::table::SampleTable;

/// Options controlling normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Fail on the first record with an invalid categorical field instead of
    /// dropping it (default: `false`).
    pub strict: bool,
}

/// Output of [`normalize`].
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Normalized samples, in input order.
    pub table: SampleTable,
    /// Number of input records that were dropped.
    pub dropped: usize,
    /// Per-record problems, in input order.
    pub warnings: Vec<Warning>,
}

/// Normalize raw records with default options (lenient).
///
/// # Examples
///
/// ```
/// use spmv_metrics_core::{normalize, Mode, RawRecord};
///
/// let raw = vec![
///     RawRecord::new("m.mtx", " SEQ ", "na", "1", "0", "2.0"),
///     RawRecord::new("m.mtx", "mpi", "static", "2", "1", "1.0"),
/// ];
/// let normalized = normalize(&raw).unwrap();
/// assert_eq!(normalized.table.len(), 1);
/// assert_eq!(normalized.table.samples()[0].mode, Mode::Seq);
/// assert_eq!(normalized.dropped, 1);
/// ```
pub fn normalize(raw: &[RawRecord]) -> Result<Normalized> {
    normalize_with_options(raw, NormalizeOptions::default())
}

/// Normalize raw records.
///
/// # Errors
///
/// Returns [`MetricsError::Format`] only when `options.strict` is set and a
/// record has an invalid `mode` or an empty `matrix`.
pub fn normalize_with_options(raw: &[RawRecord], options: NormalizeOptions) -> Result<Normalized> {
    let mut samples = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();
    let mut dropped = 0;

    for (idx, record) in raw.iter().enumerate() {
        let row = idx + 1;

        let rejected = match normalize_record(row, record, &mut warnings) {
            Ok(sample) => {
                samples.push(sample);
                continue;
            }
            Err(rejected) => rejected,
        };

        if options.strict {
            return Err(rejected);
        }
        if let MetricsError::Format { field, value, .. } = rejected {
            tracing::warn!(row, field, value = %value, "dropping malformed record");
            warnings.push(Warning::DroppedRecord { row, field, value });
        }
        dropped += 1;
    }

    if dropped > 0 {
        tracing::info!(dropped, kept = samples.len(), "normalization dropped records");
    }

    Ok(Normalized {
        table: SampleTable::new(samples),
        dropped,
        warnings,
    })
}

fn normalize_record(
    row: usize,
    record: &RawRecord,
    warnings: &mut Vec<Warning>,
) -> Result<Sample> {
    let matrix = record.matrix.trim();
    if matrix.is_empty() {
        return Err(MetricsError::Format {
            row,
            field: "matrix",
            value: String::new(),
        });
    }

    let mode_token = record.mode.trim().to_lowercase();
    let mode = Mode::parse(&mode_token).ok_or_else(|| MetricsError::Format {
        row,
        field: "mode",
        value: mode_token.clone(),
    })?;

    // Sequential rows carry placeholder schedule/chunk values.
    let schedule = match mode {
        Mode::Seq => None,
        Mode::Omp => normalize_schedule(row, &record.schedule, warnings),
    };

    let threads = parse_count(&record.threads);
    let chunk = parse_count(&record.chunk);
    if mode == Mode::Omp {
        if threads.is_none() {
            warnings.push(missing(row, "threads", &record.threads));
        }
        if chunk.is_none() {
            warnings.push(missing(row, "chunk", &record.chunk));
        }
    }

    let p90 = parse_time(&record.p90);
    if p90.is_none() {
        warnings.push(missing(row, "p90", &record.p90));
    }

    Ok(Sample {
        matrix: matrix.to_string(),
        mode,
        schedule,
        threads,
        chunk,
        p90,
    })
}

fn normalize_schedule(row: usize, text: &str, warnings: &mut Vec<Warning>) -> Option<Schedule> {
    let token = text.trim().to_lowercase();
    if token.is_empty() || token == "na" {
        tracing::warn!(row, "parallel record without schedule");
        warnings.push(Warning::MissingSchedule { row });
        return None;
    }
    let schedule = Schedule::parse(&token);
    if schedule.is_none() {
        tracing::warn!(row, value = %token, "unknown schedule");
        warnings.push(Warning::UnknownSchedule { row, value: token });
    }
    schedule
}

fn missing(row: usize, field: &'static str, value: &str) -> Warning {
    tracing::warn!(row, field, value, "numeric field treated as missing");
    Warning::MissingNumeric {
        row,
        field,
        value: value.trim().to_string(),
    }
}

/// Parse a non-negative integer count. Integral float text (`"2.0"`) is accepted.
fn parse_count(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        return Some(n);
    }
    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

/// Parse an elapsed time: finite and non-negative.
fn parse_time(text: &str) -> Option<f64> {
    let value = text.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
