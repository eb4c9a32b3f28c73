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

//! Metric queries: group-selection policies and per-matrix batch derivation.
//!
//! A [`MetricQuery`] pairs a [`SampleFilter`] with the [`GroupKeys`] to group
//! by. The presets cover the views the benchmark reports are built from; the
//! filter stays an explicit parameter, so callers can, for instance, choose
//! between an efficiency table at a fixed chunk size and one over every chunk.

use crate::engine::{baseline, best_times, derive, Derivation, GroupKeys, SampleFilter};
use crate::error::{MetricsError, Result};
use crate::sample::Schedule;
use crate::table::SampleTable;

/// Filter plus grouping key for one derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricQuery {
    pub filter: SampleFilter,
    pub keys: GroupKeys,
}

impl MetricQuery {
    pub fn new(filter: SampleFilter, keys: GroupKeys) -> Self {
        Self { filter, keys }
    }

    /// Every parallel configuration, grouped by `(schedule, threads, chunk)`.
    pub fn all_configurations() -> Self {
        Self::new(SampleFilter::omp(), GroupKeys::ALL)
    }

    /// Parallel runs at one chunk size, grouped by `(schedule, threads)`.
    ///
    /// This is the view behind speedup and efficiency curves.
    pub fn fixed_chunk(chunk: u32) -> Self {
        Self::new(SampleFilter::omp().with_chunk(chunk), GroupKeys::SCHEDULE_THREADS)
    }

    /// The three known schedules compared at selected thread counts.
    pub fn schedule_comparison(chunk: u32, threads: Vec<u32>) -> Self {
        Self::new(
            SampleFilter::omp()
                .with_chunk(chunk)
                .with_schedules(Schedule::ALL.to_vec())
                .with_threads(threads),
            GroupKeys::SCHEDULE_THREADS,
        )
    }

    /// Effect of the chunk size under one schedule, grouped by `(threads, chunk)`.
    pub fn chunk_effect(schedule: Schedule, threads: Vec<u32>) -> Self {
        Self::new(
            SampleFilter::omp()
                .with_schedules(vec![schedule])
                .with_threads(threads),
            GroupKeys::THREADS_CHUNK,
        )
    }
}

/// Baseline, grouping and derivation for one matrix.
///
/// # Errors
///
/// [`MetricsError::NoBaseline`] when the matrix has no usable sequential run.
/// Per-group problems are returned as warnings inside the [`Derivation`].
pub fn compute(table: &SampleTable, matrix: &str, query: &MetricQuery) -> Result<Derivation> {
    let t_seq = baseline(table, matrix)?;
    let best = best_times(table, matrix, &query.filter, query.keys);
    Ok(derive(matrix, t_seq, &best))
}

/// Outcome of deriving one matrix inside a batch.
#[derive(Debug, Clone)]
pub struct MatrixOutcome {
    pub matrix: String,
    pub result: Result<Derivation>,
}

impl MatrixOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }

    pub fn error(&self) -> Option<&MetricsError> {
        self.result.as_ref().err()
    }
}

/// Run `query` for every matrix of the table, in order of first appearance.
///
/// A matrix that fails (no baseline) yields a failed outcome; the others are
/// still derived.
pub fn derive_all(table: &SampleTable, query: &MetricQuery) -> Vec<MatrixOutcome> {
    table
        .matrices()
        .into_iter()
        .map(|matrix| {
            let result = compute(table, matrix, query);
            if let Err(err) = &result {
                tracing::warn!(matrix, error = %err, "matrix skipped");
            }
            MatrixOutcome {
                matrix: matrix.to_string(),
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sample;

    fn table() -> SampleTable {
        vec![
            Sample::seq("a", 4.0),
            Sample::omp("a", Schedule::Static, 2, 1, 2.0),
            Sample::omp("a", Schedule::Static, 2, 8, 1.0),
            Sample::omp("a", Schedule::Dynamic, 4, 1, 1.0),
            Sample::omp("b", Schedule::Static, 2, 1, 1.0),
        ]
        .into()
    }

    #[test]
    fn test_fixed_chunk_ignores_other_chunks() {
        let d = compute(&table(), "a", &MetricQuery::fixed_chunk(1)).unwrap();
        let static_two = d.for_schedule(Schedule::Static).next().unwrap();
        assert_eq!(static_two.best_p90, 2.0);
        assert_eq!(static_two.speedup, 2.0);
        assert_eq!(static_two.chunk, None);
    }

    #[test]
    fn test_all_configurations_keeps_chunks_apart() {
        let d = compute(&table(), "a", &MetricQuery::all_configurations()).unwrap();
        assert_eq!(d.metrics.len(), 3);
        let chunks: Vec<_> = d.metrics.iter().map(|m| m.chunk).collect();
        assert_eq!(chunks, vec![Some(1), Some(8), Some(1)]);
    }

    #[test]
    fn test_chunk_effect_groups_by_threads_and_chunk() {
        let query = MetricQuery::chunk_effect(Schedule::Static, vec![2]);
        let d = compute(&table(), "a", &query).unwrap();
        assert_eq!(d.metrics.len(), 2);
        assert!(d.metrics.iter().all(|m| m.schedule.is_none()));
    }

    #[test]
    fn test_schedule_comparison_restricts_threads() {
        let query = MetricQuery::schedule_comparison(1, vec![4]);
        let d = compute(&table(), "a", &query).unwrap();
        assert_eq!(d.metrics.len(), 1);
        assert_eq!(d.metrics[0].schedule, Some(Schedule::Dynamic));
    }

    #[test]
    fn test_derive_all_isolates_failures() {
        let outcomes = derive_all(&table(), &MetricQuery::fixed_chunk(1));
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].is_success());
        assert!(outcomes[1].is_failure());
        assert!(outcomes[1].error().unwrap().is_no_baseline());
    }
}
