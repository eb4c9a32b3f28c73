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

//! Metric engine: sequential baseline, best-time grouping and derived ratios.
//!
//! All three operations are pure functions over a borrowed [`SampleTable`]:
//!
//! 1. [`baseline`] picks the best (minimum) sequential p90 of a matrix.
//! 2. [`best_times`] partitions the matching samples by a caller-chosen key
//!    and keeps the minimum p90 of every partition.
//! 3. [`derive`] turns each partition minimum into speedup and efficiency.
//!
//! Grouping is a single pass into an ordered map, so the result never depends
//! on the order of the input rows.

use crate::error::{BaselineFailure, MetricsError, Result, Warning};
use crate::sample::{Mode, Sample, Schedule};
use crate::table::SampleTable;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// Which sample fields participate in the grouping key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GroupKeys {
    pub schedule: bool,
    pub threads: bool,
    pub chunk: bool,
}

impl GroupKeys {
    /// `(schedule, threads)`
    pub const SCHEDULE_THREADS: GroupKeys = GroupKeys {
        schedule: true,
        threads: true,
        chunk: false,
    };

    /// `(threads, chunk)`
    pub const THREADS_CHUNK: GroupKeys = GroupKeys {
        schedule: false,
        threads: true,
        chunk: true,
    };

    /// `(schedule, threads, chunk)`, the full parallel configuration.
    pub const ALL: GroupKeys = GroupKeys {
        schedule: true,
        threads: true,
        chunk: true,
    };
}

/// Key of one configuration group.
///
/// Fields not selected by the [`GroupKeys`] in use are `None`. The derived
/// ordering (threads, then schedule, then chunk) is the output order of
/// [`derive`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupKey {
    pub threads: Option<u32>,
    pub schedule: Option<Schedule>,
    pub chunk: Option<u32>,
}

impl GroupKey {
    /// Project `sample` onto `keys`.
    ///
    /// Returns `None` when a selected field is missing on the sample; such a
    /// sample cannot be attributed to any group.
    pub fn from_sample(sample: &Sample, keys: GroupKeys) -> Option<Self> {
        Some(Self {
            threads: select(keys.threads, sample.threads)?,
            schedule: select(keys.schedule, sample.schedule)?,
            chunk: select(keys.chunk, sample.chunk)?,
        })
    }
}

fn select<T>(selected: bool, value: Option<T>) -> Option<Option<T>> {
    if selected {
        value.map(Some)
    } else {
        Some(None)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(schedule) = self.schedule {
            parts.push(format!("schedule={}", schedule));
        }
        if let Some(threads) = self.threads {
            parts.push(format!("threads={}", threads));
        }
        if let Some(chunk) = self.chunk {
            parts.push(format!("chunk={}", chunk));
        }
        if parts.is_empty() {
            f.write_str("all")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

/// Predicate selecting which samples of a matrix enter [`best_times`].
///
/// # Examples
///
/// ```
/// use spmv_metrics_core::{SampleFilter, Schedule};
///
/// // Parallel runs with chunk = 1, static or guided only.
/// let filter = SampleFilter::omp()
///     .with_chunk(1)
///     .with_schedules(vec![Schedule::Static, Schedule::Guided]);
/// assert_eq!(filter.chunk, Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleFilter {
    /// Required execution mode.
    pub mode: Option<Mode>,
    /// Required chunk size.
    pub chunk: Option<u32>,
    /// Allowed schedules; samples without a schedule never match.
    pub schedules: Option<Vec<Schedule>>,
    /// Allowed thread counts; samples without a thread count never match.
    pub threads: Option<Vec<u32>>,
}

impl SampleFilter {
    /// Match every parallel sample.
    pub fn omp() -> Self {
        Self {
            mode: Some(Mode::Omp),
            ..Default::default()
        }
    }

    pub fn with_chunk(mut self, chunk: u32) -> Self {
        self.chunk = Some(chunk);
        self
    }

    pub fn with_schedules(mut self, schedules: Vec<Schedule>) -> Self {
        self.schedules = Some(schedules);
        self
    }

    pub fn with_threads(mut self, threads: Vec<u32>) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Whether `sample` passes every configured condition.
    pub fn matches(&self, sample: &Sample) -> bool {
        if let Some(mode) = self.mode {
            if sample.mode != mode {
                return false;
            }
        }
        if let Some(chunk) = self.chunk {
            if sample.chunk != Some(chunk) {
                return false;
            }
        }
        if let Some(schedules) = &self.schedules {
            if !sample.schedule.map_or(false, |s| schedules.contains(&s)) {
                return false;
            }
        }
        if let Some(threads) = &self.threads {
            if !sample.threads.map_or(false, |t| threads.contains(&t)) {
                return false;
            }
        }
        true
    }
}

/// Minimum p90 per configuration group.
///
/// Groups without any matching sample are absent, never zero-filled: a missing
/// key means "no data", not "zero time".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestTimes {
    groups: BTreeMap<GroupKey, f64>,
}

impl BestTimes {
    pub fn get(&self, key: &GroupKey) -> Option<f64> {
        self.groups.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, GroupKey, f64> {
        self.groups.iter()
    }

    /// Record `p90` for `key`, keeping the smaller of the two values.
    fn offer(&mut self, key: GroupKey, p90: f64) {
        self.groups
            .entry(key)
            .and_modify(|best| {
                if p90 < *best {
                    *best = p90;
                }
            })
            .or_insert(p90);
    }
}

impl<'a> IntoIterator for &'a BestTimes {
    type Item = (&'a GroupKey, &'a f64);
    type IntoIter = btree_map::Iter<'a, GroupKey, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// One derived metric row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DerivedMetric {
    pub matrix: String,
    /// Present when the schedule is part of the grouping key.
    pub schedule: Option<Schedule>,
    pub threads: u32,
    /// Present when the chunk is part of the grouping key.
    pub chunk: Option<u32>,
    /// Minimum p90 of the group.
    pub best_p90: f64,
    /// `T_seq / best_p90`
    pub speedup: f64,
    /// `speedup / threads`
    pub efficiency: f64,
}

/// Result of deriving metrics for one matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Derivation {
    pub matrix: String,
    /// Sequential baseline the ratios were computed against.
    pub baseline: f64,
    /// Derived rows ordered by threads, schedule, chunk.
    pub metrics: Vec<DerivedMetric>,
    /// Groups that were skipped.
    pub warnings: Vec<Warning>,
}

impl Derivation {
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Rows for a single schedule, in thread order.
    pub fn for_schedule(&self, schedule: Schedule) -> impl Iterator<Item = &DerivedMetric> {
        self.metrics
            .iter()
            .filter(move |m| m.schedule == Some(schedule))
    }
}

/// Best sequential time of `matrix`.
///
/// # Errors
///
/// [`MetricsError::NoBaseline`] when the matrix has no sequential sample with a
/// valid p90, or when the best one is not strictly positive.
///
/// # Examples
///
/// ```
/// use spmv_metrics_core::{baseline, Sample, SampleTable};
///
/// let table: SampleTable = vec![Sample::seq("m", 2.5), Sample::seq("m", 2.0)].into();
/// assert_eq!(baseline(&table, "m").unwrap(), 2.0);
/// assert!(baseline(&table, "other").is_err());
/// ```
pub fn baseline(table: &SampleTable, matrix: &str) -> Result<f64> {
    let best = table
        .for_matrix(matrix)
        .filter(|s| s.is_seq())
        .filter_map(|s| s.p90)
        .fold(None, |best: Option<f64>, p90| {
            Some(best.map_or(p90, |b| b.min(p90)))
        });

    match best {
        None => Err(MetricsError::NoBaseline {
            matrix: matrix.to_string(),
            reason: BaselineFailure::NoSequentialSample,
        }),
        Some(t) if t <= 0.0 => Err(MetricsError::NoBaseline {
            matrix: matrix.to_string(),
            reason: BaselineFailure::NonPositive(t),
        }),
        Some(t) => Ok(t),
    }
}

/// Minimum p90 per group of the samples of `matrix` that pass `filter`.
///
/// Samples with a missing p90, or missing a field selected by `keys`, are left
/// out. The minimum is the exact floating-point minimum of the group.
pub fn best_times(
    table: &SampleTable,
    matrix: &str,
    filter: &SampleFilter,
    keys: GroupKeys,
) -> BestTimes {
    let mut best = BestTimes::default();
    for sample in table.for_matrix(matrix).filter(|s| filter.matches(s)) {
        let Some(p90) = sample.p90 else { continue };
        let Some(key) = GroupKey::from_sample(sample, keys) else {
            continue;
        };
        best.offer(key, p90);
    }
    tracing::debug!(matrix, groups = best.len(), "grouped best times");
    best
}

/// Compute speedup and efficiency for every group of `best`.
///
/// Groups whose thread count is zero or missing, whose best time is zero, or
/// whose speedup overflows are skipped and reported as warnings; the remaining
/// groups are unaffected.
///
/// # Examples
///
/// ```
/// use spmv_metrics_core::{best_times, derive, GroupKeys, Sample, SampleFilter, SampleTable, Schedule};
///
/// let table: SampleTable = vec![
///     Sample::seq("m", 2.0),
///     Sample::omp("m", Schedule::Static, 2, 1, 1.0),
///     Sample::omp("m", Schedule::Static, 2, 1, 0.8),
/// ]
/// .into();
/// let best = best_times(&table, "m", &SampleFilter::omp(), GroupKeys::SCHEDULE_THREADS);
/// let derivation = derive("m", 2.0, &best);
/// assert_eq!(derivation.metrics[0].speedup, 2.5);
/// assert_eq!(derivation.metrics[0].efficiency, 1.25);
/// ```
pub fn derive(matrix: &str, t_seq: f64, best: &BestTimes) -> Derivation {
    let mut metrics = Vec::with_capacity(best.len());
    let mut warnings = Vec::new();

    // BTreeMap iteration already yields threads, schedule, chunk order.
    for (key, &best_p90) in best {
        let threads = match key.threads {
            Some(t) if t > 0 => t,
            _ => {
                tracing::warn!(matrix, group = %key, "skipping group with invalid thread count");
                warnings.push(Warning::InvalidThreads {
                    matrix: matrix.to_string(),
                    key: *key,
                });
                continue;
            }
        };

        if best_p90 <= 0.0 {
            tracing::warn!(matrix, group = %key, best_p90, "skipping group with zero time");
            warnings.push(Warning::NonPositiveTime {
                matrix: matrix.to_string(),
                key: *key,
                best_p90,
            });
            continue;
        }

        let speedup = t_seq / best_p90;
        if !speedup.is_finite() {
            tracing::warn!(matrix, group = %key, best_p90, "skipping group with unbounded speedup");
            warnings.push(Warning::NonFiniteSpeedup {
                matrix: matrix.to_string(),
                key: *key,
                best_p90,
            });
            continue;
        }

        metrics.push(DerivedMetric {
            matrix: matrix.to_string(),
            schedule: key.schedule,
            threads,
            chunk: key.chunk,
            best_p90,
            speedup,
            efficiency: speedup / f64::from(threads),
        });
    }

    Derivation {
        matrix: matrix.to_string(),
        baseline: t_seq,
        metrics,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> SampleTable {
        vec![
            Sample::seq("m", 2.0),
            Sample::omp("m", Schedule::Static, 2, 1, 1.0),
            Sample::omp("m", Schedule::Static, 2, 1, 0.8),
        ]
        .into()
    }

    #[test]
    fn test_reference_scenario() {
        let table = sample_table();
        let t_seq = baseline(&table, "m").unwrap();
        assert_eq!(t_seq, 2.0);

        let best = best_times(&table, "m", &SampleFilter::omp(), GroupKeys::SCHEDULE_THREADS);
        let key = GroupKey {
            threads: Some(2),
            schedule: Some(Schedule::Static),
            chunk: None,
        };
        assert_eq!(best.get(&key), Some(0.8));

        let derivation = derive("m", t_seq, &best);
        assert_eq!(derivation.metrics.len(), 1);
        let metric = &derivation.metrics[0];
        assert_eq!(metric.speedup, 2.5);
        assert_eq!(metric.efficiency, 1.25);
        assert!(derivation.warnings.is_empty());
    }

    #[test]
    fn test_baseline_uses_minimum_seq_time() {
        let table: SampleTable = vec![
            Sample::seq("m", 3.0),
            Sample::seq("m", 2.0),
            Sample::omp("m", Schedule::Static, 1, 1, 0.5),
        ]
        .into();
        assert_eq!(baseline(&table, "m").unwrap(), 2.0);
    }

    #[test]
    fn test_baseline_missing() {
        let table: SampleTable = vec![Sample::omp("m", Schedule::Static, 2, 1, 0.5)].into();
        let err = baseline(&table, "m").unwrap_err();
        assert_eq!(
            err,
            MetricsError::NoBaseline {
                matrix: "m".to_string(),
                reason: BaselineFailure::NoSequentialSample
            }
        );
    }

    #[test]
    fn test_baseline_zero_is_rejected() {
        let table: SampleTable = vec![Sample::seq("m", 0.0)].into();
        let err = baseline(&table, "m").unwrap_err();
        assert!(matches!(
            err,
            MetricsError::NoBaseline {
                reason: BaselineFailure::NonPositive(_),
                ..
            }
        ));
    }

    #[test]
    fn test_baseline_ignores_missing_p90() {
        let mut broken = Sample::seq("m", 1.0);
        broken.p90 = None;
        let table: SampleTable = vec![broken].into();
        assert!(baseline(&table, "m").is_err());
    }

    #[test]
    fn test_best_times_absent_groups_are_not_zero_filled() {
        let table = sample_table();
        let best = best_times(&table, "m", &SampleFilter::omp().with_chunk(4), GroupKeys::ALL);
        assert!(best.is_empty());
    }

    #[test]
    fn test_best_times_skips_samples_missing_key_fields() {
        let mut no_chunk = Sample::omp("m", Schedule::Static, 2, 1, 0.1);
        no_chunk.chunk = None;
        let table: SampleTable = vec![no_chunk, Sample::omp("m", Schedule::Static, 2, 1, 0.5)].into();

        let by_chunk = best_times(&table, "m", &SampleFilter::omp(), GroupKeys::ALL);
        assert_eq!(by_chunk.len(), 1);
        assert_eq!(by_chunk.iter().next().map(|(_, v)| *v), Some(0.5));

        let without_chunk = best_times(&table, "m", &SampleFilter::omp(), GroupKeys::SCHEDULE_THREADS);
        assert_eq!(without_chunk.iter().next().map(|(_, v)| *v), Some(0.1));
    }

    #[test]
    fn test_filter_schedules_and_threads() {
        let table: SampleTable = vec![
            Sample::omp("m", Schedule::Static, 24, 1, 0.3),
            Sample::omp("m", Schedule::Dynamic, 24, 1, 0.2),
            Sample::omp("m", Schedule::Dynamic, 48, 1, 0.1),
        ]
        .into();
        let filter = SampleFilter::omp()
            .with_schedules(vec![Schedule::Dynamic])
            .with_threads(vec![24, 96]);
        let best = best_times(&table, "m", &filter, GroupKeys::SCHEDULE_THREADS);
        assert_eq!(best.len(), 1);
    }

    #[test]
    fn test_zero_threads_group_is_skipped_with_warning() {
        let table: SampleTable = vec![
            Sample::omp("m", Schedule::Static, 0, 1, 1.0),
            Sample::omp("m", Schedule::Static, 4, 1, 0.5),
        ]
        .into();
        let best = best_times(&table, "m", &SampleFilter::omp(), GroupKeys::SCHEDULE_THREADS);
        let derivation = derive("m", 2.0, &best);

        assert_eq!(derivation.metrics.len(), 1);
        assert_eq!(derivation.metrics[0].threads, 4);
        assert_eq!(derivation.warnings.len(), 1);
        assert!(matches!(derivation.warnings[0], Warning::InvalidThreads { .. }));
    }

    #[test]
    fn test_threads_not_in_key_cannot_compute_efficiency() {
        let table = sample_table();
        let keys = GroupKeys {
            schedule: true,
            ..Default::default()
        };
        let best = best_times(&table, "m", &SampleFilter::omp(), keys);
        let derivation = derive("m", 2.0, &best);
        assert!(derivation.is_empty());
        assert_eq!(derivation.warnings.len(), 1);
    }

    #[test]
    fn test_zero_best_time_is_skipped() {
        let table: SampleTable = vec![Sample::omp("m", Schedule::Guided, 2, 1, 0.0)].into();
        let best = best_times(&table, "m", &SampleFilter::omp(), GroupKeys::SCHEDULE_THREADS);
        let derivation = derive("m", 1.0, &best);
        assert!(derivation.is_empty());
        assert!(matches!(derivation.warnings[0], Warning::NonPositiveTime { .. }));
    }

    #[test]
    fn test_subnormal_best_time_is_skipped() {
        let table: SampleTable = vec![
            Sample::omp("m", Schedule::Static, 2, 1, 1e-320),
            Sample::omp("m", Schedule::Static, 4, 1, 0.5),
        ]
        .into();
        let best = best_times(&table, "m", &SampleFilter::omp(), GroupKeys::SCHEDULE_THREADS);
        let derivation = derive("m", 2.0, &best);

        assert_eq!(derivation.metrics.len(), 1);
        assert_eq!(derivation.metrics[0].threads, 4);
        assert!(derivation.metrics.iter().all(|m| m.speedup.is_finite()));
        assert!(matches!(
            &derivation.warnings[..],
            [Warning::NonFiniteSpeedup { best_p90, .. }] if *best_p90 == 1e-320
        ));
    }

    #[test]
    fn test_output_order_threads_then_schedule() {
        let table: SampleTable = vec![
            Sample::omp("m", Schedule::Guided, 4, 1, 1.0),
            Sample::omp("m", Schedule::Static, 8, 1, 1.0),
            Sample::omp("m", Schedule::Dynamic, 4, 1, 1.0),
            Sample::omp("m", Schedule::Static, 4, 1, 1.0),
        ]
        .into();
        let best = best_times(&table, "m", &SampleFilter::omp(), GroupKeys::SCHEDULE_THREADS);
        let order: Vec<_> = derive("m", 1.0, &best)
            .metrics
            .iter()
            .map(|m| (m.threads, m.schedule.unwrap()))
            .collect();
        assert_eq!(
            order,
            vec![
                (4, Schedule::Static),
                (4, Schedule::Dynamic),
                (4, Schedule::Guided),
                (8, Schedule::Static),
            ]
        );
    }

    #[test]
    fn test_group_key_display() {
        let key = GroupKey {
            threads: Some(24),
            schedule: None,
            chunk: Some(8),
        };
        assert_eq!(key.to_string(), "threads=24 chunk=8");
        assert_eq!(GroupKey::default().to_string(), "all");
    }
}
