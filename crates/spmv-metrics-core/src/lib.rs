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

//! Speedup and parallel efficiency metrics for sparse-matrix benchmarks.
//!
//! This crate turns a table of benchmark timings (sequential and OpenMP runs of
//! SpMV kernels under varying thread counts, schedules and chunk sizes) into
//! derived performance metrics.
//!
//! # Pipeline
//!
//! ```text
//! RawRecord[] ──normalize──▶ SampleTable ──baseline / best_times / derive──▶ DerivedMetric[]
//! ```
//!
//! - **Normalizer** ([`normalize`]): coerces text fields, drops records with an
//!   unknown mode, marks unparseable numbers as missing.
//! - **Metric engine** ([`baseline`], [`best_times`], [`derive`]): best
//!   sequential time per matrix, best p90 per configuration group, then
//!   `speedup = T_seq / best_p90` and `efficiency = speedup / threads`.
//!
//! Every function is pure: the table is never mutated and all results are
//! freshly allocated.
//!
//! # Examples
//!
//! ```
//! use spmv_metrics_core::{compute, normalize, MetricQuery, RawRecord};
//!
//! let raw = vec![
//!     RawRecord::new("M", "seq", "na", "1", "1", "2.0"),
//!     RawRecord::new("M", "omp", "static", "2", "1", "1.0"),
//!     RawRecord::new("M", "omp", "static", "2", "1", "0.8"),
//! ];
//! let normalized = normalize(&raw).unwrap();
//!
//! let derivation = compute(&normalized.table, "M", &MetricQuery::fixed_chunk(1)).unwrap();
//! let metric = &derivation.metrics[0];
//! assert_eq!(metric.best_p90, 0.8);
//! assert_eq!(metric.speedup, 2.5);
//! assert_eq!(metric.efficiency, 1.25);
//! ```
//!
//! # Error Handling
//!
//! Only two conditions are errors ([`MetricsError`]): an invalid categorical
//! field under strict normalization, and a matrix without a usable sequential
//! baseline. Everything else is a [`Warning`] returned next to the result, so
//! one bad record or group never blocks the rest of the table.

mod engine;
mod error;
mod normalize;
mod query;
mod sample;
mod table;

pub use engine::{
    baseline, best_times, derive, BestTimes, Derivation, DerivedMetric, GroupKey, GroupKeys,
    SampleFilter,
};
pub use error::{BaselineFailure, MetricsError, Result, Warning};
pub use normalize::{normalize, normalize_with_options, NormalizeOptions, Normalized};
pub use query::{compute, derive_all, MatrixOutcome, MetricQuery};
pub use sample::{Mode, RawRecord, Sample, Schedule};
pub use table::SampleTable;
