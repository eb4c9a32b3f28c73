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

//! Command-line interface for SpMV benchmark metrics.
//!
//! # Commands
//!
//! ## Analysis
//!
//! - **load**: Load and normalize a benchmark CSV, preview rows and warnings
//! - **metrics**: Speedup and efficiency for every `(schedule, threads, chunk)`
//!   group, as an aligned table, CSV or JSON
//!
//! ## Charts
//!
//! Each chart command writes `<out-dir>/<kind>_<matrix>.<ext>` (text, JSON or
//! CSV):
//!
//! - **speedup**: speedup curves per schedule at a fixed chunk size
//! - **efficiency**: parallel efficiency curves per schedule
//! - **schedules**: best p90 of each schedule at selected thread counts
//! - **chunk-effect**: best p90 per chunk size for one matrix and schedule
//!
//! ## Utilities
//!
//! - **completion**: Generate shell completion scripts
//!
//! # Failure Isolation
//!
//! Work is done per matrix by the [`batch`] processor. A matrix that cannot be
//! processed, typically because it has no sequential run to serve as
//! baseline, is reported on stderr while the other matrices complete.
//!
//! # Security
//!
//! Input files larger than `SPMV_METRICS_MAX_FILE_SIZE` bytes (default 1 GB)
//! are rejected before being read.
//!
//! # Examples
//!
//! ```no_run
//! use spmv_metrics_cli::commands::{load, metrics, TableFormat};
//! use spmv_metrics_cli::batch::BatchConfig;
//! use spmv_metrics_csv::FromCsvConfig;
//!
//! # fn main() -> Result<(), String> {
//! let input = FromCsvConfig::default();
//! load("results/benchmark.csv", 10, &input)?;
//! metrics(
//!     "results/benchmark.csv",
//!     None,
//!     Some(1),
//!     TableFormat::Csv,
//!     Some("metrics.csv"),
//!     &input,
//!     BatchConfig::default(),
//!     false,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod chart;
pub mod cli;
pub mod commands;
pub mod error;
