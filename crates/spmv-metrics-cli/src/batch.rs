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

//! Per-matrix batch processing with parallel execution and progress reporting.
//!
//! A benchmark table usually holds many matrices. The batch processor runs one
//! [`BatchOperation`] per matrix, in parallel above a configurable threshold,
//! and collects every outcome: a matrix that fails (for example because it has
//! no sequential baseline) is reported without stopping the others.
//!
//! Results are always returned in the order the matrices were given,
//! regardless of how the work was scheduled.
//!
//! # Examples
//!
//! ```rust
//! use spmv_metrics_cli::batch::{BatchConfig, BatchProcessor, DeriveOperation};
//! use spmv_metrics_core::{MetricQuery, Sample, SampleTable, Schedule};
//!
//! let table = SampleTable::new(vec![
//!     Sample::seq("a.mtx", 2.0),
//!     Sample::omp("a.mtx", Schedule::Static, 2, 1, 0.8),
//!     Sample::omp("b.mtx", Schedule::Static, 2, 1, 0.5),
//! ]);
//!
//! let processor = BatchProcessor::new(BatchConfig::default());
//! let operation = DeriveOperation {
//!     query: MetricQuery::all_configurations(),
//! };
//! let results = processor.process(&table, &table.matrices(), operation, false);
//!
//! assert_eq!(results.total_matrices(), 2);
//! assert_eq!(results.success_count(), 1);
//! assert_eq!(results.failures().next().unwrap().matrix, "b.mtx");
//! ```

use crate::chart::{build_chart, write_chart, ChartConfig, ChartFormat, ChartKind};
use crate::error::CliError;
use colored::Colorize;
use rayon::prelude::*;
use spmv_metrics_core::{compute, Derivation, MetricQuery, SampleTable};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Configuration for batch processing.
///
/// ```rust
/// use spmv_metrics_cli::batch::BatchConfig;
///
/// let config = BatchConfig {
///     parallel_threshold: 2,
///     max_threads: Some(4),
///     progress_interval: 0,
///     verbose: false,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Minimum number of matrices to trigger parallel processing.
    ///
    /// Default: 10
    pub parallel_threshold: usize,

    /// Maximum number of worker threads; `None` uses Rayon's default.
    pub max_threads: Option<usize>,

    /// Number of matrices between progress updates. Set to 0 to disable.
    ///
    /// Default: 1
    pub progress_interval: usize,

    /// Print one status line per matrix.
    pub verbose: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 10,
            max_threads: None,
            progress_interval: 1,
            verbose: false,
        }
    }
}

/// Outcome of one matrix.
#[derive(Debug, Clone)]
pub struct MatrixResult<T> {
    pub matrix: String,
    pub result: Result<T, CliError>,
}

impl<T> MatrixResult<T> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Aggregated results of a batch run, in input order.
#[derive(Debug, Clone)]
pub struct BatchResults<T> {
    pub results: Vec<MatrixResult<T>>,
    /// Total processing time in milliseconds
    pub elapsed_ms: u128,
}

impl<T> BatchResults<T> {
    pub fn new(results: Vec<MatrixResult<T>>, elapsed_ms: u128) -> Self {
        Self {
            results,
            elapsed_ms,
        }
    }

    pub fn total_matrices(&self) -> usize {
        self.results.len()
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.is_success())
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.is_failure())
    }

    pub fn successes(&self) -> impl Iterator<Item = &MatrixResult<T>> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &MatrixResult<T>> {
        self.results.iter().filter(|r| r.is_failure())
    }
}

/// Work applied to every matrix of a batch.
///
/// Implementations must be `Send + Sync` so matrices can be processed in
/// parallel.
pub trait BatchOperation: Send + Sync {
    type Output: Send;

    /// Process one matrix of `table`.
    fn process_matrix(&self, table: &SampleTable, matrix: &str) -> Result<Self::Output, CliError>;

    /// Human-readable name used in progress output.
    fn name(&self) -> &str;
}

/// Lock-free progress counters shared by the worker threads.
#[derive(Debug)]
struct ProgressTracker {
    total: usize,
    processed: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    interval: usize,
    verbose: bool,
    start_time: Instant,
}

impl ProgressTracker {
    fn new(total: usize, interval: usize, verbose: bool) -> Self {
        Self {
            total,
            processed: AtomicUsize::new(0),
            succeeded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            interval,
            verbose,
            start_time: Instant::now(),
        }
    }

    fn record_success(&self, matrix: &str) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.succeeded.fetch_add(1, Ordering::Relaxed);

        if self.should_report(processed) {
            self.report_progress(matrix, true);
        }
    }

    fn record_failure(&self, matrix: &str, error: &CliError) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.failed.fetch_add(1, Ordering::Relaxed);

        if self.verbose {
            eprintln!("{} {} - {}", "✗".red().bold(), matrix, error);
        }

        if self.should_report(processed) {
            self.report_progress(matrix, false);
        }
    }

    fn should_report(&self, processed: usize) -> bool {
        self.interval > 0 && (processed % self.interval == 0 || processed == self.total)
    }

    fn report_progress(&self, matrix: &str, success: bool) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);

        if self.verbose {
            let status = if success {
                "✓".green().bold()
            } else {
                "✗".red().bold()
            };
            eprintln!("{} [{}/{}] {}", status, processed, self.total, matrix);
        } else {
            eprintln!(
                "Progress: [{}/{}] {} succeeded, {} failed",
                processed, self.total, succeeded, failed
            );
        }
    }

    /// Summary goes to stderr; stdout may carry the command's data.
    fn print_summary(&self, operation_name: &str) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let elapsed = self.start_time.elapsed();

        eprintln!();
        eprintln!("{}", "═".repeat(60).bright_blue());
        eprintln!(
            "{} {}",
            "Batch Operation:".bright_blue().bold(),
            operation_name.bright_white()
        );
        eprintln!("{}", "═".repeat(60).bright_blue());
        eprintln!(
            "  {} {}",
            "Matrices:".bright_cyan(),
            processed.to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "Succeeded:".green().bold(),
            succeeded.to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "Failed:".red().bold(),
            failed.to_string().bright_white()
        );
        eprintln!("  {} {:.2}s", "Elapsed:".bright_cyan(), elapsed.as_secs_f64());
        eprintln!("{}", "═".repeat(60).bright_blue());
    }
}

/// Runs a [`BatchOperation`] over the matrices of a table.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn default_config() -> Self {
        Self::new(BatchConfig::default())
    }

    /// Process `matrices` with `operation`.
    ///
    /// Uses Rayon when `matrices.len() >= config.parallel_threshold`. Every
    /// matrix yields exactly one [`MatrixResult`], in input order.
    pub fn process<O>(
        &self,
        table: &SampleTable,
        matrices: &[&str],
        operation: O,
        show_progress: bool,
    ) -> BatchResults<O::Output>
    where
        O: BatchOperation,
    {
        let start_time = Instant::now();

        if matrices.is_empty() {
            return BatchResults::new(vec![], 0);
        }

        if let Some(max_threads) = self.config.max_threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads)
                .build_global()
                .ok(); // already initialized by an earlier batch
        }

        let tracker = show_progress.then(|| {
            ProgressTracker::new(
                matrices.len(),
                self.config.progress_interval,
                self.config.verbose,
            )
        });

        let run = |matrix: &&str| {
            let result = operation.process_matrix(table, matrix);
            if let Some(t) = &tracker {
                match &result {
                    Ok(_) => t.record_success(matrix),
                    Err(e) => t.record_failure(matrix, e),
                }
            }
            MatrixResult {
                matrix: matrix.to_string(),
                result,
            }
        };

        let results: Vec<MatrixResult<O::Output>> =
            if matrices.len() < self.config.parallel_threshold {
                matrices.iter().map(run).collect()
            } else {
                matrices.par_iter().map(run).collect()
            };

        if let Some(tracker) = tracker {
            tracker.print_summary(operation.name());
        }

        tracing::debug!(
            operation = operation.name(),
            matrices = matrices.len(),
            "batch finished"
        );
        BatchResults::new(results, start_time.elapsed().as_millis())
    }
}

// ============================================================================
// Standard Operations
// ============================================================================

/// Derive speedup and efficiency for every matrix.
#[derive(Debug, Clone)]
pub struct DeriveOperation {
    pub query: MetricQuery,
}

impl BatchOperation for DeriveOperation {
    type Output = Derivation;

    fn process_matrix(&self, table: &SampleTable, matrix: &str) -> Result<Derivation, CliError> {
        Ok(compute(table, matrix, &self.query)?)
    }

    fn name(&self) -> &str {
        "derive metrics"
    }
}

/// Build one chart per matrix and write it to `out_dir`.
///
/// Yields the written path, or `None` when the chart would have no data.
#[derive(Debug, Clone)]
pub struct ChartOperation {
    pub kind: ChartKind,
    pub config: ChartConfig,
    pub format: ChartFormat,
    pub out_dir: PathBuf,
}

impl BatchOperation for ChartOperation {
    type Output = Option<PathBuf>;

    fn process_matrix(
        &self,
        table: &SampleTable,
        matrix: &str,
    ) -> Result<Option<PathBuf>, CliError> {
        let chart = build_chart(table, matrix, self.kind, &self.config)?;
        if chart.is_empty() {
            tracing::warn!(matrix, kind = self.kind.as_str(), "no data to chart");
            return Ok(None);
        }
        write_chart(&chart, self.format, &self.out_dir).map(Some)
    }

    fn name(&self) -> &str {
        self.kind.as_str()
    }
}
