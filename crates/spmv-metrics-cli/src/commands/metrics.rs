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

//! Metrics command - speedup and efficiency table for every parallel configuration

use super::{load_table, write_output};
use crate::batch::{BatchConfig, BatchProcessor, BatchResults, DeriveOperation};
use crate::error::CliError;
use colored::Colorize;
use serde::Serialize;
use spmv_metrics_core::{
    Derivation, DerivedMetric, GroupKeys, MetricQuery, Normalized, SampleFilter, Warning,
};
use spmv_metrics_csv::{to_csv, FromCsvConfig};

/// Output encoding of the metrics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TableFormat {
    /// Aligned columns
    Table,
    /// CSV with a header row
    Csv,
    /// JSON report with metrics, load and derivation warnings, and failed matrices
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    metrics: Vec<&'a DerivedMetric>,
    /// Records dropped while loading the table.
    dropped: usize,
    /// Per-record problems found while loading the table.
    input_warnings: &'a [Warning],
    /// Groups skipped during derivation.
    warnings: Vec<&'a Warning>,
    failures: Vec<Failure<'a>>,
}

#[derive(Serialize)]
struct Failure<'a> {
    matrix: &'a str,
    error: String,
}

/// Derive speedup and efficiency for every `(schedule, threads, chunk)` group.
///
/// `matrix` restricts the run to one matrix and `chunk` to one chunk size.
/// Matrices without a usable baseline are reported on stderr; the command only
/// fails when no matrix produced metrics.
///
/// # Errors
///
/// Returns `Err` if the input cannot be loaded, the requested matrix is not in
/// the table, every matrix failed, or the output cannot be written.
#[allow(clippy::too_many_arguments)]
pub fn metrics(
    file: &str,
    matrix: Option<&str>,
    chunk: Option<u32>,
    format: TableFormat,
    output: Option<&str>,
    input: &FromCsvConfig,
    batch: BatchConfig,
    show_progress: bool,
) -> Result<(), String> {
    run(file, matrix, chunk, format, output, input, batch, show_progress).map_err(|e| e.to_string())
}

#[allow(clippy::too_many_arguments)]
fn run(
    file: &str,
    matrix: Option<&str>,
    chunk: Option<u32>,
    format: TableFormat,
    output: Option<&str>,
    input: &FromCsvConfig,
    batch: BatchConfig,
    show_progress: bool,
) -> Result<(), CliError> {
    let normalized = load_table(file, input)?;
    let table = &normalized.table;

    let matrices = match matrix {
        Some(m) if !table.matrices().contains(&m) => {
            return Err(CliError::invalid_input(format!("matrix '{}' not found", m)));
        }
        Some(m) => vec![m],
        None => table.matrices(),
    };

    let mut filter = SampleFilter::omp();
    if let Some(c) = chunk {
        filter = filter.with_chunk(c);
    }
    let operation = DeriveOperation {
        query: MetricQuery::new(filter, GroupKeys::ALL),
    };

    let results =
        BatchProcessor::new(batch).process(table, &matrices, operation, show_progress);

    for failure in results.failures() {
        if let Err(e) = &failure.result {
            eprintln!("{} {}", "skipped:".yellow().bold(), e);
        }
    }
    if !matrices.is_empty() && results.success_count() == 0 {
        return Err(CliError::Metrics("no matrix produced metrics".to_string()));
    }

    let content = render(&normalized, &results, format)?;
    write_output(&content, output)
}

fn render(
    normalized: &Normalized,
    results: &BatchResults<Derivation>,
    format: TableFormat,
) -> Result<String, CliError> {
    let derivations: Vec<&Derivation> = results
        .successes()
        .filter_map(|r| r.result.as_ref().ok())
        .collect();
    let metrics: Vec<&DerivedMetric> = derivations.iter().flat_map(|d| d.metrics.iter()).collect();

    match format {
        TableFormat::Csv => {
            let owned: Vec<DerivedMetric> = metrics.into_iter().cloned().collect();
            Ok(to_csv(&owned)?)
        }
        TableFormat::Json => {
            let report = Report {
                metrics,
                dropped: normalized.dropped,
                input_warnings: &normalized.warnings,
                warnings: derivations.iter().flat_map(|d| d.warnings.iter()).collect(),
                failures: results
                    .failures()
                    .filter_map(|r| {
                        r.result.as_ref().err().map(|e| Failure {
                            matrix: &r.matrix,
                            error: e.to_string(),
                        })
                    })
                    .collect(),
            };
            Ok(serde_json::to_string_pretty(&report)? + "\n")
        }
        TableFormat::Table => Ok(render_table(&metrics)),
    }
}

fn render_table(metrics: &[&DerivedMetric]) -> String {
    let header = [
        "matrix",
        "schedule",
        "threads",
        "chunk",
        "best_p90",
        "speedup",
        "efficiency",
    ];
    let rows: Vec<[String; 7]> = metrics
        .iter()
        .map(|m| {
            [
                m.matrix.clone(),
                m.schedule.map_or_else(|| "-".to_string(), |s| s.to_string()),
                m.threads.to_string(),
                m.chunk.map_or_else(|| "-".to_string(), |c| c.to_string()),
                format!("{:.6}", m.best_p90),
                format!("{:.3}", m.speedup),
                format!("{:.3}", m.efficiency),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(i, (cell, &width))| {
                // Text columns left-aligned, numbers right-aligned.
                if i < 2 {
                    format!("{:<width$}", cell, width = width)
                } else {
                    format!("{:>width$}", cell, width = width)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    out.push_str(&line(header.to_vec()));
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}
