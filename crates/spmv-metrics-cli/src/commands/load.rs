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

//! Load command - preview a normalized benchmark table

use super::load_table;
use spmv_metrics_core::{Normalized, Sample};
use spmv_metrics_csv::FromCsvConfig;

/// Load and normalize a benchmark CSV, then print its first `rows` samples and
/// a summary (sample count, dropped records, warnings, matrices).
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or parsed, or if strict
/// normalization rejects a record.
pub fn load(file: &str, rows: usize, config: &FromCsvConfig) -> Result<(), String> {
    let normalized = load_table(file, config).map_err(|e| e.to_string())?;
    print!("{}", preview(&normalized, rows));
    Ok(())
}

fn preview(normalized: &Normalized, rows: usize) -> String {
    let table = &normalized.table;
    let head: Vec<[String; 6]> = table.samples().iter().take(rows).map(cells).collect();

    let header = ["matrix", "mode", "schedule", "threads", "chunk", "p90"];
    let mut widths = header.map(str::len);
    for row in &head {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(&header.map(str::to_string), &widths));
    for row in &head {
        out.push_str(&format_row(row, &widths));
    }
    if table.len() > head.len() {
        out.push_str(&format!("... {} more\n", table.len() - head.len()));
    }

    out.push('\n');
    out.push_str(&format!(
        "Samples: {} (dropped {}, warnings {})\n",
        table.len(),
        normalized.dropped,
        normalized.warnings.len()
    ));
    out.push_str(&format!("Matrices: {}\n", table.matrices().join(", ")));
    for warning in &normalized.warnings {
        out.push_str(&format!("  warning: {}\n", warning));
    }
    out
}

fn cells(sample: &Sample) -> [String; 6] {
    let missing = || "-".to_string();
    [
        sample.matrix.clone(),
        sample.mode.to_string(),
        sample.schedule.map_or_else(missing, |s| s.to_string()),
        sample.threads.map_or_else(missing, |t| t.to_string()),
        sample.chunk.map_or_else(missing, |c| c.to_string()),
        sample.p90.map_or_else(missing, |p| p.to_string()),
    ]
}

fn format_row(row: &[String; 6], widths: &[usize; 6]) -> String {
    let mut line = row
        .iter()
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    line.truncate(line.trim_end().len());
    line.push('\n');
    line
}
