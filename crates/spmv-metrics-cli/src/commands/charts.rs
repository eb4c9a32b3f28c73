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

//! Chart commands - speedup, efficiency, schedule and chunk-size chart files

use super::load_table;
use crate::batch::{BatchConfig, BatchProcessor, ChartOperation};
use crate::chart::{ChartConfig, ChartFormat, ChartKind};
use crate::error::CliError;
use colored::Colorize;
use spmv_metrics_csv::FromCsvConfig;
use std::path::Path;

/// Write one `kind` chart per matrix into `out_dir`.
///
/// Speedup, efficiency and schedule charts cover every matrix of the table
/// unless `matrix` names one. The chunk-size chart covers only
/// `config.target_matrix`, or `matrix` when given.
///
/// Matrices that cannot be charted (no baseline, no data) are reported and
/// skipped; the command fails only if no chart was written.
///
/// # Errors
///
/// Returns `Err` if the input cannot be loaded, the requested matrix is not in
/// the table, or no chart could be written.
#[allow(clippy::too_many_arguments)]
pub fn chart(
    file: &str,
    kind: ChartKind,
    matrix: Option<&str>,
    config: ChartConfig,
    format: ChartFormat,
    out_dir: &Path,
    input: &FromCsvConfig,
    batch: BatchConfig,
    show_progress: bool,
) -> Result<(), String> {
    let normalized = load_table(file, input).map_err(|e| e.to_string())?;
    let table = &normalized.table;

    let selected = match kind {
        ChartKind::ChunkEffect => Some(matrix.unwrap_or(config.target_matrix.as_str())),
        _ => matrix,
    };
    let matrices = match selected {
        Some(m) if !table.matrices().contains(&m) => {
            return Err(CliError::invalid_input(format!("matrix '{}' not found", m)).to_string());
        }
        Some(m) => vec![m],
        None => table.matrices(),
    };

    let operation = ChartOperation {
        kind,
        config: config.clone(),
        format,
        out_dir: out_dir.to_path_buf(),
    };
    let results = BatchProcessor::new(batch).process(table, &matrices, operation, show_progress);

    let mut written = 0;
    for outcome in &results.results {
        match &outcome.result {
            Ok(Some(path)) => {
                written += 1;
                println!("{} {}", "[Saved]".green().bold(), path.display());
            }
            Ok(None) => eprintln!(
                "{} {}: no data for {} chart",
                "skipped:".yellow().bold(),
                outcome.matrix,
                kind.as_str()
            ),
            Err(e) => eprintln!("{} {}", "skipped:".yellow().bold(), e),
        }
    }

    if written == 0 {
        return Err(format!("no {} chart written", kind.as_str()));
    }
    Ok(())
}
