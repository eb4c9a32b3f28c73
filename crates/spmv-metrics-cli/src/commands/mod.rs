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

//! CLI command implementations

mod charts;
mod completion;
mod load;
mod metrics;

pub use charts::chart;
pub use completion::{generate_completion_for_command, print_installation_instructions};
pub use load::load;
pub use metrics::{metrics, TableFormat};

use crate::error::CliError;
use spmv_metrics_core::Normalized;
use spmv_metrics_csv::{from_csv_with_config, FromCsvConfig};
use std::fs;
use std::io::{self, Write};

/// Default maximum input file size (1 GB).
/// Can be overridden via the `SPMV_METRICS_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Environment variable overriding [`DEFAULT_MAX_FILE_SIZE`] (in bytes).
pub const MAX_FILE_SIZE_ENV: &str = "SPMV_METRICS_MAX_FILE_SIZE";

fn get_max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file from disk with size validation.
///
/// Files larger than the configured maximum are rejected before any memory is
/// allocated for their content.
///
/// # Errors
///
/// - `FileTooLarge` if the file exceeds `SPMV_METRICS_MAX_FILE_SIZE`
/// - `Io` if the metadata or content cannot be read, or is not UTF-8
pub fn read_file(path: &str) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Write content to a file or stdout.
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error("<stdout>", e)),
    }
}

/// Read and normalize a benchmark table.
///
/// Normalization warnings are logged; the returned [`Normalized`] still
/// carries them for commands that report them.
pub fn load_table(path: &str, config: &FromCsvConfig) -> Result<Normalized, CliError> {
    let content = read_file(path)?;
    let normalized = from_csv_with_config(&content, config)?;
    tracing::info!(
        path,
        rows = normalized.table.len(),
        dropped = normalized.dropped,
        warnings = normalized.warnings.len(),
        "loaded benchmark table"
    );
    Ok(normalized)
}
