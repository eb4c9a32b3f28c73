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

//! Write derived metrics as CSV.

use crate::error::{CsvError, Result};
use spmv_metrics_core::DerivedMetric;
use std::io::Write;

/// Column names of the derived metric table.
pub const METRIC_COLUMNS: [&str; 7] = [
    "matrix",
    "schedule",
    "threads",
    "chunk",
    "best_p90",
    "speedup",
    "efficiency",
];

/// Configuration for CSV output.
#[derive(Debug, Clone)]
pub struct ToCsvConfig {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Include header row (default: true)
    pub include_headers: bool,
    /// Quote style for fields (default: necessary)
    pub quote_style: csv::QuoteStyle,
}

impl Default for ToCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_headers: true,
            quote_style: csv::QuoteStyle::Necessary,
        }
    }
}

/// Convert derived metrics to a CSV string.
///
/// Fields that are not part of the grouping key are written as empty cells.
///
/// # Example
///
/// ```
/// use spmv_metrics_core::{DerivedMetric, Schedule};
/// use spmv_metrics_csv::to_csv;
///
/// let metrics = vec![DerivedMetric {
///     matrix: "m.mtx".to_string(),
///     schedule: Some(Schedule::Static),
///     threads: 2,
///     chunk: None,
///     best_p90: 0.8,
///     speedup: 2.5,
///     efficiency: 1.25,
/// }];
/// let csv = to_csv(&metrics).unwrap();
/// assert_eq!(
///     csv,
///     "matrix,schedule,threads,chunk,best_p90,speedup,efficiency\nm.mtx,static,2,,0.8,2.5,1.25\n"
/// );
/// ```
pub fn to_csv(metrics: &[DerivedMetric]) -> Result<String> {
    to_csv_with_config(metrics, ToCsvConfig::default())
}

/// Convert derived metrics to a CSV string with custom configuration.
pub fn to_csv_with_config(metrics: &[DerivedMetric], config: ToCsvConfig) -> Result<String> {
    let mut buffer = Vec::new();
    to_csv_writer_with_config(metrics, &mut buffer, config)?;
    String::from_utf8(buffer).map_err(|e| CsvError::ParseError {
        line: 0,
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

/// Write derived metrics to any writer.
pub fn to_csv_writer<W: Write>(metrics: &[DerivedMetric], writer: W) -> Result<()> {
    to_csv_writer_with_config(metrics, writer, ToCsvConfig::default())
}

/// Write derived metrics to any writer with custom configuration.
pub fn to_csv_writer_with_config<W: Write>(
    metrics: &[DerivedMetric],
    writer: W,
    config: ToCsvConfig,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote_style(config.quote_style)
        .from_writer(writer);

    if config.include_headers {
        wtr.write_record(METRIC_COLUMNS)?;
    }

    for metric in metrics {
        wtr.write_record(metric_record(metric))?;
    }

    wtr.flush()?;
    Ok(())
}

fn metric_record(metric: &DerivedMetric) -> [String; 7] {
    [
        metric.matrix.clone(),
        metric
            .schedule
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        metric.threads.to_string(),
        metric.chunk.map(|c| c.to_string()).unwrap_or_default(),
        metric.best_p90.to_string(),
        metric.speedup.to_string(),
        metric.efficiency.to_string(),
    ]
}
