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

//! Read benchmark CSV tables into raw records and normalized samples.

use crate::error::{CsvError, Result};
use spmv_metrics_core::{normalize_with_options, NormalizeOptions, Normalized, RawRecord};
use std::io::Read;

/// Default maximum number of rows to prevent memory exhaustion.
///
/// ```
/// # use spmv_metrics_csv::FromCsvConfig;
/// let config = FromCsvConfig::default();
/// assert_eq!(config.max_rows, 1_000_000);
/// ```
pub const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// Configuration for CSV parsing.
///
/// # Examples
///
/// ```
/// # use spmv_metrics_csv::FromCsvConfig;
/// let config = FromCsvConfig::default();
/// assert_eq!(config.delimiter, b',');
/// assert!(config.has_headers);
/// assert!(config.trim);
/// assert!(!config.strict);
///
/// // Raw output of the benchmark driver, which appends rows without a header
/// let config = FromCsvConfig {
///     has_headers: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct FromCsvConfig {
    /// Field delimiter character (default: `,`).
    pub delimiter: u8,

    /// Whether the first row names the columns (default: `true`).
    ///
    /// With headers, columns are located by name (case-insensitive) and extra
    /// columns are ignored. Without headers the benchmark driver's native order
    /// is assumed: `matrix,mode,threads,schedule,chunk,repeat,p90,max_diff`.
    pub has_headers: bool,

    /// Whether to trim leading/trailing whitespace from fields (default: `true`).
    pub trim: bool,

    /// Maximum number of rows to parse (default: 1,000,000).
    pub max_rows: usize,

    /// Reject the whole table on the first record with an invalid mode instead
    /// of dropping that record (default: `false`).
    pub strict: bool,
}

impl Default for FromCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            trim: true,
            max_rows: DEFAULT_MAX_ROWS,
            strict: false,
        }
    }
}

/// Column positions of the fields a [`RawRecord`] needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    matrix: usize,
    mode: usize,
    schedule: usize,
    threads: usize,
    chunk: usize,
    p90: usize,
}

impl ColumnLayout {
    /// Layout of the rows appended by the benchmark driver.
    const DRIVER: ColumnLayout = ColumnLayout {
        matrix: 0,
        mode: 1,
        threads: 2,
        schedule: 3,
        chunk: 4,
        p90: 6,
    };

    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

        for (position, name) in names.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            if names[..position].contains(name) {
                return Err(CsvError::InvalidHeader {
                    position,
                    reason: format!("duplicate column '{}'", name),
                });
            }
        }

        let find = |column: &str| {
            names
                .iter()
                .position(|n| n == column)
                .ok_or_else(|| CsvError::MissingColumn(column.to_string()))
        };

        Ok(Self {
            matrix: find("matrix")?,
            mode: find("mode")?,
            schedule: find("schedule")?,
            threads: find("threads")?,
            chunk: find("chunk")?,
            p90: find("p90")?,
        })
    }

    fn extract(&self, record: &csv::StringRecord) -> RawRecord {
        let field = |idx: usize| record.get(idx).unwrap_or("");
        RawRecord::new(
            field(self.matrix),
            field(self.mode),
            field(self.schedule),
            field(self.threads),
            field(self.chunk),
            field(self.p90),
        )
    }
}

/// Parse a CSV string into raw records with default configuration.
///
/// # Examples
///
/// ```
/// use spmv_metrics_csv::read_records;
///
/// let csv = "matrix,mode,threads,schedule,chunk,repeat,p90\n\
///            a.mtx,seq,1,na,0,10,2.0\n\
///            a.mtx,omp,4,static,1,10,0.6\n";
/// let records = read_records(csv).unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].schedule, "static");
/// ```
pub fn read_records(csv: &str) -> Result<Vec<RawRecord>> {
    read_records_reader_with_config(csv.as_bytes(), &FromCsvConfig::default())
}

/// Parse a CSV string into raw records with custom configuration.
pub fn read_records_with_config(csv: &str, config: &FromCsvConfig) -> Result<Vec<RawRecord>> {
    read_records_reader_with_config(csv.as_bytes(), config)
}

/// Parse raw records from any reader.
///
/// # Errors
///
/// - `MissingColumn` / `InvalidHeader`: the header does not describe a benchmark table
/// - `ParseError`: malformed CSV or invalid UTF-8
/// - `SecurityLimit`: more than `config.max_rows` records
pub fn read_records_reader_with_config<R: Read>(
    reader: R,
    config: &FromCsvConfig,
) -> Result<Vec<RawRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.has_headers)
        .flexible(true)
        .trim(if config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let layout = if config.has_headers {
        let headers = csv_reader.headers().map_err(|e| CsvError::ParseError {
            line: 1,
            message: e.to_string(),
        })?;
        ColumnLayout::from_headers(headers)?
    } else {
        ColumnLayout::DRIVER
    };

    let header_lines = usize::from(config.has_headers);
    let mut records = Vec::new();

    for (record_idx, result) in csv_reader.records().enumerate() {
        // Security: Limit row count to prevent memory exhaustion
        if record_idx >= config.max_rows {
            return Err(CsvError::SecurityLimit {
                limit: config.max_rows,
                actual: record_idx + 1,
            });
        }

        let record = result.map_err(|e| CsvError::ParseError {
            line: record_idx + 1 + header_lines,
            message: e.to_string(),
        })?;

        if record.is_empty() {
            continue;
        }

        records.push(layout.extract(&record));
    }

    tracing::debug!(rows = records.len(), "read benchmark records");
    Ok(records)
}

/// Read and normalize a benchmark table with default configuration.
///
/// # Examples
///
/// ```
/// use spmv_metrics_csv::from_csv;
///
/// let csv = "matrix,mode,schedule,threads,chunk,p90\n\
///            a.mtx, SEQ ,na,1,0,2.0\n\
///            a.mtx,omp,static,2,1,0.8\n\
///            a.mtx,gpu,static,2,1,0.1\n";
/// let normalized = from_csv(csv).unwrap();
/// assert_eq!(normalized.table.len(), 2);
/// assert_eq!(normalized.dropped, 1);
/// ```
pub fn from_csv(csv: &str) -> Result<Normalized> {
    from_csv_with_config(csv, &FromCsvConfig::default())
}

/// Read and normalize a benchmark table with custom configuration.
pub fn from_csv_with_config(csv: &str, config: &FromCsvConfig) -> Result<Normalized> {
    from_csv_reader_with_config(csv.as_bytes(), config)
}

/// Read and normalize a benchmark table from a reader with default configuration.
///
/// ```no_run
/// use spmv_metrics_csv::from_csv_reader;
/// use std::fs::File;
///
/// let file = File::open("results/benchmark.csv").unwrap();
/// let normalized = from_csv_reader(file).unwrap();
/// ```
pub fn from_csv_reader<R: Read>(reader: R) -> Result<Normalized> {
    from_csv_reader_with_config(reader, &FromCsvConfig::default())
}

/// Read and normalize a benchmark table from a reader.
///
/// # Errors
///
/// Everything [`read_records_reader_with_config`] returns, plus
/// `CsvError::Normalize` when `config.strict` is set and a record has an
/// invalid mode.
pub fn from_csv_reader_with_config<R: Read>(
    reader: R,
    config: &FromCsvConfig,
) -> Result<Normalized> {
    let records = read_records_reader_with_config(reader, config)?;
    let options = NormalizeOptions {
        strict: config.strict,
    };
    Ok(normalize_with_options(&records, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive_and_order_free() {
        let csv = "P90, Chunk ,THREADS,schedule,mode,matrix\n1.5,4,8,guided,omp,x.mtx\n";
        let records = read_records(csv).unwrap();
        assert_eq!(records, vec![RawRecord::new("x.mtx", "omp", "guided", "8", "4", "1.5")]);
    }

    #[test]
    fn test_missing_column() {
        let csv = "matrix,mode,schedule,threads,p90\nx,seq,na,1,2.0\n";
        let err = read_records(csv).unwrap_err();
        assert!(matches!(err, CsvError::MissingColumn(ref c) if c == "chunk"));
    }

    #[test]
    fn test_duplicate_column() {
        let csv = "matrix,mode,schedule,threads,chunk,p90,p90\n";
        let err = read_records(csv).unwrap_err();
        assert!(matches!(err, CsvError::InvalidHeader { position: 6, .. }));
    }

    #[test]
    fn test_driver_layout_without_headers() {
        let csv = "pdb1HYS.mtx,seq,1,na,0,10,12.000000,0.000000000000\n\
                   pdb1HYS.mtx,omp,24,dynamic,1,10,0.800000,0.000000000001\n";
        let config = FromCsvConfig {
            has_headers: false,
            ..Default::default()
        };
        let records = read_records_with_config(csv, &config).unwrap();
        assert_eq!(
            records[1],
            RawRecord::new("pdb1HYS.mtx", "omp", "dynamic", "24", "1", "0.800000")
        );
    }

    #[test]
    fn test_short_rows_yield_empty_fields() {
        let csv = "matrix,mode,schedule,threads,chunk,p90\nx,omp,static\n";
        let records = read_records(csv).unwrap();
        assert_eq!(records[0].threads, "");
        assert_eq!(records[0].p90, "");
    }

    #[test]
    fn test_row_limit() {
        let csv = "matrix,mode,schedule,threads,chunk,p90\nx,seq,na,1,0,1\nx,seq,na,1,0,1\n";
        let config = FromCsvConfig {
            max_rows: 1,
            ..Default::default()
        };
        let err = read_records_with_config(csv, &config).unwrap_err();
        assert!(matches!(err, CsvError::SecurityLimit { limit: 1, actual: 2 }));
    }

    #[test]
    fn test_strict_mode_propagates_format_error() {
        let csv = "matrix,mode,schedule,threads,chunk,p90\nx,mpi,na,1,0,1\n";
        let config = FromCsvConfig {
            strict: true,
            ..Default::default()
        };
        let err = from_csv_with_config(csv, &config).unwrap_err();
        assert!(matches!(err, CsvError::Normalize(_)));
    }

    #[test]
    fn test_tab_delimited() {
        let csv = "matrix\tmode\tschedule\tthreads\tchunk\tp90\nx\tseq\tna\t1\t0\t3.0\n";
        let config = FromCsvConfig {
            delimiter: b'\t',
            ..Default::default()
        };
        let normalized = from_csv_with_config(csv, &config).unwrap();
        assert_eq!(normalized.table.samples()[0].p90, Some(3.0));
    }
}
