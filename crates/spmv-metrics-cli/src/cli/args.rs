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

//! Argument groups shared by several commands.

use crate::batch::BatchConfig;
use crate::chart::ChartFormat;
use clap::Args;
use spmv_metrics_core::Schedule;
use spmv_metrics_csv::FromCsvConfig;
use std::path::PathBuf;

/// Benchmark CSV input.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Benchmark CSV file
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Input has no header row (benchmark driver column order)
    #[arg(long)]
    pub no_headers: bool,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Fail on the first record with an invalid mode instead of dropping it
    #[arg(long)]
    pub strict: bool,
}

impl InputArgs {
    /// CSV reader configuration for these arguments.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the delimiter is not an ASCII character.
    pub fn csv_config(&self) -> Result<FromCsvConfig, String> {
        if !self.delimiter.is_ascii() {
            return Err(format!(
                "delimiter '{}' must be an ASCII character",
                self.delimiter
            ));
        }
        let delimiter = self.delimiter as u8;
        Ok(FromCsvConfig {
            delimiter,
            has_headers: !self.no_headers,
            strict: self.strict,
            ..Default::default()
        })
    }
}

/// Parallel per-matrix processing.
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Print per-matrix progress and a summary to stderr
    #[arg(long)]
    pub progress: bool,

    /// Maximum worker threads (defaults to the number of CPUs)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl BatchArgs {
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            max_threads: self.jobs,
            verbose: self.progress,
            ..Default::default()
        }
    }
}

/// Chart output location and encoding.
#[derive(Args, Debug, Clone)]
pub struct ChartOutputArgs {
    /// Directory receiving `<kind>_<matrix>.<ext>` files (created if missing)
    #[arg(long, value_name = "DIR", default_value = "plots")]
    pub out_dir: PathBuf,

    /// Chart encoding
    #[arg(short, long, value_enum, default_value_t = ChartFormat::Text)]
    pub format: ChartFormat,
}

/// Parse a schedule name for clap.
pub fn parse_schedule(value: &str) -> Result<Schedule, String> {
    Schedule::parse(&value.trim().to_lowercase()).ok_or_else(|| {
        format!(
            "unknown schedule '{}' (expected static, dynamic or guided)",
            value
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_config() {
        let args = InputArgs {
            file: "bench.csv".to_string(),
            no_headers: true,
            delimiter: ';',
            strict: true,
        };
        let config = args.csv_config().unwrap();
        assert_eq!(config.delimiter, b';');
        assert!(!config.has_headers);
        assert!(config.strict);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let args = InputArgs {
            file: "bench.csv".to_string(),
            no_headers: false,
            delimiter: '→',
            strict: false,
        };
        assert!(args.csv_config().is_err());

        let latin1 = InputArgs {
            delimiter: 'é',
            ..args
        };
        assert!(latin1.csv_config().unwrap_err().contains("ASCII"));
    }

    #[test]
    fn test_parse_schedule() {
        assert_eq!(parse_schedule("Guided"), Ok(Schedule::Guided));
        assert!(parse_schedule("auto").unwrap_err().contains("auto"));
    }
}
