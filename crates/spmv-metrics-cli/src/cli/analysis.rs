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

//! Table analysis commands: loading and metric derivation.

use super::args::{BatchArgs, InputArgs};
use crate::commands::{self, TableFormat};
use clap::Subcommand;

/// Commands that read a benchmark table and print results.
#[derive(Subcommand)]
pub enum AnalysisCommands {
    /// Load and normalize a benchmark CSV, then preview it
    ///
    /// Prints the first rows of the normalized table, the number of dropped
    /// records and every normalization warning.
    Load {
        #[command(flatten)]
        input: InputArgs,

        /// Number of rows to preview
        #[arg(short = 'n', long, default_value_t = 5)]
        rows: usize,
    },

    /// Speedup and efficiency for every parallel configuration
    ///
    /// Groups parallel runs by (schedule, threads, chunk), keeps the best p90
    /// of each group and divides the best sequential p90 by it. Matrices
    /// without a sequential run are reported and skipped.
    Metrics {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        batch: BatchArgs,

        /// Only this matrix
        #[arg(short, long)]
        matrix: Option<String>,

        /// Only runs with this chunk size
        #[arg(short, long)]
        chunk: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = TableFormat::Table)]
        format: TableFormat,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl AnalysisCommands {
    /// Execute the analysis command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the command execution fails.
    pub fn execute(self) -> Result<(), String> {
        match self {
            AnalysisCommands::Load { input, rows } => {
                commands::load(&input.file, rows, &input.csv_config()?)
            }
            AnalysisCommands::Metrics {
                input,
                batch,
                matrix,
                chunk,
                format,
                output,
            } => commands::metrics(
                &input.file,
                matrix.as_deref(),
                chunk,
                format,
                output.as_deref(),
                &input.csv_config()?,
                batch.batch_config(),
                batch.progress,
            ),
        }
    }
}
