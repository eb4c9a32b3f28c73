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

//! CLI command definitions and argument parsing.
//!
//! Commands are grouped by category and flattened into one top-level
//! command list:
//!
//! ```text
//! Commands
//! ├── Analysis (load, metrics)
//! ├── Charts   (speedup, efficiency, schedules, chunk-effect)
//! └── Utility  (completion)
//! ```

mod analysis;
mod args;
mod charts;
mod utility;

use clap::{Parser, Subcommand};

pub use analysis::AnalysisCommands;
pub use args::{parse_schedule, BatchArgs, ChartOutputArgs, InputArgs};
pub use charts::ChartCommands;
pub use utility::UtilityCommands;

/// spmv-metrics - speedup and efficiency analysis of SpMV benchmark results
///
/// Reads the CSV written by the SpMV benchmark driver (sequential and OpenMP
/// runs under varying thread counts, schedules and chunk sizes) and derives
/// speedup and parallel efficiency per configuration.
///
/// # Examples
///
/// ```bash
/// # Preview the normalized table
/// spmv-metrics load results/benchmark.csv
///
/// # Metrics table as CSV
/// spmv-metrics metrics results/benchmark.csv --format csv -o metrics.csv
///
/// # Speedup chart data for every matrix, as JSON
/// spmv-metrics speedup results/benchmark.csv --format json --out-dir plots
/// ```
#[derive(Parser)]
#[command(name = "spmv-metrics")]
#[command(author, version, about = "Speedup and efficiency metrics for SpMV benchmarks", long_about = None)]
pub struct Cli {
    /// Log progress details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Analysis(AnalysisCommands),

    #[command(flatten)]
    Charts(ChartCommands),

    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` with a user-facing message if the command fails.
    pub fn execute(self) -> Result<(), String> {
        match self {
            Commands::Analysis(cmd) => cmd.execute(),
            Commands::Charts(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
