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

//! Chart commands: one data file per matrix and view.

use super::args::{parse_schedule, BatchArgs, ChartOutputArgs, InputArgs};
use crate::chart::{ChartConfig, ChartKind};
use crate::commands;
use clap::Subcommand;
use spmv_metrics_core::Schedule;

/// Commands writing chart data files.
///
/// Every chart command writes `<out-dir>/<kind>_<matrix>.<ext>` and prints the
/// written paths.
#[derive(Subcommand)]
pub enum ChartCommands {
    /// Speedup curves per schedule at a fixed chunk size
    Speedup {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: ChartOutputArgs,

        #[command(flatten)]
        batch: BatchArgs,

        /// Only this matrix
        #[arg(short, long)]
        matrix: Option<String>,

        /// Chunk size held fixed
        #[arg(short, long, default_value_t = 1)]
        chunk: u32,
    },

    /// Parallel efficiency curves per schedule at a fixed chunk size
    Efficiency {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: ChartOutputArgs,

        #[command(flatten)]
        batch: BatchArgs,

        /// Only this matrix
        #[arg(short, long)]
        matrix: Option<String>,

        /// Chunk size held fixed
        #[arg(short, long, default_value_t = 1)]
        chunk: u32,
    },

    /// Best p90 of each schedule at selected thread counts
    Schedules {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: ChartOutputArgs,

        #[command(flatten)]
        batch: BatchArgs,

        /// Only this matrix
        #[arg(short, long)]
        matrix: Option<String>,

        /// Chunk size held fixed
        #[arg(short, long, default_value_t = 1)]
        chunk: u32,

        /// Thread counts to compare
        #[arg(short, long, value_delimiter = ',', default_values_t = [24, 96])]
        threads: Vec<u32>,
    },

    /// Best p90 per chunk size for one matrix and schedule
    ChunkEffect {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: ChartOutputArgs,

        /// Matrix to examine
        #[arg(short, long, default_value = "pdb1HYS.mtx")]
        matrix: String,

        /// Schedule held fixed
        #[arg(short, long, value_parser = parse_schedule, default_value = "dynamic")]
        schedule: Schedule,

        /// Thread counts to compare
        #[arg(short, long, value_delimiter = ',', default_values_t = [24, 96])]
        threads: Vec<u32>,
    },
}

impl ChartCommands {
    /// Execute the chart command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the input cannot be read or no chart was written.
    pub fn execute(self) -> Result<(), String> {
        match self {
            ChartCommands::Speedup {
                input,
                output,
                batch,
                matrix,
                chunk,
            } => run(
                ChartKind::Speedup,
                input,
                output,
                batch,
                matrix.as_deref(),
                ChartConfig {
                    chunk,
                    ..Default::default()
                },
            ),
            ChartCommands::Efficiency {
                input,
                output,
                batch,
                matrix,
                chunk,
            } => run(
                ChartKind::Efficiency,
                input,
                output,
                batch,
                matrix.as_deref(),
                ChartConfig {
                    chunk,
                    ..Default::default()
                },
            ),
            ChartCommands::Schedules {
                input,
                output,
                batch,
                matrix,
                chunk,
                threads,
            } => run(
                ChartKind::Schedule,
                input,
                output,
                batch,
                matrix.as_deref(),
                ChartConfig {
                    chunk,
                    threads_to_compare: threads,
                    ..Default::default()
                },
            ),
            ChartCommands::ChunkEffect {
                input,
                output,
                matrix,
                schedule,
                threads,
            } => run(
                ChartKind::ChunkEffect,
                input,
                output,
                BatchArgs {
                    progress: false,
                    jobs: None,
                },
                None,
                ChartConfig {
                    target_matrix: matrix,
                    chunk_effect_schedule: schedule,
                    threads_to_compare: threads,
                    ..Default::default()
                },
            ),
        }
    }
}

fn run(
    kind: ChartKind,
    input: InputArgs,
    output: ChartOutputArgs,
    batch: BatchArgs,
    matrix: Option<&str>,
    config: ChartConfig,
) -> Result<(), String> {
    commands::chart(
        &input.file,
        kind,
        matrix,
        config,
        output.format,
        &output.out_dir,
        &input.csv_config()?,
        batch.batch_config(),
        batch.progress,
    )
}
