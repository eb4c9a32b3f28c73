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

//! Chart data for speedup, efficiency, schedule and chunk-size views.
//!
//! Charts are plain data ([`Chart`] → [`Series`] → [`Point`]) built from derived
//! metrics and rendered as text, JSON or CSV. Presentation constants live in an
//! immutable [`ChartConfig`] passed to every builder.

mod build;
mod render;

pub use build::{build_chart, chunk_effect_chart, efficiency_chart, schedule_chart, speedup_chart};
pub use render::{render, write_chart};

use serde::Serialize;
use spmv_metrics_core::Schedule;
use std::collections::BTreeMap;

/// Presentation settings shared by all chart builders.
///
/// # Examples
///
/// ```rust
/// use spmv_metrics_cli::chart::ChartConfig;
/// use spmv_metrics_core::Schedule;
///
/// let config = ChartConfig::default();
/// assert_eq!(config.target_matrix, "pdb1HYS.mtx");
/// assert_eq!(config.threads_to_compare, vec![24, 96]);
/// assert_eq!(config.color(Schedule::Dynamic), Some("tab:red"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Matrix examined by the chunk-size chart.
    pub target_matrix: String,
    /// Thread counts drawn as separate series in comparison charts.
    pub threads_to_compare: Vec<u32>,
    /// Schedules drawn, in presentation order.
    pub schedules: Vec<Schedule>,
    /// Series color per schedule.
    pub colors: BTreeMap<Schedule, String>,
    /// Number of evenly spaced y ticks from zero to the maximum.
    pub y_tick_count: usize,
    /// Chunk size held fixed by the speedup, efficiency and schedule charts.
    pub chunk: u32,
    /// Schedule held fixed by the chunk-size chart.
    pub chunk_effect_schedule: Schedule,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let colors = [
            (Schedule::Static, "tab:blue"),
            (Schedule::Dynamic, "tab:red"),
            (Schedule::Guided, "tab:green"),
        ]
        .into_iter()
        .map(|(s, c)| (s, c.to_string()))
        .collect();

        Self {
            target_matrix: "pdb1HYS.mtx".to_string(),
            threads_to_compare: vec![24, 96],
            schedules: Schedule::ALL.to_vec(),
            colors,
            y_tick_count: 8,
            chunk: 1,
            chunk_effect_schedule: Schedule::Dynamic,
        }
    }
}

impl ChartConfig {
    pub fn color(&self, schedule: Schedule) -> Option<&str> {
        self.colors.get(&schedule).map(String::as_str)
    }
}

/// The four chart families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Speedup,
    Efficiency,
    Schedule,
    ChunkEffect,
}

impl ChartKind {
    /// File name prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Speedup => "speedup",
            ChartKind::Efficiency => "efficiency",
            ChartKind::Schedule => "schedule",
            ChartKind::ChunkEffect => "chunk_effect",
        }
    }
}

/// Output encoding of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartFormat {
    /// Aligned text with horizontal bars
    Text,
    /// Pretty-printed JSON document
    Json,
    /// One row per point
    Csv,
}

impl ChartFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ChartFormat::Text => "txt",
            ChartFormat::Json => "json",
            ChartFormat::Csv => "csv",
        }
    }
}

/// A single chart: titled axes, tick marks and one or more series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub matrix: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_ticks: Vec<String>,
    pub y_ticks: Vec<f64>,
    pub series: Vec<Series>,
}

impl Chart {
    /// `true` when no series has any point.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Largest y value over all series, `0.0` for an empty chart.
    pub fn max_y(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter())
            .map(|p| p.y)
            .fold(0.0, f64::max)
    }

    /// `<kind>_<matrix>.<ext>`, with path separators in the matrix name replaced.
    ///
    /// ```rust
    /// # use spmv_metrics_cli::chart::{Chart, ChartFormat, ChartKind};
    /// let chart = Chart {
    ///     kind: ChartKind::ChunkEffect,
    ///     matrix: "pdb1HYS.mtx".to_string(),
    ///     title: String::new(),
    ///     x_label: String::new(),
    ///     y_label: String::new(),
    ///     x_ticks: vec![],
    ///     y_ticks: vec![],
    ///     series: vec![],
    /// };
    /// assert_eq!(chart.file_name(ChartFormat::Json), "chunk_effect_pdb1HYS.mtx.json");
    /// ```
    pub fn file_name(&self, format: ChartFormat) -> String {
        let matrix: String = self
            .matrix
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        format!("{}_{}.{}", self.kind.as_str(), matrix, format.extension())
    }
}

/// One labelled line of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub points: Vec<Point>,
}

/// A plotted value with its annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    /// Category or numeric position on the x axis, as displayed.
    pub x: String,
    pub y: f64,
    /// Text drawn next to the point.
    pub label: String,
}

/// `count` evenly spaced values from `0` to `max`, rounded to two decimals.
///
/// ```rust
/// use spmv_metrics_cli::chart::y_ticks;
///
/// assert_eq!(y_ticks(7.0, 8), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
/// assert_eq!(y_ticks(1.0, 4), vec![0.0, 0.33, 0.67, 1.0]);
/// ```
pub fn y_ticks(max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = max / (count - 1) as f64;
            (0..count)
                .map(|i| round2(step * i as f64))
                .collect()
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colors_cover_all_schedules() {
        let config = ChartConfig::default();
        for schedule in Schedule::ALL {
            assert!(config.color(schedule).is_some());
        }
        assert_eq!(config.color(Schedule::Static), Some("tab:blue"));
        assert_eq!(config.y_tick_count, 8);
        assert_eq!(config.chunk, 1);
        assert_eq!(config.chunk_effect_schedule, Schedule::Dynamic);
    }

    #[test]
    fn test_y_ticks_edges() {
        assert!(y_ticks(5.0, 0).is_empty());
        assert_eq!(y_ticks(5.0, 1), vec![0.0]);
        assert_eq!(y_ticks(0.0, 3), vec![0.0, 0.0, 0.0]);
        let ticks = y_ticks(48.0, 8);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&48.0));
        assert_eq!(ticks[1], 6.86);
    }

    #[test]
    fn test_file_name_replaces_separators() {
        let chart = Chart {
            kind: ChartKind::Speedup,
            matrix: "suite/cant.mtx".to_string(),
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            x_ticks: vec![],
            y_ticks: vec![],
            series: vec![],
        };
        assert_eq!(chart.file_name(ChartFormat::Text), "speedup_suite_cant.mtx.txt");
        assert!(chart.is_empty());
        assert_eq!(chart.max_y(), 0.0);
    }
}
