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

//! Chart encoders and file output.

use super::{Chart, ChartFormat};
use crate::error::CliError;
use std::fs;
use std::path::{Path, PathBuf};

const BAR_WIDTH: usize = 40;

/// Encode a chart in the requested format.
///
/// # Errors
///
/// Returns `Err` only if JSON or CSV serialization fails.
pub fn render(chart: &Chart, format: ChartFormat) -> Result<String, CliError> {
    match format {
        ChartFormat::Text => Ok(render_text(chart)),
        ChartFormat::Json => Ok(serde_json::to_string_pretty(chart)? + "\n"),
        ChartFormat::Csv => render_csv(chart),
    }
}

/// Render `chart` into `out_dir/<kind>_<matrix>.<ext>`, creating the directory
/// if needed, and return the written path.
pub fn write_chart(chart: &Chart, format: ChartFormat, out_dir: &Path) -> Result<PathBuf, CliError> {
    fs::create_dir_all(out_dir).map_err(|e| CliError::io_error(out_dir, e))?;
    let path = out_dir.join(chart.file_name(format));
    let content = render(chart, format)?;
    fs::write(&path, content).map_err(|e| CliError::io_error(&path, e))?;
    tracing::info!(path = %path.display(), "chart written");
    Ok(path)
}

fn render_text(chart: &Chart) -> String {
    let mut out = String::new();
    let max = chart.max_y();
    let x_width = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter())
        .map(|p| p.x.len())
        .max()
        .unwrap_or(0);

    out.push_str(&format!("{}\n", chart.title));
    out.push_str(&format!("{}\n", "=".repeat(chart.title.chars().count())));
    out.push_str(&format!("x: {}    y: {}\n", chart.x_label, chart.y_label));
    out.push_str(&format!("x ticks: {}\n", chart.x_ticks.join(", ")));
    out.push_str(&format!("y ticks: {}\n", join_ticks(&chart.y_ticks)));

    if chart.is_empty() {
        out.push_str("\n(no data)\n");
        return out;
    }

    for series in &chart.series {
        out.push('\n');
        match &series.color {
            Some(color) => out.push_str(&format!("{} [{}]\n", series.label, color)),
            None => out.push_str(&format!("{}\n", series.label)),
        }
        for point in &series.points {
            out.push_str(&format!(
                "  {:>width$}  {}  {:.3}  ({})\n",
                point.x,
                render_bar(point.y, max, BAR_WIDTH),
                point.y,
                point.label,
                width = x_width
            ));
        }
    }
    out
}

fn render_csv(chart: &Chart) -> Result<String, CliError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    let csv_err = |e: csv::Error| CliError::Csv(e.to_string());

    wtr.write_record(["series", "x", "y", "label"]).map_err(csv_err)?;
    for series in &chart.series {
        for point in &series.points {
            wtr.write_record([
                series.label.as_str(),
                point.x.as_str(),
                point.y.to_string().as_str(),
                point.label.as_str(),
            ])
            .map_err(csv_err)?;
        }
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| CliError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CliError::Csv(e.to_string()))
}

fn join_ticks(ticks: &[f64]) -> String {
    ticks
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Horizontal bar of `width` cells, filled in proportion to `value / max`.
fn render_bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 { value / max } else { 0.0 };
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width - filled;

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
