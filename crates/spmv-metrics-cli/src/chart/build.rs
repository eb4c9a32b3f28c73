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

//! Chart builders for the four metric views.

use super::{y_ticks, Chart, ChartConfig, ChartKind, Point, Series};
use spmv_metrics_core::{
    best_times, compute, BestTimes, Derivation, DerivedMetric, GroupKey, MetricQuery, Result,
    SampleTable,
};
use std::collections::BTreeSet;

/// Build a chart of `kind` for one matrix of `table`.
///
/// # Errors
///
/// Speedup and efficiency charts fail with `NoBaseline` when the matrix has no
/// usable sequential run. Schedule and chunk-size charts plot raw times and
/// never fail.
pub fn build_chart(
    table: &SampleTable,
    matrix: &str,
    kind: ChartKind,
    config: &ChartConfig,
) -> Result<Chart> {
    match kind {
        ChartKind::Speedup => {
            let derivation = compute(table, matrix, &MetricQuery::fixed_chunk(config.chunk))?;
            Ok(speedup_chart(&derivation, &table.thread_counts(matrix), config))
        }
        ChartKind::Efficiency => {
            let derivation = compute(table, matrix, &MetricQuery::fixed_chunk(config.chunk))?;
            Ok(efficiency_chart(&derivation, config))
        }
        ChartKind::Schedule => {
            let query =
                MetricQuery::schedule_comparison(config.chunk, config.threads_to_compare.clone());
            let best = best_times(table, matrix, &query.filter, query.keys);
            Ok(schedule_chart(matrix, &best, config))
        }
        ChartKind::ChunkEffect => {
            let query = MetricQuery::chunk_effect(
                config.chunk_effect_schedule,
                config.threads_to_compare.clone(),
            );
            let best = best_times(table, matrix, &query.filter, query.keys);
            Ok(chunk_effect_chart(matrix, &best, config))
        }
    }
}

/// Speedup curves of one matrix, one series per schedule.
///
/// `derivation` is expected to come from a fixed-chunk query. The x ticks are
/// the thread counts recorded for the matrix (`thread_counts`), including the
/// sequential run.
pub fn speedup_chart(derivation: &Derivation, thread_counts: &[u32], config: &ChartConfig) -> Chart {
    let series = schedule_series(derivation, config, |m| m.speedup);
    finish(
        Chart {
            kind: ChartKind::Speedup,
            matrix: derivation.matrix.clone(),
            title: format!("Speedup - {}", derivation.matrix),
            x_label: "Threads".to_string(),
            y_label: "Speedup".to_string(),
            x_ticks: thread_counts.iter().map(u32::to_string).collect(),
            y_ticks: Vec::new(),
            series,
        },
        config,
    )
}

/// Parallel efficiency curves of one matrix, one series per schedule.
///
/// The x ticks are the thread counts that produced a metric.
pub fn efficiency_chart(derivation: &Derivation, config: &ChartConfig) -> Chart {
    let series = schedule_series(derivation, config, |m| m.efficiency);
    let threads: BTreeSet<u32> = derivation.metrics.iter().map(|m| m.threads).collect();
    finish(
        Chart {
            kind: ChartKind::Efficiency,
            matrix: derivation.matrix.clone(),
            title: format!("Parallel Efficiency - {}", derivation.matrix),
            x_label: "Threads".to_string(),
            y_label: "Efficiency".to_string(),
            x_ticks: threads.iter().map(u32::to_string).collect(),
            y_ticks: Vec::new(),
            series,
        },
        config,
    )
}

/// Best p90 per schedule, one series per compared thread count.
///
/// `best` must be grouped by `(schedule, threads)`. Schedules without a
/// measurement at a thread count are left out of that series.
pub fn schedule_chart(matrix: &str, best: &BestTimes, config: &ChartConfig) -> Chart {
    let series = config
        .threads_to_compare
        .iter()
        .map(|&threads| {
            let points = config
                .schedules
                .iter()
                .filter_map(|&schedule| {
                    let key = GroupKey {
                        threads: Some(threads),
                        schedule: Some(schedule),
                        chunk: None,
                    };
                    best.get(&key).map(|p90| Point {
                        x: schedule.as_str().to_string(),
                        y: p90,
                        label: format!("{:.3}", p90),
                    })
                })
                .collect();
            Series {
                label: format!("{} threads", threads),
                color: None,
                points,
            }
        })
        .filter(|s: &Series| !s.points.is_empty())
        .collect();

    finish(
        Chart {
            kind: ChartKind::Schedule,
            matrix: matrix.to_string(),
            title: format!("Schedules comparison - {} (chunk = {})", matrix, config.chunk),
            x_label: "Schedule".to_string(),
            y_label: "Time p90 (s)".to_string(),
            x_ticks: config.schedules.iter().map(|s| s.as_str().to_string()).collect(),
            y_ticks: Vec::new(),
            series,
        },
        config,
    )
}

/// Best p90 per chunk size under `config.chunk_effect_schedule`, one series
/// per compared thread count.
///
/// `best` must be grouped by `(threads, chunk)`; its ordering already yields
/// chunks in ascending order within a thread count.
pub fn chunk_effect_chart(matrix: &str, best: &BestTimes, config: &ChartConfig) -> Chart {
    let mut chunks = BTreeSet::new();
    let series = config
        .threads_to_compare
        .iter()
        .map(|&threads| {
            let points = best
                .iter()
                .filter(|(key, _)| key.threads == Some(threads))
                .filter_map(|(key, &p90)| {
                    let chunk = key.chunk?;
                    chunks.insert(chunk);
                    Some(Point {
                        x: chunk.to_string(),
                        y: p90,
                        label: format!("{:.3}", p90),
                    })
                })
                .collect();
            Series {
                label: format!("{} threads", threads),
                color: None,
                points,
            }
        })
        .filter(|s: &Series| !s.points.is_empty())
        .collect();

    finish(
        Chart {
            kind: ChartKind::ChunkEffect,
            matrix: matrix.to_string(),
            title: format!(
                "Chunk size effect - {} (schedule={})",
                matrix, config.chunk_effect_schedule
            ),
            x_label: "Chunk size".to_string(),
            y_label: "Time p90 (s)".to_string(),
            x_ticks: chunks.iter().map(u32::to_string).collect(),
            y_ticks: Vec::new(),
            series,
        },
        config,
    )
}

fn schedule_series(
    derivation: &Derivation,
    config: &ChartConfig,
    value: impl Fn(&DerivedMetric) -> f64,
) -> Vec<Series> {
    config
        .schedules
        .iter()
        .filter_map(|&schedule| {
            let points: Vec<Point> = derivation
                .for_schedule(schedule)
                .map(|m| Point {
                    x: m.threads.to_string(),
                    y: value(m),
                    label: m.threads.to_string(),
                })
                .collect();
            if points.is_empty() {
                return None;
            }
            Some(Series {
                label: schedule.as_str().to_string(),
                color: config.color(schedule).map(str::to_string),
                points,
            })
        })
        .collect()
}

fn finish(mut chart: Chart, config: &ChartConfig) -> Chart {
    if !chart.is_empty() {
        chart.y_ticks = y_ticks(chart.max_y(), config.y_tick_count);
    }
    chart
}
