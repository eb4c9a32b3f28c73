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

//! Metric engine benchmarks.
//!
//! Measures normalization and per-matrix derivation over synthetic benchmark
//! tables shaped like a full thread/schedule/chunk sweep.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spmv_metrics_core::{derive_all, normalize, MetricQuery, RawRecord};

const THREADS: [u32; 6] = [1, 2, 4, 24, 48, 96];
const CHUNKS: [u32; 5] = [1, 8, 64, 256, 1024];
const SCHEDULES: [&str; 3] = ["static", "dynamic", "guided"];

/// One seq row plus `repeats` trials of every parallel configuration per matrix.
fn sweep(matrices: usize, repeats: usize) -> Vec<RawRecord> {
    let mut rows = Vec::new();
    for m in 0..matrices {
        let name = format!("matrix_{}.mtx", m);
        rows.push(RawRecord::new(&name, "seq", "na", "1", "0", "12.5"));
        for r in 0..repeats {
            for schedule in SCHEDULES {
                for threads in THREADS {
                    for chunk in CHUNKS {
                        let p90 = 12.5 / f64::from(threads) + 0.001 * (r + 1) as f64;
                        rows.push(RawRecord::new(
                            &name,
                            "omp",
                            schedule,
                            &threads.to_string(),
                            &chunk.to_string(),
                            &format!("{:.6}", p90),
                        ));
                    }
                }
            }
        }
    }
    rows
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for matrices in [1, 10, 50] {
        let rows = sweep(matrices, 3);
        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(matrices), &rows, |b, rows| {
            b.iter(|| normalize(black_box(rows)))
        });
    }
    group.finish();
}

fn bench_derive_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_all");
    for matrices in [1, 10, 50] {
        let table = match normalize(&sweep(matrices, 3)) {
            Ok(normalized) => normalized.table,
            Err(e) => panic!("synthetic sweep failed to normalize: {}", e),
        };
        group.throughput(Throughput::Elements(table.len() as u64));
        for (name, query) in [
            ("all_configurations", MetricQuery::all_configurations()),
            ("fixed_chunk", MetricQuery::fixed_chunk(1)),
        ] {
            group.bench_with_input(BenchmarkId::new(name, matrices), &table, |b, table| {
                b.iter(|| derive_all(black_box(table), &query))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_derive_all);
criterion_main!(benches);
