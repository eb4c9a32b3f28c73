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

//! Integration tests for spmv-metrics-csv.

use spmv_metrics_core::{compute, derive_all, MetricQuery, Schedule, Warning};
use spmv_metrics_csv::{
    from_csv, from_csv_reader, from_csv_reader_with_config, to_csv, CsvError, FromCsvConfig,
};
use std::fs;
use std::io::Write;

const BENCHMARK: &str = "\
matrix,mode,threads,schedule,chunk,repeat,p90,max_diff
pdb1HYS.mtx,seq,1,na,0,10,12.000000,0.000000000000
pdb1HYS.mtx,omp,24,static,1,10,1.000000,0.000000000001
pdb1HYS.mtx,omp,24,static,1,10,0.800000,0.000000000001
pdb1HYS.mtx,omp,24,dynamic,1,10,0.750000,0.000000000001
pdb1HYS.mtx,omp,96,guided,1,10,0.250000,0.000000000001
pdb1HYS.mtx,omp,96,guided,64,10,0.200000,0.000000000001
cant.mtx,omp,24,static,1,10,0.500000,0.000000000001
";

#[test]
fn test_load_and_derive_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BENCHMARK.as_bytes()).unwrap();

    let normalized = from_csv_reader(fs::File::open(file.path()).unwrap()).unwrap();
    assert_eq!(normalized.table.len(), 7);
    assert_eq!(normalized.dropped, 0);
    assert_eq!(normalized.table.matrices(), vec!["pdb1HYS.mtx", "cant.mtx"]);

    let derivation =
        compute(&normalized.table, "pdb1HYS.mtx", &MetricQuery::fixed_chunk(1)).unwrap();
    let rows: Vec<_> = derivation
        .metrics
        .iter()
        .map(|m| (m.threads, m.schedule, m.best_p90))
        .collect();
    assert_eq!(
        rows,
        vec![
            (24, Some(Schedule::Static), 0.8),
            (24, Some(Schedule::Dynamic), 0.75),
            (96, Some(Schedule::Guided), 0.25),
        ]
    );
    assert_eq!(derivation.metrics[2].speedup, 48.0);
    assert_eq!(derivation.metrics[2].efficiency, 0.5);
}

#[test]
fn test_batch_reports_matrix_without_baseline() {
    let normalized = from_csv(BENCHMARK).unwrap();
    let outcomes = derive_all(&normalized.table, &MetricQuery::all_configurations());
    assert!(outcomes[0].is_success());
    assert!(outcomes[1].error().unwrap().is_no_baseline());
}

#[test]
fn test_headerless_driver_output() {
    let body: String = BENCHMARK.lines().skip(1).map(|l| format!("{}\n", l)).collect();
    let config = FromCsvConfig {
        has_headers: false,
        ..Default::default()
    };
    let with_header = from_csv(BENCHMARK).unwrap();
    let without_header = from_csv_reader_with_config(body.as_bytes(), &config).unwrap();
    assert_eq!(with_header.table, without_header.table);
}

#[test]
fn test_dirty_rows_are_isolated() {
    let csv = "\
matrix,mode,schedule,threads,chunk,p90
m, Seq ,na,1,0,4.0
m,OMP,Static,2,1,oops
m,omp,static,2,1,1.0
m,hybrid,static,2,1,0.1
";
    let normalized = from_csv(csv).unwrap();
    assert_eq!(normalized.dropped, 1);
    assert!(normalized
        .warnings
        .iter()
        .any(|w| matches!(w, Warning::MissingNumeric { field: "p90", .. })));

    let derivation = compute(&normalized.table, "m", &MetricQuery::fixed_chunk(1)).unwrap();
    assert_eq!(derivation.metrics.len(), 1);
    assert_eq!(derivation.metrics[0].speedup, 4.0);
}

#[test]
fn test_derived_table_round_trips_through_csv_text() {
    let normalized = from_csv(BENCHMARK).unwrap();
    let derivation =
        compute(&normalized.table, "pdb1HYS.mtx", &MetricQuery::all_configurations()).unwrap();
    let out = to_csv(&derivation.metrics).unwrap();

    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), derivation.metrics.len() + 1);
    assert_eq!(lines[1], "pdb1HYS.mtx,static,24,1,0.8,15,0.625");
    assert_eq!(lines.last().copied(), Some("pdb1HYS.mtx,guided,96,64,0.2,60,0.625"));
}

#[test]
fn test_not_a_benchmark_table() {
    let err = from_csv("name,value\nx,1\n").unwrap_err();
    assert!(matches!(err, CsvError::MissingColumn(_)));
}
