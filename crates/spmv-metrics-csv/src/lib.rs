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

//! CSV input and output for SpMV benchmark metrics.
//!
//! Reading turns a benchmark table into [`RawRecord`](spmv_metrics_core::RawRecord)s
//! and, through the core normalizer, into a
//! [`SampleTable`](spmv_metrics_core::SampleTable). Writing serializes derived
//! metric rows.
//!
//! # Input Layout
//!
//! With a header row (the default) the columns `matrix`, `mode`, `schedule`,
//! `threads`, `chunk` and `p90` are located by name, in any order; extra
//! columns such as `repeat` or `max_diff` are ignored. Without a header the
//! benchmark driver's append-only layout is assumed:
//!
//! ```text
//! matrix,mode,threads,schedule,chunk,repeat,p90,max_diff
//! ```
//!
//! # Examples
//!
//! ```
//! use spmv_metrics_core::{compute, MetricQuery};
//! use spmv_metrics_csv::{from_csv, to_csv};
//!
//! let csv = "matrix,mode,schedule,threads,chunk,p90\n\
//!            M,seq,na,1,1,2.0\n\
//!            M,omp,static,2,1,1.0\n\
//!            M,omp,static,2,1,0.8\n";
//!
//! let normalized = from_csv(csv).unwrap();
//! let derivation = compute(&normalized.table, "M", &MetricQuery::fixed_chunk(1)).unwrap();
//! let out = to_csv(&derivation.metrics).unwrap();
//! assert!(out.ends_with("M,static,2,,0.8,2.5,1.25\n"));
//! ```

mod error;
mod from_csv;
mod to_csv;

pub use error::{CsvError, Result};
pub use from_csv::{
    from_csv, from_csv_reader, from_csv_reader_with_config, from_csv_with_config, read_records,
    read_records_reader_with_config, read_records_with_config, FromCsvConfig, DEFAULT_MAX_ROWS,
};
pub use to_csv::{
    to_csv, to_csv_with_config, to_csv_writer, to_csv_writer_with_config, ToCsvConfig,
    METRIC_COLUMNS,
};
