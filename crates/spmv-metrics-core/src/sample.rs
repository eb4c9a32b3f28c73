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

//! Benchmark sample data model.
//!
//! A [`RawRecord`] is one row of the benchmark table exactly as it was read,
//! every field still text. The [`Normalizer`](crate::normalize) turns it into a
//! typed [`Sample`], where numeric fields that could not be parsed are `None`.

use std::fmt;

/// Execution mode of a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Single-threaded reference run.
    Seq,
    /// OpenMP parallel run.
    Omp,
}

impl Mode {
    /// Parse an already trimmed, lower-cased mode token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "seq" => Some(Mode::Seq),
            "omp" => Some(Mode::Omp),
            _ => None,
        }
    }

    /// Canonical lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Seq => "seq",
            Mode::Omp => "omp",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loop scheduling policy of a parallel run.
///
/// The variant order is the fixed presentation order used everywhere results
/// are sorted: `static`, then `dynamic`, then `guided`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Schedule {
    /// `schedule(static)`
    Static,
    /// `schedule(dynamic)`
    Dynamic,
    /// `schedule(guided)`
    Guided,
}

impl Schedule {
    /// All schedules in presentation order.
    pub const ALL: [Schedule; 3] = [Schedule::Static, Schedule::Dynamic, Schedule::Guided];

    /// Parse an already trimmed, lower-cased schedule token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "static" => Some(Schedule::Static),
            "dynamic" => Some(Schedule::Dynamic),
            "guided" => Some(Schedule::Guided),
            _ => None,
        }
    }

    /// Canonical lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Schedule::Static => "static",
            Schedule::Dynamic => "dynamic",
            Schedule::Guided => "guided",
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One benchmark row with loosely typed fields, as read from the input table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub matrix: String,
    pub mode: String,
    pub schedule: String,
    pub threads: String,
    pub chunk: String,
    pub p90: String,
}

impl RawRecord {
    /// Build a raw record from borrowed fields.
    pub fn new(
        matrix: &str,
        mode: &str,
        schedule: &str,
        threads: &str,
        chunk: &str,
        p90: &str,
    ) -> Self {
        Self {
            matrix: matrix.to_string(),
            mode: mode.to_string(),
            schedule: schedule.to_string(),
            threads: threads.to_string(),
            chunk: chunk.to_string(),
            p90: p90.to_string(),
        }
    }
}

/// A normalized benchmark sample.
///
/// `None` in a numeric field means the input value was missing or could not be
/// parsed; such samples never take part in an aggregation keyed on that field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sample {
    /// Workload instance name (e.g. `pdb1HYS.mtx`).
    pub matrix: String,
    /// Execution mode.
    pub mode: Mode,
    /// Scheduling policy, only set for parallel runs.
    pub schedule: Option<Schedule>,
    /// Number of threads.
    pub threads: Option<u32>,
    /// Chunk size handed to the scheduler.
    pub chunk: Option<u32>,
    /// 90th-percentile elapsed time.
    pub p90: Option<f64>,
}

impl Sample {
    /// A sequential sample running on one thread.
    pub fn seq(matrix: impl Into<String>, p90: f64) -> Self {
        Self {
            matrix: matrix.into(),
            mode: Mode::Seq,
            schedule: None,
            threads: Some(1),
            chunk: None,
            p90: Some(p90),
        }
    }

    /// A parallel sample.
    pub fn omp(
        matrix: impl Into<String>,
        schedule: Schedule,
        threads: u32,
        chunk: u32,
        p90: f64,
    ) -> Self {
        Self {
            matrix: matrix.into(),
            mode: Mode::Omp,
            schedule: Some(schedule),
            threads: Some(threads),
            chunk: Some(chunk),
            p90: Some(p90),
        }
    }

    pub fn is_seq(&self) -> bool {
        self.mode == Mode::Seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_order_is_presentation_order() {
        let mut schedules = vec![Schedule::Guided, Schedule::Static, Schedule::Dynamic];
        schedules.sort();
        assert_eq!(schedules, Schedule::ALL.to_vec());
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(Mode::parse("seq"), Some(Mode::Seq));
        assert_eq!(Mode::parse("omp"), Some(Mode::Omp));
        assert_eq!(Mode::parse("OMP"), None);
        assert_eq!(Schedule::parse("guided"), Some(Schedule::Guided));
        assert_eq!(Schedule::parse("na"), None);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for schedule in Schedule::ALL {
            assert_eq!(Schedule::parse(&schedule.to_string()), Some(schedule));
        }
        assert_eq!(Mode::parse(&Mode::Seq.to_string()), Some(Mode::Seq));
    }
}
