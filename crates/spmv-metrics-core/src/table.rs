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

//! Immutable table of normalized samples.

use crate::sample::Sample;
use std::collections::BTreeSet;

/// The normalized benchmark table.
///
/// Once built the table is never modified; every engine operation borrows it
/// and returns freshly allocated results. It is `Send + Sync`, so independent
/// callers may query it from several threads at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    samples: Vec<Sample>,
}

impl SampleTable {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// All samples in input order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distinct matrix names in order of first appearance.
    pub fn matrices(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.samples
            .iter()
            .map(|s| s.matrix.as_str())
            .filter(|m| seen.insert(*m))
            .collect()
    }

    /// Samples belonging to `matrix`.
    pub fn for_matrix<'a>(&'a self, matrix: &'a str) -> impl Iterator<Item = &'a Sample> + 'a {
        self.samples.iter().filter(move |s| s.matrix == matrix)
    }

    /// Sorted distinct thread counts recorded for `matrix`.
    pub fn thread_counts(&self, matrix: &str) -> Vec<u32> {
        self.for_matrix(matrix)
            .filter_map(|s| s.threads)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl From<Vec<Sample>> for SampleTable {
    fn from(samples: Vec<Sample>) -> Self {
        Self::new(samples)
    }
}

impl FromIterator<Sample> for SampleTable {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
