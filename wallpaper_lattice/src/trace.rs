// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explainability hooks for the covering search.
//!
//! The search itself keeps no record of how it arrived at a covering set.
//! When debugging a missing or extra tile, or when checking that the search
//! cost follows the boundary of the set rather than its area, pass a
//! [`CoverTrace`] to [`generate_with_trace`](crate::generate_with_trace) or
//! [`CoverQuery::run_with_trace`](crate::CoverQuery::run_with_trace).
//!
//! `()` implements the trait as a no‑op; [`CoverRecorder`] keeps a summary.

use alloc::vec::Vec;

use crate::cover::RowSpan;
use crate::coord::LatticeCoord;

/// Callback sink for the covering search.
pub trait CoverTrace {
    /// Called once with the re‑anchored origin, in absolute coordinates.
    fn anchor(&mut self, anchor: LatticeCoord);

    /// Called once with the first overlapping coordinate found around the
    /// origin of the search, or `None` if the set is empty.
    fn seed(&mut self, seed: Option<LatticeCoord>);

    /// Called for every overlap test, with its outcome.
    fn probe(&mut self, coord: LatticeCoord, hit: bool);

    /// Called for every non‑empty row once its span is final.
    fn row(&mut self, row: i64, span: RowSpan);
}

impl CoverTrace for () {
    #[inline]
    fn anchor(&mut self, _: LatticeCoord) {}

    #[inline]
    fn seed(&mut self, _: Option<LatticeCoord>) {}

    #[inline]
    fn probe(&mut self, _: LatticeCoord, _: bool) {}

    #[inline]
    fn row(&mut self, _: i64, _: RowSpan) {}
}

/// Records what the search did.
///
/// Coordinates reported by [`generate_with_trace`](crate::generate_with_trace)
/// are relative to the search origin, while
/// [`CoverQuery::run_with_trace`](crate::CoverQuery::run_with_trace) reports
/// absolute coordinates.
#[derive(Clone, Debug, Default)]
pub struct CoverRecorder {
    anchor: Option<LatticeCoord>,
    seed: Option<LatticeCoord>,
    rows: Vec<(i64, RowSpan)>,
    probes: usize,
    hits: usize,
}

impl CoverRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears everything recorded so far.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The anchor reported by the last search, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<LatticeCoord> {
        self.anchor
    }

    /// The seed reported by the last search, if any.
    #[must_use]
    pub fn seed(&self) -> Option<LatticeCoord> {
        self.seed
    }

    /// Rows in the order they were finalized.
    #[must_use]
    pub fn rows(&self) -> &[(i64, RowSpan)] {
        &self.rows
    }

    /// Total number of overlap tests.
    #[must_use]
    pub fn probe_count(&self) -> usize {
        self.probes
    }

    /// Number of overlap tests that succeeded.
    #[must_use]
    pub fn hit_count(&self) -> usize {
        self.hits
    }
}

impl CoverTrace for CoverRecorder {
    fn anchor(&mut self, anchor: LatticeCoord) {
        self.anchor = Some(anchor);
    }

    fn seed(&mut self, seed: Option<LatticeCoord>) {
        self.seed = seed;
    }

    fn probe(&mut self, _coord: LatticeCoord, hit: bool) {
        self.probes += 1;
        if hit {
            self.hits += 1;
        }
    }

    fn row(&mut self, row: i64, span: RowSpan) {
        self.rows.push((row, span));
    }
}
