// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Covering sets and the row‑growing search that produces them.

use alloc::vec::Vec;

use kurbo::{Rect, Size, Vec2};

use crate::basis::{Basis, Unimodular};
use crate::coord::LatticeCoord;
use crate::geometry::{PanZoom, enclosing_square, rects_overlap};
use crate::nearest::nearest_coord;
use crate::trace::CoverTrace;

/// Inclusive interval `[min, max]` of positions within one lattice row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowSpan {
    /// Leftmost position, inclusive.
    pub min: i64,
    /// Rightmost position, inclusive.
    pub max: i64,
}

impl RowSpan {
    /// Creates a span. `min` must not exceed `max`.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Number of positions in the span.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.max.abs_diff(self.min) + 1
    }

    /// Returns `true` if `a` lies in the span.
    #[must_use]
    pub fn contains(&self, a: i64) -> bool {
        self.min <= a && a <= self.max
    }

    /// The span moved by `by` positions.
    #[must_use]
    pub fn shifted(&self, by: i64) -> Self {
        Self::new(self.min + by, self.max + by)
    }
}

/// Finite set of lattice coordinates stored as at most one [`RowSpan`] per row.
///
/// The set spans rows `first_row ..= last_row`; both end rows are non‑empty,
/// rows in between may be empty. Storage and iteration setup are linear in
/// the number of rows, not in the number of coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CoveringSet {
    first_row: i64,
    spans: Vec<Option<RowSpan>>,
}

impl CoveringSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from consecutive row spans starting at `first_row`.
    #[must_use]
    pub fn from_rows(first_row: i64, spans: Vec<RowSpan>) -> Self {
        Self::from_sparse_rows(first_row, spans.into_iter().map(Some).collect())
    }

    /// Builds a set from the rows starting at `first_row`, where `None`
    /// marks an empty row. Leading and trailing empty rows are dropped.
    #[must_use]
    pub fn from_sparse_rows(first_row: i64, mut spans: Vec<Option<RowSpan>>) -> Self {
        let Some(last) = spans.iter().rposition(Option::is_some) else {
            return Self::new();
        };
        spans.truncate(last + 1);
        let lead = spans.iter().take_while(|s| s.is_none()).count();
        spans.drain(..lead);
        Self {
            first_row: first_row + i64::try_from(lead).unwrap_or(i64::MAX),
            spans,
        }
    }

    /// Returns `true` if the set holds no coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Number of coordinates in the set.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.spans.iter().flatten().map(RowSpan::len).sum()
    }

    /// Number of non‑empty rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.spans.iter().flatten().count()
    }

    /// Index of the lowest row, if any.
    #[must_use]
    pub fn first_row(&self) -> Option<i64> {
        (!self.is_empty()).then_some(self.first_row)
    }

    /// Index of the highest row, if any.
    #[must_use]
    pub fn last_row(&self) -> Option<i64> {
        self.rows().last().map(|(b, _)| b)
    }

    /// The span of row `b`, if that row is non‑empty.
    #[must_use]
    pub fn row(&self, b: i64) -> Option<RowSpan> {
        let idx = usize::try_from(b.checked_sub(self.first_row)?).ok()?;
        self.spans.get(idx).copied().flatten()
    }

    /// Iterates over the non‑empty rows as `(row, span)` pairs, lowest first.
    pub fn rows(&self) -> impl Iterator<Item = (i64, RowSpan)> + '_ {
        (self.first_row..)
            .zip(self.spans.iter())
            .filter_map(|(b, span)| span.map(|span| (b, span)))
    }

    /// Returns `true` if `c` is in the set.
    #[must_use]
    pub fn contains(&self, c: LatticeCoord) -> bool {
        self.row(c.b).is_some_and(|span| span.contains(c.a))
    }

    /// Iterates over all coordinates, row by row, left to right.
    pub fn iter(&self) -> impl Iterator<Item = LatticeCoord> + '_ {
        self.rows()
            .flat_map(|(b, span)| (span.min..=span.max).map(move |a| LatticeCoord::new(a, b)))
    }

    /// The set with every coordinate moved by `by`.
    #[must_use]
    pub fn translated(&self, by: LatticeCoord) -> Self {
        if self.is_empty() {
            return Self::new();
        }
        Self {
            first_row: self.first_row + by.b,
            spans: self
                .spans
                .iter()
                .map(|s| s.map(|s| s.shifted(by.a)))
                .collect(),
        }
    }
}

/// Computes the coordinates `c` for which `unit + basis.translation(c)`
/// overlaps `viewport`.
///
/// `unit` is the bounding box placed at coordinate `(0, 0)` and everything
/// is expressed in one frame (canvas pixels, in practice). The search starts
/// at `(0, 0)`, so `unit` should already sit next to the viewport; see
/// [`CoverQuery`], which takes care of that and of the other preconditions.
///
/// The result is exact when the overlap set is row‑convex and 8‑connected.
/// That holds when `unit` and `viewport` are squares, `basis` is reduced,
/// and the two half‑sides add up to at least half of the longer basis
/// vector. Non‑finite rectangles give an empty set.
#[must_use]
pub fn generate(unit: Rect, basis: &Basis, viewport: Rect) -> CoveringSet {
    generate_with_trace(unit, basis, viewport, &mut ())
}

/// [`generate`], reporting each step to `trace`.
///
/// Coordinates passed to `trace` are relative to the search origin.
pub fn generate_with_trace<T: CoverTrace + ?Sized>(
    unit: Rect,
    basis: &Basis,
    viewport: Rect,
    trace: &mut T,
) -> CoveringSet {
    if !unit.is_finite() || !viewport.is_finite() {
        trace.seed(None);
        return CoveringSet::new();
    }
    let mut search = Search {
        unit: unit.abs(),
        basis,
        viewport: viewport.abs(),
        trace,
    };

    let Some(seed) = search.seed() else {
        search.trace.seed(None);
        return CoveringSet::new();
    };
    search.trace.seed(Some(seed));

    let seed_span = search.grow_row(seed);
    search.trace.row(seed.b, seed_span);

    let mut above = Vec::new();
    let mut prev = seed_span;
    let mut b = seed.b + 1;
    while let Some(span) = search.next_row(prev, b) {
        search.trace.row(b, span);
        above.push(span);
        prev = span;
        b += 1;
    }

    let mut below = Vec::new();
    let mut first_row = seed.b;
    let mut prev = seed_span;
    while let Some(span) = search.next_row(prev, first_row - 1) {
        first_row -= 1;
        search.trace.row(first_row, span);
        below.push(span);
        prev = span;
    }

    let mut spans = below;
    spans.reverse();
    spans.push(seed_span);
    spans.append(&mut above);
    CoveringSet::from_rows(first_row, spans)
}

struct Search<'a, T: ?Sized> {
    unit: Rect,
    basis: &'a Basis,
    viewport: Rect,
    trace: &'a mut T,
}

impl<T: CoverTrace + ?Sized> Search<'_, T> {
    fn hit(&mut self, a: i64, b: i64) -> bool {
        let c = LatticeCoord::new(a, b);
        let hit = rects_overlap(self.unit + self.basis.translation(c), self.viewport);
        self.trace.probe(c, hit);
        hit
    }

    /// The origin if it overlaps, else its first overlapping neighbour.
    ///
    /// Re‑anchoring picks the nearest box by center distance, which does not
    /// guarantee overlap, hence the neighbour check.
    fn seed(&mut self) -> Option<LatticeCoord> {
        let origin = LatticeCoord::ORIGIN;
        if self.hit(origin.a, origin.b) {
            return Some(origin);
        }
        origin.neighbors().into_iter().find(|c| self.hit(c.a, c.b))
    }

    fn grow_row(&mut self, seed: LatticeCoord) -> RowSpan {
        let b = seed.b;
        let mut min = seed.a;
        while self.hit(min - 1, b) {
            min -= 1;
        }
        let mut max = seed.a;
        while self.hit(max + 1, b) {
            max += 1;
        }
        RowSpan::new(min, max)
    }

    /// Finds the span of row `b` given the span of the adjacent row `prev`.
    ///
    /// Under 8‑adjacency the row may start one position left of `prev.min`
    /// and end one position right of `prev.max`, so both probes begin there.
    /// Each end then grows outward while boxes overlap, or shrinks inward
    /// until one does. The row is empty if the ends cross.
    fn next_row(&mut self, prev: RowSpan, b: i64) -> Option<RowSpan> {
        let mut min = prev.min - 1;
        let mut max = prev.max + 1;

        if self.hit(min, b) {
            while self.hit(min - 1, b) {
                min -= 1;
            }
        } else {
            loop {
                min += 1;
                if min > max {
                    return None;
                }
                if self.hit(min, b) {
                    break;
                }
            }
        }

        if self.hit(max, b) {
            while self.hit(max + 1, b) {
                max += 1;
            }
        } else {
            // `min` overlaps, so this stops at `min` at the latest.
            loop {
                max -= 1;
                if max <= min || self.hit(max, b) {
                    break;
                }
            }
        }

        Some(RowSpan::new(min, max))
    }

    /// Narrows `span` in row `b` to the positions that overlap.
    ///
    /// The overlapping positions of a row are contiguous, so both ends move
    /// inward until they hit.
    fn trim(&mut self, span: RowSpan, b: i64) -> Option<RowSpan> {
        let mut min = span.min;
        while !self.hit(min, b) {
            if min >= span.max {
                return None;
            }
            min += 1;
        }
        let mut max = span.max;
        while max > min && !self.hit(max, b) {
            max -= 1;
        }
        Some(RowSpan::new(min, max))
    }
}

/// Keeps the part of `set` whose boxes overlap `viewport`.
///
/// `set` must contain every coordinate that overlaps `viewport`, as the
/// result of a search over a larger viewport with the same center does.
fn trim_rows<T: CoverTrace + ?Sized>(
    set: &CoveringSet,
    unit: Rect,
    basis: &Basis,
    viewport: Rect,
    trace: &mut T,
) -> CoveringSet {
    let (Some(first), Some(last)) = (set.first_row(), set.last_row()) else {
        return CoveringSet::new();
    };
    let mut search = Search {
        unit,
        basis,
        viewport,
        trace,
    };
    let spans = (first..=last)
        .map(|b| set.row(b).and_then(|span| search.trim(span, b)))
        .collect();
    CoveringSet::from_sparse_rows(first, spans)
}

/// A covering search with every precondition of [`generate`] established.
///
/// [`CoverQuery::prepare`] takes a unit's bounds in its own frame, the
/// lattice basis in the same frame, the current pan/zoom, and the viewport in
/// canvas pixels, and:
/// 1. reduces the basis ([`Basis::reduced`]),
/// 2. maps the unit bounds and basis to canvas pixels,
/// 3. replaces the unit bounds and the viewport by their enclosing squares,
/// 4. grows a search square around the viewport if the two squares together
///    are too small to keep the overlap set 8‑connected,
/// 5. re‑anchors on the coordinate nearest the viewport center.
///
/// [`CoverQuery::run`] searches the grown square and then trims each row back
/// to the viewport square, so the result holds exactly the coordinates whose
/// squared unit box overlaps the squared viewport. It is empty when none do.
///
/// The prepared values are exposed so that tests and tools can check a
/// search against brute force on exactly the same inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverQuery {
    world_basis: Basis,
    to_original: Unimodular,
    canvas_basis: Basis,
    unit: Rect,
    viewport: Rect,
    search_viewport: Rect,
    anchor: LatticeCoord,
    searchable: bool,
}

impl CoverQuery {
    /// Prepares a covering search.
    ///
    /// `unit_bounds` and `basis` live in the unit's frame; `transform` maps
    /// that frame to canvas pixels, where `viewport` lives.
    #[must_use]
    pub fn prepare(unit_bounds: Rect, basis: &Basis, transform: PanZoom, viewport: Rect) -> Self {
        let (world_basis, to_original) = basis.reduced();
        let unit = enclosing_square(transform.apply_rect(unit_bounds));
        let viewport = enclosing_square(viewport);
        let scaled = world_basis.scaled(transform.scale);
        let searchable =
            transform.is_valid() && unit.is_finite() && viewport.is_finite() && scaled.is_ok();
        let canvas_basis = scaled.unwrap_or(world_basis);

        if !searchable {
            return Self {
                world_basis,
                to_original,
                canvas_basis,
                unit,
                viewport,
                search_viewport: viewport,
                anchor: LatticeCoord::ORIGIN,
                searchable,
            };
        }

        let unit_half = unit.width() / 2.0;
        let min_half = canvas_basis.max_len() / 2.0;
        let search_viewport = if unit_half + viewport.width() / 2.0 < min_half {
            let side = 2.0 * (min_half - unit_half);
            Rect::from_center_size(viewport.center(), Size::new(side, side))
        } else {
            viewport
        };

        let anchor = nearest_coord(&canvas_basis, unit.center(), viewport.center());
        Self {
            world_basis,
            to_original,
            canvas_basis,
            unit,
            viewport,
            search_viewport,
            anchor,
            searchable,
        }
    }

    /// The reduced basis in the unit's frame.
    #[must_use]
    pub fn world_basis(&self) -> &Basis {
        &self.world_basis
    }

    /// The reduced basis in canvas pixels.
    #[must_use]
    pub fn canvas_basis(&self) -> &Basis {
        &self.canvas_basis
    }

    /// Square canvas box of coordinate `(0, 0)`.
    #[must_use]
    pub fn unit(&self) -> Rect {
        self.unit
    }

    /// Square canvas viewport. The result of [`CoverQuery::run`] is exactly
    /// the set of coordinates whose box overlaps it.
    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Square the search walks over: the viewport, grown around its center
    /// when it is too small for the lattice spacing.
    #[must_use]
    pub fn search_viewport(&self) -> Rect {
        self.search_viewport
    }

    /// The re‑anchored origin of the search, in reduced coordinates.
    #[must_use]
    pub fn anchor(&self) -> LatticeCoord {
        self.anchor
    }

    /// Returns `false` if an input was non‑finite or the transform invalid,
    /// in which case [`CoverQuery::run`] yields an empty cover.
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Runs the search.
    #[must_use]
    pub fn run(&self) -> LatticeCover {
        self.run_with_trace(&mut ())
    }

    /// Runs the search, reporting absolute coordinates to `trace`.
    ///
    /// Seed and rows describe the walk over [`CoverQuery::search_viewport`].
    /// When that square was grown, the overlap tests that trim rows back to
    /// the viewport are reported as further probes.
    pub fn run_with_trace<T: CoverTrace + ?Sized>(&self, trace: &mut T) -> LatticeCover {
        trace.anchor(self.anchor);
        let set = if self.searchable {
            let origin_box = self.unit + self.canvas_basis.translation(self.anchor);
            let canvas = &self.canvas_basis;
            let mut shifted = Shifted {
                inner: trace,
                by: self.anchor,
            };
            let found = generate_with_trace(origin_box, canvas, self.search_viewport, &mut shifted);
            let found = if self.search_viewport == self.viewport {
                found
            } else {
                trim_rows(&found, origin_box, canvas, self.viewport, &mut shifted)
            };
            found.translated(self.anchor)
        } else {
            trace.seed(None);
            CoveringSet::new()
        };
        LatticeCover {
            basis: self.world_basis,
            to_original: self.to_original,
            set,
        }
    }
}

/// Forwards trace events with coordinates moved by `by`.
struct Shifted<'a, T: ?Sized> {
    inner: &'a mut T,
    by: LatticeCoord,
}

impl<T: CoverTrace + ?Sized> CoverTrace for Shifted<'_, T> {
    fn anchor(&mut self, anchor: LatticeCoord) {
        self.inner.anchor(anchor);
    }

    fn seed(&mut self, seed: Option<LatticeCoord>) {
        self.inner.seed(seed.map(|s| s + self.by));
    }

    fn probe(&mut self, coord: LatticeCoord, hit: bool) {
        self.inner.probe(coord + self.by, hit);
    }

    fn row(&mut self, row: i64, span: RowSpan) {
        self.inner.row(row + self.by.b, span.shifted(self.by.a));
    }
}

/// Prepares and runs a covering search in one call.
///
/// See [`CoverQuery::prepare`] for the meaning of the arguments.
#[must_use]
pub fn cover_viewport(
    unit_bounds: Rect,
    basis: &Basis,
    transform: PanZoom,
    viewport: Rect,
) -> LatticeCover {
    CoverQuery::prepare(unit_bounds, basis, transform, viewport).run()
}

/// Result of a covering search: which lattice translates of a unit to draw.
///
/// The set is indexed in the reduced basis the search ran on. Use
/// [`LatticeCover::offsets`] to draw and [`LatticeCover::coords`] to get
/// coordinates in the caller's original basis.
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeCover {
    basis: Basis,
    to_original: Unimodular,
    set: CoveringSet,
}

impl LatticeCover {
    /// The reduced basis, in the unit's frame, that indexes [`LatticeCover::set`].
    #[must_use]
    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Map from reduced coordinates to coordinates in the original basis.
    #[must_use]
    pub fn to_original(&self) -> Unimodular {
        self.to_original
    }

    /// The covering set in reduced coordinates.
    #[must_use]
    pub fn set(&self) -> &CoveringSet {
        &self.set
    }

    /// Returns `true` if nothing needs drawing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Number of unit copies to draw.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.set.len()
    }

    /// Coordinates in the original basis, in row order of the reduced set.
    pub fn coords(&self) -> impl Iterator<Item = LatticeCoord> + '_ {
        self.set.iter().map(|c| self.to_original.apply(c))
    }

    /// Translations, in the unit's frame, at which to draw the unit.
    pub fn offsets(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.set.iter().map(|c| self.basis.translation(c))
    }
}
