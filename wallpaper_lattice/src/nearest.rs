// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Re‑anchoring: picking the lattice coordinate closest to the viewport.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::basis::{Basis, f64_to_i64};
use crate::coord::LatticeCoord;

/// Returns the coordinate whose box center lies nearest `target`, given the
/// center of the box placed at `(0, 0)`.
///
/// The offset `target - reference_center` is resolved in `basis` and each
/// coefficient is rounded with [`round_half_up`]. The result is cheap and
/// deterministic but not a true closest‑vector search: on strongly sheared
/// bases it can land a few cells away, so callers searching outward from it
/// should use a reduced basis (see [`Basis::reduced`]).
#[must_use]
pub fn nearest_coord(basis: &Basis, reference_center: Point, target: Point) -> LatticeCoord {
    let (a, b) = basis.resolve(target - reference_center);
    LatticeCoord::new(f64_to_i64(round_half_up(a)), f64_to_i64(round_half_up(b)))
}

/// Rounds to the nearest integer, resolving exact halves toward positive
/// infinity: `2.5 → 3`, `-2.5 → -2`.
#[must_use]
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}
