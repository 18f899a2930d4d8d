// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wallpaper Lattice: which copies of a periodic pattern reach the viewport.
//!
//! An infinite wallpaper is one small *unit* repeated over a 2D lattice
//! `{a·v + b·w : a, b ∈ ℤ}`. To draw it inside a finite viewport that can be
//! panned and zoomed without bound, a renderer needs exactly those lattice
//! coordinates whose translated unit bounds overlap the viewport, and it must
//! find them without walking lattice points far from the viewport.
//!
//! This crate provides:
//!
//! - **Geometry** ([`PanZoom`], [`rects_overlap`], [`enclosing_square`]): the
//!   uniform pan+zoom transform and the rectangle helpers.
//! - **Bases** ([`Basis`], [`BasisError`], [`Unimodular`]): validated lattice
//!   bases, coefficient resolution, and Lagrange–Gauss reduction.
//! - **Re‑anchoring** ([`nearest_coord`], [`round_half_up`]): the lattice
//!   coordinate nearest an arbitrary point, in constant time.
//! - **Covering sets** ([`CoveringSet`], [`RowSpan`], [`generate`]): the
//!   row‑growing search, whose cost follows the boundary of the visible
//!   region rather than its area.
//! - **The pipeline** ([`CoverQuery`], [`cover_viewport`], [`LatticeCover`]):
//!   establishes every precondition of the search and maps results back to
//!   the caller's basis. A cover is empty when no copy reaches the viewport.
//! - **Explainability** ([`CoverTrace`], [`CoverRecorder`]): hooks that
//!   report every overlap test and finished row.
//! - **Shape checks** ([`is_row_column_convex`], [`is_eight_connected`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use kurbo::Rect;
//! use wallpaper_lattice::{Basis, PanZoom, cover_viewport};
//!
//! // A unit square repeated every 1.0 in both directions.
//! let basis = Basis::square(1.0).unwrap();
//! let unit = Rect::new(-0.5, -0.5, 0.5, 0.5);
//!
//! let cover = cover_viewport(unit, &basis, PanZoom::IDENTITY, Rect::new(-5.0, -5.0, 5.0, 5.0));
//!
//! // Touching edges count as overlap: 11 rows of 11.
//! assert_eq!(cover.len(), 121);
//! assert_eq!(cover.set().row_count(), 11);
//! ```
//!
//! ## Panning Far Away
//!
//! The search is re‑anchored on the coordinate nearest the viewport, so a
//! viewport a million units from the origin costs the same as one at the
//! origin.
//!
//! ```rust
//! use kurbo::{Rect, Vec2};
//! use wallpaper_lattice::{Basis, CoverQuery, CoverRecorder, PanZoom};
//!
//! let basis = Basis::square(1.0).unwrap();
//! let unit = Rect::new(-0.5, -0.5, 0.5, 0.5);
//! let viewport = Rect::new(-5.0, -5.0, 5.0, 5.0);
//!
//! let mut near = CoverRecorder::new();
//! let mut far = CoverRecorder::new();
//! CoverQuery::prepare(unit, &basis, PanZoom::IDENTITY, viewport).run_with_trace(&mut near);
//! let panned = PanZoom::translate(Vec2::new(1.0e6, 1.0e6));
//! let cover = CoverQuery::prepare(unit, &basis, panned, viewport).run_with_trace(&mut far);
//!
//! assert_eq!(cover.len(), 121);
//! assert_eq!(near.probe_count(), far.probe_count());
//! ```
//!
//! ## Oblique Lattices
//!
//! The search runs on a reduced basis. [`LatticeCover::offsets`] gives the
//! translations to draw at; [`LatticeCover::coords`] gives coordinates in the
//! basis the caller passed in.
//!
//! ```rust
//! use kurbo::{Rect, Vec2};
//! use wallpaper_lattice::{Basis, PanZoom, cover_viewport};
//!
//! let sheared = Basis::new(Vec2::new(1.0, 0.0), Vec2::new(100.0, 1.0)).unwrap();
//! let unit = Rect::new(-0.5, -0.5, 0.5, 0.5);
//! let cover = cover_viewport(unit, &sheared, PanZoom::IDENTITY, Rect::new(-2.0, -2.0, 2.0, 2.0));
//!
//! // Same lattice as the unit square grid, so the same 5×5 block.
//! assert_eq!(cover.len(), 25);
//! for (coord, offset) in cover.coords().zip(cover.offsets()) {
//!     assert_eq!(sheared.translation(coord), offset);
//! }
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature when
//! building without `std` so Kurbo has floating‑point math available.

#![no_std]

extern crate alloc;

mod basis;
mod coord;
mod cover;
mod geometry;
mod nearest;
mod shape;
mod trace;

pub use basis::{Basis, BasisError, NEAR_DEGENERATE_SINE, Unimodular};
pub use coord::LatticeCoord;
pub use cover::{
    CoverQuery, CoveringSet, LatticeCover, RowSpan, cover_viewport, generate, generate_with_trace,
};
pub use geometry::{PanZoom, enclosing_square, rects_overlap};
pub use nearest::{nearest_coord, round_half_up};
pub use shape::{is_eight_connected, is_row_column_convex};
pub use trace::{CoverRecorder, CoverTrace};
