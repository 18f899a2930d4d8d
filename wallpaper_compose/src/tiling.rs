// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Units and the lattices they repeat over.

use alloc::sync::Arc;

use kurbo::{Rect, Shape, Vec2};
use log::warn;
use wallpaper_lattice::Basis;

use crate::drawable::{DrawContext, Drawable, Filled};
use crate::surface::Surface;

/// One repeatable motif: a drawable plus its bounding box in its own frame.
///
/// The bounds are what the covering search tests against, so they must
/// enclose everything the drawable paints; anything outside them may be
/// clipped at the viewport edge. Cloning a `Unit` shares the drawable.
#[derive(Clone)]
pub struct Unit {
    drawable: Arc<dyn Drawable>,
    bounds: Rect,
}

impl Unit {
    /// Creates a unit from a drawable and its bounds.
    pub fn new(drawable: impl Drawable + 'static, bounds: Rect) -> Self {
        Self {
            drawable: Arc::new(drawable),
            bounds: bounds.abs(),
        }
    }

    /// A unit that fills `shape`, bounded by the shape's bounding box.
    pub fn from_shape<S: Shape + 'static>(shape: S) -> Self {
        let bounds = shape.bounding_box();
        Self::new(Filled::new(shape), bounds)
    }

    /// Bounding box in the unit's frame.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The shared drawable.
    #[must_use]
    pub fn drawable(&self) -> &dyn Drawable {
        &*self.drawable
    }
}

impl Drawable for Unit {
    fn draw(&self, surface: &mut dyn Surface, cx: &DrawContext) {
        self.drawable.draw(surface, cx);
    }
}

impl core::fmt::Debug for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Unit")
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

/// A unit repeated over a lattice, optionally shifted.
///
/// Copies sit at `offset + a·v + b·w` for integer `a`, `b`. Several tilings
/// sharing one basis with different offsets (and fills) give the usual
/// colour variants of a wallpaper pattern.
#[derive(Clone, Debug)]
pub struct Tiling {
    unit: Unit,
    basis: Basis,
    offset: Vec2,
}

impl Tiling {
    /// Repeats `unit` over `basis`.
    ///
    /// Nearly parallel bases are accepted but logged, since they make
    /// re‑anchoring numerically fragile and can produce very many copies.
    pub fn new(unit: Unit, basis: Basis) -> Self {
        if basis.is_near_degenerate() {
            warn!(
                "tiling basis is nearly degenerate (orthogonality {:e}): v = {:?}, w = {:?}",
                basis.orthogonality(),
                basis.v(),
                basis.w()
            );
        }
        Self {
            unit,
            basis,
            offset: Vec2::ZERO,
        }
    }

    /// The same tiling with every copy moved by `offset`.
    #[must_use]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// The repeated unit.
    #[must_use]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// The lattice basis.
    #[must_use]
    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Shift applied to every copy.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Bounds of the copy at lattice coordinate `(0, 0)`, offset included.
    #[must_use]
    pub fn origin_bounds(&self) -> Rect {
        self.unit.bounds() + self.offset
    }
}
