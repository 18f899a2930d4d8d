// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan/zoom transform and the rectangle helpers the covering search relies on.

use core::ops::Mul;

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Uniform pan+zoom transform: `p ↦ translation + scale · p`.
///
/// This is the only state a pattern view carries between renders. The
/// scale is expected to be positive and finite; rotation and non‑uniform
/// scaling are deliberately not representable.
///
/// Composition follows [`kurbo::Affine`]: `a * b` applies `b` first, then `a`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanZoom {
    /// Translation applied after scaling.
    pub translation: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
}

impl PanZoom {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        scale: 1.0,
    };

    /// Creates a transform from a translation and a uniform scale.
    #[must_use]
    pub const fn new(translation: Vec2, scale: f64) -> Self {
        Self { translation, scale }
    }

    /// A pure translation.
    #[must_use]
    pub const fn translate(translation: Vec2) -> Self {
        Self {
            translation,
            scale: 1.0,
        }
    }

    /// A pure uniform scale about the origin.
    #[must_use]
    pub const fn uniform_scale(scale: f64) -> Self {
        Self {
            translation: Vec2::ZERO,
            scale,
        }
    }

    /// Maps a point.
    #[must_use]
    pub fn apply(self, pt: Point) -> Point {
        (pt.to_vec2() * self.scale + self.translation).to_point()
    }

    /// Maps a displacement. Translation does not affect vectors.
    #[must_use]
    pub fn apply_vec(self, v: Vec2) -> Vec2 {
        v * self.scale
    }

    /// Maps a rectangle.
    ///
    /// The result is normalized, so it has non‑negative width and height even
    /// if `rect` did not.
    #[must_use]
    pub fn apply_rect(self, rect: Rect) -> Rect {
        let rect = rect.abs();
        Rect::from_points(
            self.apply(Point::new(rect.x0, rect.y0)),
            self.apply(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Returns the transform that applies `self` and then `outer`.
    #[must_use]
    pub fn then(self, outer: Self) -> Self {
        outer * self
    }

    /// Returns the transform that first translates by `offset`, then applies `self`.
    #[must_use]
    pub fn pre_translate(self, offset: Vec2) -> Self {
        self * Self::translate(offset)
    }

    /// Returns the inverse transform.
    ///
    /// The scale must be non‑zero.
    #[must_use]
    pub fn inverse(self) -> Self {
        let inv = 1.0 / self.scale;
        Self {
            translation: -self.translation * inv,
            scale: inv,
        }
    }

    /// Returns `true` if the scale is positive and all components are finite.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.translation.is_finite() && self.scale.is_finite() && self.scale > 0.0
    }

    /// Converts to a [`kurbo::Affine`].
    #[must_use]
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translation) * Affine::scale(self.scale)
    }
}

impl Default for PanZoom {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for PanZoom {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            translation: self.translation + rhs.translation * self.scale,
            scale: self.scale * rhs.scale,
        }
    }
}

impl Mul<Point> for PanZoom {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: Point) -> Point {
        self.apply(rhs)
    }
}

/// Closed‑interval overlap test for axis‑aligned rectangles.
///
/// Rectangles that only share an edge or a corner overlap. Both inputs are
/// expected to be normalized (`x0 <= x1`, `y0 <= y1`). Any NaN coordinate
/// makes the test fail.
#[inline]
#[must_use]
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Smallest square with the same center that encloses `rect`.
#[must_use]
pub fn enclosing_square(rect: Rect) -> Rect {
    let rect = rect.abs();
    let side = rect.width().max(rect.height());
    Rect::from_center_size(rect.center(), Size::new(side, side))
}
