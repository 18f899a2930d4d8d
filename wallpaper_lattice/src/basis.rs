// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lattice bases: construction, coefficient resolution, and reduction.

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Vec2;

use crate::coord::LatticeCoord;

/// Bases whose [`Basis::orthogonality`] falls below this value are reported
/// as near‑degenerate.
///
/// Such bases are still valid, but resolving points against them amplifies
/// floating‑point error, which shows up as unstable re‑anchoring.
pub const NEAR_DEGENERATE_SINE: f64 = 1e-6;

/// Error returned when two vectors cannot span a lattice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BasisError {
    /// The vectors are parallel (or one of them is zero), so `v × w == 0`.
    Parallel {
        /// First basis vector.
        v: Vec2,
        /// Second basis vector.
        w: Vec2,
    },
    /// A component is NaN or infinite.
    NonFinite,
    /// A squared length or the dot product of the vectors under‑ or
    /// overflows, so the basis cannot be reduced reliably.
    OutOfRange {
        /// First basis vector.
        v: Vec2,
        /// Second basis vector.
        w: Vec2,
    },
}

impl fmt::Display for BasisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parallel { v, w } => write!(
                f,
                "basis vectors ({}, {}) and ({}, {}) are parallel and do not span a lattice",
                v.x, v.y, w.x, w.y
            ),
            Self::NonFinite => f.write_str("basis vectors must be finite"),
            Self::OutOfRange { v, w } => write!(
                f,
                "basis vectors ({}, {}) and ({}, {}) are too small or too large to reduce",
                v.x, v.y, w.x, w.y
            ),
        }
    }
}

impl core::error::Error for BasisError {}

/// Ordered pair of non‑parallel vectors spanning the lattice
/// `{a·v + b·w : a, b ∈ ℤ}`.
///
/// A `Basis` can only be built through [`Basis::new`], which rejects
/// degenerate pairs, so every method here may divide by the cross product
/// `v × w` without checking it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basis {
    v: Vec2,
    w: Vec2,
}

impl Basis {
    /// Creates a basis from two vectors.
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::NonFinite`] if a component is NaN or infinite,
    /// [`BasisError::Parallel`] if `v × w` is zero, and
    /// [`BasisError::OutOfRange`] if `v · v` or `w · w` is not a normal
    /// floating‑point number or `v · w` overflows.
    pub fn new(v: Vec2, w: Vec2) -> Result<Self, BasisError> {
        if !v.is_finite() || !w.is_finite() {
            return Err(BasisError::NonFinite);
        }
        let det = v.cross(w);
        if det == 0.0 || !det.is_finite() {
            return Err(BasisError::Parallel { v, w });
        }
        if !v.dot(v).is_normal() || !w.dot(w).is_normal() || !v.dot(w).is_finite() {
            return Err(BasisError::OutOfRange { v, w });
        }
        Ok(Self { v, w })
    }

    /// The square lattice `v = (1, 0)`, `w = (0, 1)` scaled by `spacing`.
    ///
    /// # Errors
    ///
    /// Fails if `spacing` is zero or not finite.
    pub fn square(spacing: f64) -> Result<Self, BasisError> {
        Self::new(Vec2::new(spacing, 0.0), Vec2::new(0.0, spacing))
    }

    /// First basis vector.
    #[must_use]
    pub fn v(&self) -> Vec2 {
        self.v
    }

    /// Second basis vector.
    #[must_use]
    pub fn w(&self) -> Vec2 {
        self.w
    }

    /// The cross product `v × w`: the signed area of the fundamental cell.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.v.cross(self.w)
    }

    /// Sine of the angle between `v` and `w`, in `(0, 1]`.
    ///
    /// `1.0` means orthogonal; values near zero mean nearly parallel.
    #[must_use]
    pub fn orthogonality(&self) -> f64 {
        self.determinant().abs() / (self.v.hypot() * self.w.hypot())
    }

    /// Returns `true` if the vectors are so close to parallel that coefficient
    /// resolution becomes numerically unreliable.
    ///
    /// See [`NEAR_DEGENERATE_SINE`].
    #[must_use]
    pub fn is_near_degenerate(&self) -> bool {
        self.orthogonality() < NEAR_DEGENERATE_SINE
    }

    /// Length of the longer basis vector.
    #[must_use]
    pub fn max_len(&self) -> f64 {
        self.v.hypot().max(self.w.hypot())
    }

    /// The lattice translation `a·v + b·w` of `coord`.
    #[must_use]
    pub fn translation(&self, coord: LatticeCoord) -> Vec2 {
        self.v * coord.a as f64 + self.w * coord.b as f64
    }

    /// Expresses `z` in this basis: returns real `(a, b)` with `z = a·v + b·w`.
    ///
    /// Uses Cramer's rule, `a = (z × w) / (v × w)` and `b = (v × z) / (v × w)`,
    /// which also covers orthogonal bases.
    #[must_use]
    pub fn resolve(&self, z: Vec2) -> (f64, f64) {
        let det = self.determinant();
        (z.cross(self.w) / det, self.v.cross(z) / det)
    }

    /// Returns this basis with both vectors multiplied by `scale`: the same
    /// lattice seen through a zoom.
    ///
    /// # Errors
    ///
    /// Fails if the scaled vectors are no longer a valid basis, which happens
    /// for a zero or non‑finite `scale` or when the scaled cell area under‑
    /// or overflows.
    pub fn scaled(&self, scale: f64) -> Result<Self, BasisError> {
        Self::new(self.v * scale, self.w * scale)
    }

    /// Returns a Lagrange–Gauss reduced basis of the same lattice.
    ///
    /// The reduced basis satisfies `|v · w| <= min(|v|², |w|²) / 2`, so its
    /// vectors are as short and as close to orthogonal as the lattice allows.
    /// The returned [`Unimodular`] maps coordinates in the reduced basis back
    /// to coordinates in `self`.
    ///
    /// A basis that is already reduced (square, hexagonal, …) comes back
    /// unchanged with [`Unimodular::IDENTITY`].
    ///
    /// Every step must strictly shorten a vector and keep the matrix entries
    /// in range. Reduction stops early otherwise, which only happens for
    /// extreme length ratios where rounding swallows the step; the result is
    /// then a valid, partially reduced basis of the same lattice.
    #[must_use]
    pub fn reduced(&self) -> (Self, Unimodular) {
        let mut v = self.v;
        let mut w = self.w;
        let mut to_original = Unimodular::IDENTITY;
        loop {
            let vv = v.dot(v);
            let ww = w.dot(w);
            let vw = v.dot(w);
            if vv <= ww {
                let m = reduction_step(vw / vv);
                if m == 0 {
                    break;
                }
                let next = w - v * m as f64;
                let Some(map) = to_original.sub_column_multiple(1, 0, m) else {
                    break;
                };
                if next.dot(next) >= ww {
                    break;
                }
                w = next;
                to_original = map;
            } else {
                let m = reduction_step(vw / ww);
                if m == 0 {
                    break;
                }
                let next = v - w * m as f64;
                let Some(map) = to_original.sub_column_multiple(0, 1, m) else {
                    break;
                };
                if next.dot(next) >= vv {
                    break;
                }
                v = next;
                to_original = map;
            }
        }
        (Self { v, w }, to_original)
    }
}

/// Nearest integer to `mu`, or zero when `|mu| <= 1/2`.
///
/// Stopping at exactly one half keeps already reduced bases (such as the
/// hexagonal one) untouched.
fn reduction_step(mu: f64) -> i64 {
    if mu.abs() <= 0.5 {
        0
    } else {
        f64_to_i64(mu.round())
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "saturating float-to-int conversion is the intended behavior"
)]
pub(crate) fn f64_to_i64(x: f64) -> i64 {
    x as i64
}

/// Integer 2×2 matrix with determinant ±1, mapping lattice coordinates in
/// one basis of a lattice to coordinates in another basis of the same lattice.
///
/// Produced by [`Basis::reduced`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Unimodular {
    /// Row‑major entries.
    m: [[i64; 2]; 2],
}

impl Unimodular {
    /// The identity map.
    pub const IDENTITY: Self = Self {
        m: [[1, 0], [0, 1]],
    };

    /// Row‑major entries of the matrix.
    #[must_use]
    pub fn entries(&self) -> [[i64; 2]; 2] {
        self.m
    }

    /// Returns `true` for the identity map.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Maps a coordinate.
    #[must_use]
    pub fn apply(&self, c: LatticeCoord) -> LatticeCoord {
        LatticeCoord::new(
            self.m[0][0] * c.a + self.m[0][1] * c.b,
            self.m[1][0] * c.a + self.m[1][1] * c.b,
        )
    }

    /// Column `dst -= k · column src`, or `None` if an entry overflows.
    fn sub_column_multiple(self, dst: usize, src: usize, k: i64) -> Option<Self> {
        let mut m = self.m;
        for row in &mut m {
            row[dst] = row[dst].checked_sub(k.checked_mul(row[src])?)?;
        }
        Some(Self { m })
    }
}
