// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer lattice coordinates.

use core::ops::{Add, Neg, Sub};

/// Integer lattice coordinate `(a, b)`, addressing the point `a·v + b·w`.
///
/// `b` is the row index and `a` the position within the row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticeCoord {
    /// Coefficient of the first basis vector.
    pub a: i64,
    /// Coefficient of the second basis vector (the row).
    pub b: i64,
}

impl LatticeCoord {
    /// The coordinate `(0, 0)`.
    pub const ORIGIN: Self = Self { a: 0, b: 0 };

    /// Creates a coordinate.
    #[must_use]
    pub const fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// The eight king‑move neighbours, row by row from `b - 1` to `b + 1`.
    #[must_use]
    pub fn neighbors(self) -> [Self; 8] {
        let Self { a, b } = self;
        [
            Self::new(a - 1, b - 1),
            Self::new(a, b - 1),
            Self::new(a + 1, b - 1),
            Self::new(a - 1, b),
            Self::new(a + 1, b),
            Self::new(a - 1, b + 1),
            Self::new(a, b + 1),
            Self::new(a + 1, b + 1),
        ]
    }

    /// Returns `true` if `other` is one king move away.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        self != other && self.a.abs_diff(other.a) <= 1 && self.b.abs_diff(other.b) <= 1
    }
}

impl Add for LatticeCoord {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.a + rhs.a, self.b + rhs.b)
    }
}

impl Sub for LatticeCoord {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.a - rhs.a, self.b - rhs.b)
    }
}

impl Neg for LatticeCoord {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.a, -self.b)
    }
}

impl From<(i64, i64)> for LatticeCoord {
    fn from((a, b): (i64, i64)) -> Self {
        Self::new(a, b)
    }
}
