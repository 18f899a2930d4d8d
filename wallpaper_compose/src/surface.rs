// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw targets.

use alloc::vec::Vec;

use kurbo::{Affine, BezPath};
use peniko::Brush;

/// Something paths can be filled into.
///
/// The compositor never touches pixels: it hands fully transformed fill
/// requests to a `Surface` and lets the backend rasterize them. Adapters for
/// real renderers implement this trait; [`RecordingSurface`] records the
/// requests instead.
pub trait Surface {
    /// Fills `path`, given in local coordinates, transformed by `transform`.
    fn fill_path(&mut self, transform: Affine, brush: &Brush, path: &BezPath);
}

/// One recorded [`Surface::fill_path`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct FillEvent {
    /// Transform in effect for the fill.
    pub transform: Affine,
    /// Brush used for the fill.
    pub brush: Brush,
    /// The path, in local coordinates.
    pub path: BezPath,
}

/// Surface that records fills for tests and debugging.
///
/// It does **not** rasterize; it keeps every request in order so tests can
/// assert on paint order, transforms and brushes.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    fills: Vec<FillEvent>,
}

impl RecordingSurface {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded fills in the order they were issued.
    #[must_use]
    pub fn fills(&self) -> &[FillEvent] {
        &self.fills
    }

    /// Number of recorded fills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fills.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.fills.clear();
    }

    /// Takes the recorded fills, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<FillEvent> {
        core::mem::take(&mut self.fills)
    }
}

impl Surface for RecordingSurface {
    fn fill_path(&mut self, transform: Affine, brush: &Brush, path: &BezPath) {
        self.fills.push(FillEvent {
            transform,
            brush: brush.clone(),
            path: path.clone(),
        });
    }
}
