// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wallpaper View: pan/zoom state for an infinite pattern plane.
//!
//! This crate holds the camera side of a wallpaper renderer: a device‑space
//! view rectangle and a uniform pan+zoom onto an unbounded world plane. It
//! produces the [`PanZoom`](wallpaper_lattice::PanZoom) transform and the
//! viewport rectangle that a covering search takes as input, and converts
//! points and rectangles between world and view space (for hit testing or
//! for showing which cell the pointer is over).
//!
//! Input events are not handled here; callers translate their own drag and
//! wheel events into [`Viewport::pan_by_view`] and
//! [`Viewport::zoom_about_view_point`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use wallpaper_lattice::{Basis, cover_viewport};
//! use wallpaper_view::Viewport;
//!
//! let mut view = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//!
//! // Drag far away, then zoom in around the pointer.
//! view.pan_by_view(Vec2::new(-1.0e7, 2.5e6));
//! view.zoom_about_view_point(Point::new(400.0, 300.0), 4.0);
//!
//! let basis = Basis::square(50.0).unwrap();
//! let unit = Rect::new(0.0, 0.0, 50.0, 50.0);
//! let cover = cover_viewport(unit, &basis, view.transform(), view.view_rect());
//!
//! // 800x600 pixels at 4x zoom show a 200x150 world window: at most
//! // 5 columns by 5 rows of 50‑unit cells once the window is squared.
//! assert!(!cover.is_empty());
//! assert!(cover.len() <= 36);
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform and limited to a configurable range; pan is unlimited.
//! - There are no world bounds, fitting or clamping: the pattern has no edge.

#![no_std]

mod viewport;

pub use viewport::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, Viewport, ViewportDebugInfo};
