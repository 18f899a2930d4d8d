// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wallpaper Compose: draw infinite periodic patterns into a viewport.
//!
//! This crate turns lattice covers from `wallpaper_lattice` into draw calls.
//! It provides:
//!
//! - **Surfaces** ([`Surface`], [`RecordingSurface`]): the draw target
//!   abstraction. The compositor only ever fills paths; rasterization
//!   belongs to whatever backend implements [`Surface`].
//! - **Drawables** ([`Drawable`], [`DrawContext`], [`DrawableExt`],
//!   [`Layers`], [`Filled`], [`from_fn`]): a single draw capability with
//!   combinators for fill, shift and join. Closures are drawables.
//! - **Tilings** ([`Unit`], [`Tiling`]): a bounded motif repeated over a
//!   lattice basis, optionally offset.
//! - **Rendering** ([`render`], [`cover_tilings`], [`composite`]): a
//!   stateless pass from viewport and transform to draw calls.
//!
//! ## Example
//!
//! Two colour variants of a diamond, the second shifted by half a cell:
//!
//! ```rust
//! use kurbo::{BezPath, Rect, Vec2};
//! use peniko::Color;
//! use wallpaper_compose::{DrawableExt, Filled, RecordingSurface, Tiling, Unit, render};
//! use wallpaper_lattice::{Basis, PanZoom};
//!
//! let mut diamond = BezPath::new();
//! diamond.move_to((0.0, -1.0));
//! diamond.line_to((1.0, 0.0));
//! diamond.line_to((0.0, 1.0));
//! diamond.line_to((-1.0, 0.0));
//! diamond.close_path();
//! let bounds = Rect::new(-1.0, -1.0, 1.0, 1.0);
//!
//! let basis = Basis::square(2.0).unwrap();
//! let light = Unit::new(Filled::new(diamond.clone()).with_fill(Color::WHITE), bounds);
//! let dark = Unit::new(Filled::new(diamond).with_fill(Color::BLACK), bounds);
//! let tilings = [
//!     Tiling::new(light, basis),
//!     Tiling::new(dark, basis).with_offset(Vec2::new(1.0, 1.0)),
//! ];
//!
//! // 10x zoom, panned a long way from the origin.
//! let transform = PanZoom::new(Vec2::new(-4.0e6, 2.0e6), 10.0);
//! let viewport = Rect::new(0.0, 0.0, 200.0, 200.0);
//!
//! let mut surface = RecordingSurface::new();
//! let covers = render(&mut surface, viewport, transform, &tilings);
//! let drawn: u64 = covers.iter().map(|c| c.len()).sum();
//! assert_eq!(drawn, surface.len() as u64);
//! assert!(drawn > 0);
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade: a warning when a tiling is
//! built on a nearly degenerate basis, a debug line per [`render`] and a
//! trace line per tiling cover. No logger is installed by this crate.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod compose;
mod drawable;
mod surface;
mod tiling;

pub use compose::{composite, cover_tilings, render};
pub use drawable::{
    DrawContext, Drawable, DrawableExt, Filled, Join, Layers, PATH_TOLERANCE, WithFill,
    WithShift, from_fn,
};
pub use surface::{FillEvent, RecordingSurface, Surface};
pub use tiling::{Tiling, Unit};
