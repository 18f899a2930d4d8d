// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawable capability and its combinators.
//!
//! A [`Drawable`] is anything that can paint itself into a [`Surface`] given
//! a [`DrawContext`]. Closures of the right shape are drawables, and the
//! combinators on [`DrawableExt`] wrap one drawable into another without any
//! shared mutable state:
//!
//! - [`DrawableExt::with_fill`] overrides the brush,
//! - [`DrawableExt::with_shift`] moves the drawable in its local frame,
//! - [`DrawableExt::join`] draws two drawables one after the other.
//!
//! [`Layers`] holds any number of boxed drawables, drawn in order.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Affine, Shape, Vec2};
use peniko::{Brush, Color};

use crate::surface::Surface;

/// Tolerance used when flattening shapes into paths, in local units.
pub const PATH_TOLERANCE: f64 = 0.1;

/// Transform and brush a drawable paints with.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawContext {
    /// Local → surface transform.
    pub transform: Affine,
    /// Brush used by fills that do not pick their own.
    pub brush: Brush,
}

impl DrawContext {
    /// A context with `transform` and a solid black brush.
    #[must_use]
    pub fn new(transform: Affine) -> Self {
        Self {
            transform,
            brush: Brush::Solid(Color::BLACK),
        }
    }

    /// The same context with the brush replaced.
    #[must_use]
    pub fn with_brush(&self, brush: Brush) -> Self {
        Self {
            transform: self.transform,
            brush,
        }
    }

    /// The same context with `offset` applied before the current transform.
    #[must_use]
    pub fn pre_translate(&self, offset: Vec2) -> Self {
        Self {
            transform: self.transform * Affine::translate(offset),
            brush: self.brush.clone(),
        }
    }
}

impl Default for DrawContext {
    fn default() -> Self {
        Self::new(Affine::IDENTITY)
    }
}

/// Something that can paint itself.
pub trait Drawable {
    /// Draws into `surface` using the transform and brush of `cx`.
    fn draw(&self, surface: &mut dyn Surface, cx: &DrawContext);
}

impl<F> Drawable for F
where
    F: Fn(&mut dyn Surface, &DrawContext),
{
    fn draw(&self, surface: &mut dyn Surface, cx: &DrawContext) {
        self(surface, cx);
    }
}

/// Turns a closure into a [`Drawable`], letting the compiler infer the
/// argument types.
///
/// ```rust
/// use kurbo::{Circle, Shape};
/// use wallpaper_compose::{DrawContext, Drawable, RecordingSurface, from_fn};
///
/// let dot = from_fn(|surface, cx| {
///     surface.fill_path(cx.transform, &cx.brush, &Circle::new((0.0, 0.0), 1.0).to_path(0.1));
/// });
/// let mut surface = RecordingSurface::new();
/// dot.draw(&mut surface, &DrawContext::default());
/// assert_eq!(surface.len(), 1);
/// ```
pub fn from_fn<F>(f: F) -> F
where
    F: Fn(&mut dyn Surface, &DrawContext),
{
    f
}

/// Combinators available on every [`Drawable`].
pub trait DrawableExt: Drawable + Sized {
    /// Draws `self` with `brush` instead of the brush from the context.
    fn with_fill(self, brush: impl Into<Brush>) -> WithFill<Self> {
        WithFill {
            inner: self,
            brush: brush.into(),
        }
    }

    /// Draws `self` moved by `offset` in its local frame.
    fn with_shift(self, offset: Vec2) -> WithShift<Self> {
        WithShift {
            inner: self,
            offset,
        }
    }

    /// Draws `self`, then `other` on top.
    fn join<B: Drawable>(self, other: B) -> Join<Self, B> {
        Join {
            first: self,
            second: other,
        }
    }
}

impl<D: Drawable> DrawableExt for D {}

/// See [`DrawableExt::with_fill`].
#[derive(Clone, Debug)]
pub struct WithFill<D> {
    inner: D,
    brush: Brush,
}

impl<D: Drawable> Drawable for WithFill<D> {
    fn draw(&self, surface: &mut dyn Surface, cx: &DrawContext) {
        self.inner.draw(surface, &cx.with_brush(self.brush.clone()));
    }
}

/// See [`DrawableExt::with_shift`].
#[derive(Clone, Debug)]
pub struct WithShift<D> {
    inner: D,
    offset: Vec2,
}

impl<D: Drawable> Drawable for WithShift<D> {
    fn draw(&self, surface: &mut dyn Surface, cx: &DrawContext) {
        self.inner.draw(surface, &cx.pre_translate(self.offset));
    }
}

/// See [`DrawableExt::join`].
#[derive(Clone, Debug)]
pub struct Join<A, B> {
    first: A,
    second: B,
}

impl<A: Drawable, B: Drawable> Drawable for Join<A, B> {
    fn draw(&self, surface: &mut dyn Surface, cx: &DrawContext) {
        self.first.draw(surface, cx);
        self.second.draw(surface, cx);
    }
}

/// Fills a [`Shape`] with the context brush.
#[derive(Clone, Debug)]
pub struct Filled<S> {
    shape: S,
}

impl<S: Shape> Filled<S> {
    /// Wraps `shape`.
    #[must_use]
    pub fn new(shape: S) -> Self {
        Self { shape }
    }

    /// The wrapped shape.
    #[must_use]
    pub fn shape(&self) -> &S {
        &self.shape
    }
}

impl<S: Shape> Drawable for Filled<S> {
    fn draw(&self, surface: &mut dyn Surface, cx: &DrawContext) {
        surface.fill_path(cx.transform, &cx.brush, &self.shape.to_path(PATH_TOLERANCE));
    }
}

/// Ordered list of drawables, painted first to last.
#[derive(Default)]
pub struct Layers {
    layers: Vec<Box<dyn Drawable>>,
}

impl Layers {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer on top of the existing ones.
    pub fn push(&mut self, layer: impl Drawable + 'static) {
        self.layers.push(Box::new(layer));
    }

    /// Builder form of [`Layers::push`].
    #[must_use]
    pub fn with(mut self, layer: impl Drawable + 'static) -> Self {
        self.push(layer);
        self
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl core::fmt::Debug for Layers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Layers")
            .field("len", &self.layers.len())
            .finish_non_exhaustive()
    }
}

impl Drawable for Layers {
    fn draw(&self, surface: &mut dyn Surface, cx: &DrawContext) {
        for layer in &self.layers {
            layer.draw(surface, cx);
        }
    }
}
