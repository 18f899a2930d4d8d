// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};
use wallpaper_lattice::PanZoom;

/// Default lower zoom limit.
pub const DEFAULT_MIN_ZOOM: f64 = 1e-3;

/// Default upper zoom limit.
pub const DEFAULT_MAX_ZOOM: f64 = 1e3;

/// Pan/zoom view onto an unbounded pattern plane.
///
/// `Viewport` tracks the canvas rectangle the pattern is drawn into (in
/// device pixels) and a uniform pan+zoom mapping world coordinates into it.
/// There are no world bounds: the plane is infinite and panning is never
/// clamped. Only the zoom factor is limited.
///
/// [`Viewport::transform`] and [`Viewport::view_rect`] are exactly the
/// transform and viewport a covering search expects.
#[derive(Clone, Debug)]
pub struct Viewport {
    view_rect: Rect,
    zoom: f64,
    pan: Vec2,
    min_zoom: f64,
    max_zoom: f64,
    world_to_view: PanZoom,
    view_to_world: PanZoom,
}

impl Viewport {
    /// Creates a viewport covering `view_rect`.
    ///
    /// - Initial zoom is `1.0`.
    /// - Initial pan is zero (world origin maps to the view rect origin).
    /// - Zoom is clamped to [`DEFAULT_MIN_ZOOM`]`..=`[`DEFAULT_MAX_ZOOM`].
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        let mut vp = Self {
            view_rect,
            zoom: 1.0,
            pan: Vec2::ZERO,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            world_to_view: PanZoom::IDENTITY,
            view_to_world: PanZoom::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Returns the current view rectangle in device coordinates.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// Sets the view rectangle in device coordinates, for example after a
    /// window resize.
    ///
    /// Zoom and pan are unchanged, so the world point under the view origin
    /// stays put.
    pub fn set_view_rect(&mut self, rect: Rect) {
        if self.view_rect == rect {
            return;
        }
        self.view_rect = rect;
        self.rebuild_transforms();
    }

    /// Returns the current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the configured `(min, max)` zoom limits.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The range is normalized so that `min_zoom <= max_zoom`, and the current
    /// zoom is clamped into it. Limits that are not positive and finite are
    /// ignored.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let valid = |z: f64| z.is_finite() && z > 0.0;
        if !valid(min_zoom) || !valid(max_zoom) {
            return;
        }
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Sets the zoom factor, clamped into the configured range.
    ///
    /// Zooming this way scales about the view origin. NaN is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return;
        }
        self.zoom = clamped;
        self.rebuild_transforms();
    }

    /// Returns the pan offset in view coordinates.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Pans the view by a delta in view/device space.
    ///
    /// Non‑finite deltas are ignored.
    pub fn pan_by_view(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO || !delta.is_finite() {
            return;
        }
        self.pan += delta;
        self.rebuild_transforms();
    }

    /// Zooms by `factor` around an anchor point in view/device coordinates.
    ///
    /// The world point under the anchor stays under the anchor. Factors that
    /// are not positive and finite are ignored.
    pub fn zoom_about_view_point(&mut self, anchor_view: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - old_zoom).abs() < f64::EPSILON {
            return;
        }

        let old_world = self.view_to_world_point(anchor_view);
        self.zoom = new_zoom;
        self.rebuild_transforms();
        let new_anchor_view = self.world_to_view_point(old_world);
        self.pan_by_view(anchor_view - new_anchor_view);
    }

    /// Centers the view on the given world‑space point.
    pub fn center_on(&mut self, world_pt: Point) {
        let delta = self.view_rect.center() - self.world_to_view_point(world_pt);
        self.pan_by_view(delta);
    }

    /// Returns the visible world‑space rectangle.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        self.view_to_world_rect(self.view_rect)
    }

    /// The world → view transform, to hand to a covering search together with
    /// [`Viewport::view_rect`].
    #[must_use]
    pub fn transform(&self) -> PanZoom {
        self.world_to_view
    }

    /// Converts a world‑space point into view/device coordinates.
    #[must_use]
    pub fn world_to_view_point(&self, pt: Point) -> Point {
        self.world_to_view * pt
    }

    /// Converts a view/device‑space point into world coordinates.
    #[must_use]
    pub fn view_to_world_point(&self, pt: Point) -> Point {
        self.view_to_world * pt
    }

    /// Converts a world‑space rectangle into view/device coordinates.
    #[must_use]
    pub fn world_to_view_rect(&self, rect: Rect) -> Rect {
        self.world_to_view.apply_rect(rect)
    }

    /// Converts a view/device‑space rectangle into world coordinates.
    #[must_use]
    pub fn view_to_world_rect(&self, rect: Rect) -> Rect {
        self.view_to_world.apply_rect(rect)
    }

    /// Returns the world‑units‑per‑pixel ratio, `1.0 / zoom`.
    #[must_use]
    pub fn world_units_per_pixel(&self) -> f64 {
        1.0 / self.zoom
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            view_rect: self.view_rect,
            visible_world_rect: self.visible_world_rect(),
            zoom: self.zoom,
            pan: self.pan,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            transform: self.world_to_view,
        }
    }

    fn rebuild_transforms(&mut self) {
        // World → view: scale, then translate by pan into the view rect.
        let view_origin = self.view_rect.origin().to_vec2();
        self.world_to_view = PanZoom::new(view_origin + self.pan, self.zoom);
        self.view_to_world = self.world_to_view.inverse();
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Current view rectangle in device coordinates.
    pub view_rect: Rect,
    /// World‑space rectangle currently visible through the view.
    pub visible_world_rect: Rect,
    /// Current uniform zoom factor.
    pub zoom: f64,
    /// Current pan offset in view coordinates.
    pub pan: Vec2,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
    /// Current world → view transform.
    pub transform: PanZoom,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, Viewport};

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn defaults() {
        let vp = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.pan(), Vec2::ZERO);
        assert_eq!(vp.zoom_limits(), (DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM));
        assert_eq!(vp.visible_world_rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn basic_world_view_roundtrip() {
        let mut vp = Viewport::new(Rect::new(10.0, 20.0, 810.0, 620.0));
        vp.set_zoom(2.5);
        vp.pan_by_view(Vec2::new(-37.0, 12.0));

        let world_pt = Point::new(10.0, -5.0);
        let view_pt = vp.world_to_view_point(world_pt);
        assert!(close(vp.view_to_world_point(view_pt), world_pt));
        assert!(close(vp.transform().apply(world_pt), view_pt));
    }

    #[test]
    fn zoom_about_anchor_keeps_anchor_fixed() {
        let view_rect = Rect::new(0.0, 0.0, 800.0, 600.0);
        let mut vp = Viewport::new(view_rect);

        let anchor_view = Point::new(123.0, 456.0);
        let before = vp.view_to_world_point(anchor_view);
        vp.zoom_about_view_point(anchor_view, 2.0);
        assert_eq!(vp.zoom(), 2.0);
        assert!(close(vp.view_to_world_point(anchor_view), before));

        vp.zoom_about_view_point(anchor_view, 0.0);
        vp.zoom_about_view_point(anchor_view, f64::NAN);
        assert_eq!(vp.zoom(), 2.0);
    }

    #[test]
    fn zoom_is_clamped_to_limits() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        vp.set_zoom(1e9);
        assert_eq!(vp.zoom(), DEFAULT_MAX_ZOOM);

        // Reversed limits are normalized and the zoom pulled into them.
        vp.set_zoom_limits(4.0, 0.5);
        assert_eq!(vp.zoom_limits(), (0.5, 4.0));
        assert_eq!(vp.zoom(), 4.0);

        vp.set_zoom_limits(-1.0, 2.0);
        assert_eq!(vp.zoom_limits(), (0.5, 4.0));

        vp.set_zoom(f64::NAN);
        assert_eq!(vp.zoom(), 4.0);
    }

    #[test]
    fn panning_is_never_clamped() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        vp.pan_by_view(Vec2::new(-1.0e12, 3.0e12));
        let visible = vp.visible_world_rect();
        assert!((visible.x0 - 1.0e12).abs() < 1.0);
        assert!((visible.y0 + 3.0e12).abs() < 1.0);

        vp.pan_by_view(Vec2::new(f64::INFINITY, 0.0));
        assert!(vp.pan().is_finite());
    }

    #[test]
    fn center_on_puts_point_in_the_middle() {
        let view_rect = Rect::new(0.0, 0.0, 400.0, 300.0);
        let mut vp = Viewport::new(view_rect);
        vp.set_zoom(3.0);
        let target = Point::new(-5000.0, 42.0);
        vp.center_on(target);
        assert!(close(vp.world_to_view_point(target), view_rect.center()));
        assert!(close(vp.visible_world_rect().center(), target));
    }

    #[test]
    fn resize_keeps_zoom_and_pan() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        vp.set_zoom(2.0);
        vp.pan_by_view(Vec2::new(10.0, 10.0));
        let origin_world = vp.view_to_world_point(Point::ORIGIN);
        vp.set_view_rect(Rect::new(0.0, 0.0, 1024.0, 768.0));
        assert_eq!(vp.zoom(), 2.0);
        assert!(close(vp.view_to_world_point(Point::ORIGIN), origin_world));
        assert_eq!(vp.visible_world_rect().width(), 512.0);
    }

    #[test]
    fn rect_conversion_and_debug_info() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        vp.set_zoom(4.0);
        assert_eq!(vp.world_units_per_pixel(), 0.25);

        let world = Rect::new(1.0, 2.0, 3.0, 5.0);
        let view = vp.world_to_view_rect(world);
        assert_eq!(view, Rect::new(4.0, 8.0, 12.0, 20.0));
        assert_eq!(vp.view_to_world_rect(view), world);

        let info = vp.debug_info();
        assert_eq!(info.zoom, 4.0);
        assert_eq!(info.transform, vp.transform());
        assert_eq!(info.visible_world_rect, Rect::new(0.0, 0.0, 100.0, 75.0));
        assert!(info.min_zoom <= info.max_zoom);
    }
}
