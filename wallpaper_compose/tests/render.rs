// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end rendering through a pan/zoom viewport.

use kurbo::{Affine, BezPath, Point, Rect, Vec2};
use peniko::{Brush, Color};
use wallpaper_compose::{
    DrawContext, Drawable, DrawableExt, Layers, RecordingSurface, Surface, Tiling, Unit,
    from_fn, render,
};
use wallpaper_lattice::Basis;
use wallpaper_view::Viewport;

/// Counts fills without keeping them.
#[derive(Default)]
struct CountingSurface {
    fills: usize,
}

impl Surface for CountingSurface {
    fn fill_path(&mut self, _transform: Affine, _brush: &Brush, _path: &BezPath) {
        self.fills += 1;
    }
}

fn tile() -> Unit {
    Unit::from_shape(Rect::new(5.0, 5.0, 45.0, 45.0))
}

fn origins(surface: &RecordingSurface) -> Vec<Point> {
    surface
        .fills()
        .iter()
        .map(|f| f.transform * Point::ORIGIN)
        .collect()
}

#[test]
fn panning_by_whole_cells_redraws_the_same_picture() {
    let tilings = [Tiling::new(tile(), Basis::square(50.0).unwrap())];
    let mut view = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));

    let mut home = RecordingSurface::new();
    render(&mut home, view.view_rect(), view.transform(), &tilings);

    // A million cells to the left.
    view.pan_by_view(Vec2::new(-50.0e6, 0.0));
    let mut away = RecordingSurface::new();
    render(&mut away, view.view_rect(), view.transform(), &tilings);

    assert!(!home.is_empty());
    assert_eq!(origins(&home), origins(&away));
}

#[test]
fn zooming_out_draws_more_copies() {
    let tilings = [Tiling::new(tile(), Basis::square(50.0).unwrap())];
    let mut view = Viewport::new(Rect::new(0.0, 0.0, 400.0, 400.0));
    view.center_on(Point::new(12_345.0, -6_789.0));

    let mut near = CountingSurface::default();
    render(&mut near, view.view_rect(), view.transform(), &tilings);

    view.zoom_about_view_point(view.view_rect().center(), 0.25);
    let mut far = CountingSurface::default();
    render(&mut far, view.view_rect(), view.transform(), &tilings);

    // 8x8 cells (plus a ring) versus 32x32 cells (plus a ring).
    assert!((64..=100).contains(&near.fills), "{} fills", near.fills);
    assert!((1_024..=1_156).contains(&far.fills), "{} fills", far.fills);
}

#[test]
fn every_drawn_copy_touches_the_viewport_or_its_square() {
    let basis = Basis::new(Vec2::new(40.0, 0.0), Vec2::new(20.0, 34.64)).unwrap();
    let bounds = Rect::new(-15.0, -15.0, 15.0, 15.0);
    let tilings = [Tiling::new(Unit::new(tile(), bounds), basis)];
    let mut view = Viewport::new(Rect::new(0.0, 0.0, 640.0, 480.0));
    view.set_zoom(1.5);
    view.pan_by_view(Vec2::new(-98_765.0, 4_321.0));

    let mut surface = RecordingSurface::new();
    let covers = render(&mut surface, view.view_rect(), view.transform(), &tilings);
    assert_eq!(covers[0].len(), surface.len() as u64);

    // The search squares the viewport, so copies may spill past the short
    // side, but never past the square around the view.
    let view_rect = view.view_rect();
    let square = Rect::from_center_size(view_rect.center(), (640.0, 640.0));
    for fill in surface.fills() {
        let drawn = fill.transform.transform_rect_bbox(bounds);
        assert!(
            drawn.x0 <= square.x1 + 1e-6
                && square.x0 <= drawn.x1 + 1e-6
                && drawn.y0 <= square.y1 + 1e-6
                && square.y0 <= drawn.y1 + 1e-6,
            "{drawn:?} is outside {square:?}"
        );
    }
}

#[test]
fn layered_unit_draws_each_layer_per_copy() {
    let base = from_fn(|surface: &mut dyn Surface, cx: &DrawContext| {
        let path = kurbo::Shape::to_path(&Rect::new(0.0, 0.0, 10.0, 10.0), 0.1);
        surface.fill_path(cx.transform, &cx.brush, &path);
    });
    let accent = Rect::new(2.0, 2.0, 4.0, 4.0);
    let layers = Layers::new()
        .with(base.with_fill(Color::WHITE))
        .with(wallpaper_compose::Filled::new(accent).with_fill(Color::BLACK));
    let unit = Unit::new(layers, Rect::new(0.0, 0.0, 10.0, 10.0));
    let tilings = [Tiling::new(unit, Basis::square(10.0).unwrap())];

    let mut surface = RecordingSurface::new();
    let covers = render(
        &mut surface,
        Rect::new(0.5, 0.5, 29.5, 29.5),
        wallpaper_lattice::PanZoom::IDENTITY,
        &tilings,
    );

    let copies = usize::try_from(covers[0].len()).unwrap();
    assert_eq!(copies, 9);
    assert_eq!(surface.len(), 2 * copies);
    for pair in surface.fills().chunks(2) {
        assert_eq!(pair[0].brush, Brush::Solid(Color::WHITE));
        assert_eq!(pair[1].brush, Brush::Solid(Color::BLACK));
        assert_eq!(pair[0].transform, pair[1].transform);
    }

    // The unit itself is a drawable too.
    let mut single = RecordingSurface::new();
    tilings[0].unit().draw(&mut single, &DrawContext::default());
    assert_eq!(single.len(), 2);
}
