// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Covering and drawing a stack of tilings.

use alloc::vec::Vec;

use kurbo::{Affine, Rect};
use log::{debug, trace, warn};
use wallpaper_lattice::{LatticeCover, PanZoom, cover_viewport};

use crate::drawable::{DrawContext, Drawable};
use crate::surface::Surface;
use crate::tiling::Tiling;

/// Computes one [`LatticeCover`] per tiling, in the same order.
///
/// `viewport` is in canvas pixels and `transform` maps the pattern's world
/// frame into them. This is pure: identical inputs give identical covers.
#[must_use]
pub fn cover_tilings(
    viewport: Rect,
    transform: PanZoom,
    tilings: &[Tiling],
) -> Vec<LatticeCover> {
    tilings
        .iter()
        .enumerate()
        .map(|(i, tiling)| {
            let bounds = tiling.origin_bounds();
            let cover = cover_viewport(bounds, tiling.basis(), transform, viewport);
            trace!(
                "tiling {i}: {} copies in {} rows",
                cover.len(),
                cover.set().row_count()
            );
            cover
        })
        .collect()
}

/// Draws every tiling's unit once per coordinate of its cover.
///
/// Tilings are drawn in slice order, so later tilings paint over earlier
/// ones. Within a tiling, copies are drawn row by row. Each copy is drawn
/// with `transform` composed with the translation to its lattice position
/// (plus the tiling offset). Returns the number of copies drawn.
pub fn composite(
    surface: &mut dyn Surface,
    transform: PanZoom,
    tilings: &[Tiling],
    covers: &[LatticeCover],
) -> usize {
    if tilings.len() != covers.len() {
        warn!(
            "composite called with {} tilings but {} covers; extra entries are skipped",
            tilings.len(),
            covers.len()
        );
    }
    let view = transform.to_affine();
    let mut draws = 0;
    for (tiling, cover) in tilings.iter().zip(covers) {
        let unit = tiling.unit();
        for offset in cover.offsets() {
            let cx = DrawContext::new(view * Affine::translate(offset + tiling.offset()));
            unit.draw(surface, &cx);
            draws += 1;
        }
    }
    draws
}

/// Covers and draws `tilings` in one pass.
///
/// This is the entry point a host calls after every pan or zoom. It holds
/// no state between calls; the returned covers describe exactly what was
/// drawn.
pub fn render(
    surface: &mut dyn Surface,
    viewport: Rect,
    transform: PanZoom,
    tilings: &[Tiling],
) -> Vec<LatticeCover> {
    let covers = cover_tilings(viewport, transform, tilings);
    let draws = composite(surface, transform, tilings, &covers);
    debug!(
        "rendered {draws} copies from {} tilings (scale {}, translation {:?})",
        tilings.len(),
        transform.scale,
        transform.translation
    );
    covers
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::{Affine, Point, Rect, Vec2};
    use peniko::{Brush, Color};
    use wallpaper_lattice::{Basis, PanZoom};

    use super::{composite, cover_tilings, render};
    use crate::drawable::DrawableExt;
    use crate::surface::RecordingSurface;
    use crate::tiling::{Tiling, Unit};

    fn unit_square() -> Unit {
        Unit::from_shape(Rect::new(-0.5, -0.5, 0.5, 0.5))
    }

    #[test]
    fn boundary_scenario_draws_eleven_by_eleven() {
        let tiling = Tiling::new(unit_square(), Basis::square(1.0).unwrap());
        let mut surface = RecordingSurface::new();
        let covers = render(
            &mut surface,
            Rect::new(-5.0, -5.0, 5.0, 5.0),
            PanZoom::IDENTITY,
            &[tiling],
        );
        assert_eq!(covers.len(), 1);
        assert_eq!(covers[0].len(), 121);
        assert_eq!(surface.len(), 121);

        // Row by row, left to right.
        let origins: Vec<Point> = surface
            .fills()
            .iter()
            .map(|f| f.transform * Point::ORIGIN)
            .collect();
        assert_eq!(origins[0], Point::new(-5.0, -5.0));
        assert_eq!(origins[1], Point::new(-4.0, -5.0));
        assert_eq!(origins[120], Point::new(5.0, 5.0));
    }

    #[test]
    fn later_tilings_paint_over_earlier_ones() {
        let basis = Basis::square(2.0).unwrap();
        let red = Brush::Solid(Color::from_rgb8(255, 0, 0));
        let blue = Brush::Solid(Color::from_rgb8(0, 0, 255));
        let bounds = Rect::new(-0.5, -0.5, 0.5, 0.5);
        let tilings = [
            Tiling::new(Unit::new(unit_square().with_fill(red.clone()), bounds), basis),
            Tiling::new(Unit::new(unit_square().with_fill(blue.clone()), bounds), basis)
                .with_offset(Vec2::new(1.0, 1.0)),
        ];
        let mut surface = RecordingSurface::new();
        let covers = render(
            &mut surface,
            Rect::new(0.0, 0.0, 8.0, 8.0),
            PanZoom::uniform_scale(4.0),
            &tilings,
        );

        let first = usize::try_from(covers[0].len()).unwrap();
        let total = first + usize::try_from(covers[1].len()).unwrap();
        assert_eq!(surface.len(), total);
        assert!(surface.fills()[..first].iter().all(|f| f.brush == red));
        assert!(surface.fills()[first..].iter().all(|f| f.brush == blue));
    }

    #[test]
    fn draw_transform_is_view_then_lattice_offset() {
        let basis = Basis::new(Vec2::new(3.0, 0.0), Vec2::new(1.0, 2.0)).unwrap();
        let tiling = Tiling::new(unit_square(), basis).with_offset(Vec2::new(0.25, 0.0));
        let transform = PanZoom::new(Vec2::new(10.0, 20.0), 2.0);
        let tilings = [tiling];
        let covers = cover_tilings(Rect::new(0.0, 0.0, 40.0, 30.0), transform, &tilings);

        let mut surface = RecordingSurface::new();
        let draws = composite(&mut surface, transform, &tilings, &covers);
        assert_eq!(draws, surface.len());

        for (fill, offset) in surface.fills().iter().zip(covers[0].offsets()) {
            let expected =
                transform.to_affine() * Affine::translate(offset + Vec2::new(0.25, 0.0));
            assert_eq!(fill.transform, expected);
        }
    }

    #[test]
    fn identical_inputs_render_identically() {
        let basis = Basis::new(Vec2::new(1.0, 0.0), Vec2::new(0.5, 0.866)).unwrap();
        let tilings = vec![Tiling::new(unit_square(), basis)];
        let viewport = Rect::new(0.0, 0.0, 320.0, 200.0);
        let transform = PanZoom::new(Vec2::new(-12_345.5, 678.25), 24.0);

        let mut a = RecordingSurface::new();
        let mut b = RecordingSurface::new();
        let first = render(&mut a, viewport, transform, &tilings);
        let second = render(&mut b, viewport, transform, &tilings);
        assert_eq!(first, second);
        assert_eq!(a.fills(), b.fills());
    }

    #[test]
    fn viewport_between_copies_draws_nothing() {
        let tiling = Tiling::new(unit_square(), Basis::square(1000.0).unwrap());
        let mut surface = RecordingSurface::new();
        let covers = render(
            &mut surface,
            Rect::new(400.0, 400.0, 410.0, 410.0),
            PanZoom::IDENTITY,
            &[tiling.clone()],
        );
        assert_eq!(covers.len(), 1);
        assert!(covers[0].is_empty());
        assert!(surface.is_empty());

        // Panned so the origin copy's corner touches the viewport.
        let covers = render(
            &mut surface,
            Rect::new(400.0, 400.0, 410.0, 410.0),
            PanZoom::translate(Vec2::new(399.5, 399.5)),
            &[tiling],
        );
        assert_eq!(covers[0].len(), 1);
        assert_eq!(surface.len(), 1);
        assert_eq!(
            surface.fills()[0].transform * Point::ORIGIN,
            Point::new(399.5, 399.5)
        );
    }

    #[test]
    fn no_tilings_draws_nothing() {
        let mut surface = RecordingSurface::new();
        let covers = render(
            &mut surface,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            PanZoom::IDENTITY,
            &[],
        );
        assert!(covers.is_empty());
        assert!(surface.is_empty());
    }

    #[test]
    fn mismatched_covers_are_skipped() {
        let tilings = [
            Tiling::new(unit_square(), Basis::square(1.0).unwrap()),
            Tiling::new(unit_square(), Basis::square(1.0).unwrap()),
        ];
        let viewport = Rect::new(-1.0, -1.0, 1.0, 1.0);
        let covers = cover_tilings(viewport, PanZoom::IDENTITY, &tilings[..1]);
        let mut surface = RecordingSurface::new();
        let draws = composite(&mut surface, PanZoom::IDENTITY, &tilings, &covers);
        assert_eq!(draws, 9);
    }
}
