// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Vec2};
use wallpaper_compose::{RecordingSurface, Tiling, Unit, render};
use wallpaper_lattice::{Basis, PanZoom, cover_viewport};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn next_f64(&mut self, lo: f64, hi: f64) -> f64 {
        let t = f64::from(self.next_u32()) / f64::from(u32::MAX);
        lo + (hi - lo) * t
    }
}

const UNIT: Rect = Rect::new(-0.5, -0.5, 0.5, 0.5);

fn random_pans(n: usize, seed: u64, extent: f64) -> Vec<PanZoom> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| {
            let t = Vec2::new(rng.next_f64(-extent, extent), rng.next_f64(-extent, extent));
            PanZoom::new(t, rng.next_f64(4.0, 16.0))
        })
        .collect()
}

fn bench_viewport_sizes(c: &mut Criterion) {
    let basis = Basis::square(1.0).unwrap();
    let mut group = c.benchmark_group("cover_viewport/size");
    for &side in &[64.0_f64, 256.0, 1024.0] {
        let viewport = Rect::new(0.0, 0.0, side, side);
        let transform = PanZoom::uniform_scale(8.0);
        let copies = cover_viewport(UNIT, &basis, transform, viewport).len();
        group.throughput(Throughput::Elements(copies));
        group.bench_function(BenchmarkId::from_parameter(side), |b| {
            b.iter(|| {
                black_box(cover_viewport(
                    black_box(UNIT),
                    &basis,
                    black_box(transform),
                    viewport,
                ))
            });
        });
    }
    group.finish();
}

fn bench_far_pans(c: &mut Criterion) {
    let basis = Basis::new(Vec2::new(1.0, 0.0), Vec2::new(0.5, 0.866)).unwrap();
    let viewport = Rect::new(0.0, 0.0, 512.0, 384.0);
    let mut group = c.benchmark_group("cover_viewport/pan");
    for &extent in &[1.0e3_f64, 1.0e6, 1.0e9] {
        let pans = random_pans(64, 0xC0FFEE, extent);
        group.bench_function(BenchmarkId::from_parameter(extent), |b| {
            b.iter(|| {
                for &transform in &pans {
                    black_box(cover_viewport(UNIT, &basis, transform, viewport));
                }
            });
        });
    }
    group.finish();
}

fn bench_oblique_bases(c: &mut Criterion) {
    let viewport = Rect::new(0.0, 0.0, 512.0, 512.0);
    let transform = PanZoom::new(Vec2::new(-1.0e5, 3.0e4), 6.0);
    let mut group = c.benchmark_group("cover_viewport/shear");
    for &shear in &[0.0_f64, 10.0, 100.0, 1000.0] {
        let basis = Basis::new(Vec2::new(1.0, 0.0), Vec2::new(shear, 1.0)).unwrap();
        group.bench_function(BenchmarkId::from_parameter(shear), |b| {
            b.iter(|| black_box(cover_viewport(UNIT, black_box(&basis), transform, viewport)));
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let basis = Basis::square(2.0).unwrap();
    let tilings = [
        Tiling::new(Unit::from_shape(UNIT), basis),
        Tiling::new(Unit::from_shape(UNIT), basis).with_offset(Vec2::new(1.0, 1.0)),
    ];
    let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
    let mut group = c.benchmark_group("render");
    for &scale in &[40.0_f64, 10.0, 4.0] {
        let transform = PanZoom::new(Vec2::new(-2.5e7, 1.25e7), scale);
        group.bench_function(BenchmarkId::new("two_tilings", scale), |b| {
            let mut surface = RecordingSurface::new();
            b.iter(|| {
                surface.clear();
                black_box(render(&mut surface, viewport, transform, &tilings));
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_viewport_sizes,
    bench_far_pans,
    bench_oblique_bases,
    bench_render
);
criterion_main!(benches);
