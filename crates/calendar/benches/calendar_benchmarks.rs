//! Calendar benchmarks.

use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use calendar::{CalendarConfig, CalendarEngine};
use render::{CalendarPainter, Figure, FontCache, Rasterizer, Theme};
use timeline::{default_life, CalendarGrid, Timeline};

fn timeline() -> Timeline {
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    Timeline::new(default_life(today).unwrap()).unwrap()
}

/// Benchmark week classification.
fn bench_classification(c: &mut Criterion) {
    let timeline = timeline();
    let mut group = c.benchmark_group("classification");

    group.bench_function("build_grid", |b| {
        b.iter(|| black_box(CalendarGrid::build(&timeline).unwrap().len()))
    });

    group.bench_function("classify_counter", |b| {
        let classifier = timeline.classifier();
        b.iter(|| black_box(classifier.classify(black_box(1_800)).unwrap()))
    });

    group.finish();
}

/// Benchmark display list generation.
fn bench_painting(c: &mut Criterion) {
    let timeline = timeline();
    let grid = CalendarGrid::build(&timeline).unwrap();
    let fonts = Arc::new(FontCache::new());
    let painter = CalendarPainter::new(Figure::new(300), Theme::dark(), fonts);

    let mut group = c.benchmark_group("painting");

    group.bench_function("paint", |b| {
        b.iter(|| black_box(painter.paint(&grid, &timeline, Some(0.5)).len()))
    });

    group.finish();
}

/// Benchmark rasterization at several resolutions.
fn bench_rasterization(c: &mut Criterion) {
    let timeline = timeline();
    let grid = CalendarGrid::build(&timeline).unwrap();
    let fonts = Arc::new(FontCache::new());
    let rasterizer = Rasterizer::new(fonts.clone());

    let mut group = c.benchmark_group("rasterization");
    group.sample_size(10);

    for dpi in [72u32, 150, 300].iter() {
        let figure = Figure::new(*dpi);
        let list = CalendarPainter::new(figure, Theme::dark(), fonts.clone()).paint(&grid, &timeline, None);
        let (width, height) = figure.pixel_size();

        group.bench_with_input(BenchmarkId::new("dpi", dpi), dpi, |b, _| {
            b.iter(|| black_box(rasterizer.render(&list, width, height).as_bytes().len()))
        });
    }

    group.finish();
}

/// Benchmark a full frame at preview resolution.
fn bench_render_frame(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let engine = CalendarEngine::with_fonts(
        CalendarConfig::preview(),
        default_life(today).unwrap(),
        Arc::new(FontCache::new()),
    )
    .unwrap();

    let mut group = c.benchmark_group("render_frame");
    group.sample_size(10);

    group.bench_function("preview_dark", |b| {
        b.iter(|| black_box(engine.render_frame(Theme::dark(), Some(1.0)).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_classification,
    bench_painting,
    bench_rasterization,
    bench_render_frame,
);

criterion_main!(benches);
