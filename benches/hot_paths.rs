use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quakemap::braille::BrailleCanvas;
use quakemap::encode::{bucket_color, marker_radius};
use quakemap::map::geometry::draw_circle;
use quakemap::map::projection::Viewport;

fn bench_encoding(c: &mut Criterion) {
    c.bench_function("bucket_color_sweep", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(bucket_color(black_box(i as f64 * 0.7 - 50.0)));
            }
        })
    });

    c.bench_function("marker_radius_sweep", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(marker_radius(black_box(i as f64 * 0.01)));
            }
        })
    });
}

fn bench_projection(c: &mut Criterion) {
    let viewport = Viewport::new(0.0, 20.0, 3.0, 400, 160);
    c.bench_function("project_grid", |b| {
        b.iter(|| {
            for lon in -18..18 {
                for lat in -8..8 {
                    black_box(viewport.project(
                        black_box(lon as f64 * 10.0),
                        black_box(lat as f64 * 10.0),
                    ));
                }
            }
        })
    });
}

fn bench_marker_drawing(c: &mut Criterion) {
    c.bench_function("draw_500_markers", |b| {
        b.iter(|| {
            let mut canvas = BrailleCanvas::new(200, 40);
            for i in 0..500 {
                let x = (i * 7) % 400;
                let y = (i * 3) % 160;
                draw_circle(&mut canvas, x, y, 3);
            }
            black_box(canvas);
        })
    });
}

criterion_group!(benches, bench_encoding, bench_projection, bench_marker_drawing);
criterion_main!(benches);
