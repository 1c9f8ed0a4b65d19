use axis_core::{Axis, PixelRect, PlotPoint, PlotTransform, ScaleKind, ScaleTransform};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

fn gen_points(n: usize) -> Vec<PlotPoint> {
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        let x = 1.0 + i as f64 * 0.01;
        // strictly positive so the log combos stay in domain
        let y = (i as f64 * 0.01).sin() * 10.0 + 11.0;
        v.push(PlotPoint::new(x, y));
    }
    v
}

fn bench_transform(c: &mut Criterion) {
    let rect = PixelRect::from_ltwh(60.0, 10.0, 1600.0, 900.0);
    let mut group = c.benchmark_group("transform");
    for &n in &[10_000usize, 100_000usize] {
        let pts = gen_points(n);
        let x_max = pts.last().map_or(2.0, |p| p.x);
        for (name, xk, yk) in [
            ("linlin", ScaleKind::Linear, ScaleKind::Linear),
            ("loglog", ScaleKind::Log10, ScaleKind::Log10),
        ] {
            let x = Axis::new("x", 1.0, x_max).with_kind(xk);
            let y = Axis::new("y", 1.0, 21.0).with_kind(yk);
            let tr = PlotTransform::from_axes(&x, &y, &rect);
            group.bench_with_input(BenchmarkId::from_parameter(format!("{name}_n{n}")), &pts, |b, pts| {
                b.iter(|| {
                    let mut acc = 0.0f32;
                    for p in pts {
                        let s = tr.to_screen(*p);
                        acc += s.x + s.y;
                    }
                    black_box(acc)
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
