// File: crates/axis-core/tests/transform.rs
// Purpose: Plot <-> pixel mappings for the four linear/log combinations, inversion and degenerate rects.

use axis_core::{Axis, AxisFlags, AxisTransform, PixelPoint, PixelRect, PlotPoint, PlotTransform, Range, ScaleCombo, ScaleKind, ScaleTransform};

fn rect() -> PixelRect {
    PixelRect::from_ltwh(10.0, 20.0, 400.0, 300.0)
}

fn close(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * b.abs().max(1.0)
}

#[test]
fn linear_round_trip() {
    let x = Axis::new("x", -3.0, 7.0);
    let y = Axis::new("y", 100.0, 250.0);
    let tr = PlotTransform::from_axes(&x, &y, &rect());
    assert_eq!(tr.combo(), ScaleCombo::LinLin);
    for v in [-3.0, -1.5, 0.0, 2.25, 7.0] {
        let back = tr.from_screen_x(tr.to_screen_x(v));
        assert!(close(back, v, 1e-5), "{v} -> {back}");
    }
    for v in [100.0, 133.3, 250.0] {
        let back = tr.from_screen_y(tr.to_screen_y(v));
        assert!(close(back, v, 1e-5), "{v} -> {back}");
    }
}

#[test]
fn log_round_trip_and_combos() {
    let lin = Axis::new("x", 0.0, 1.0);
    let log = Axis::new("y", 1.0, 1000.0).with_kind(ScaleKind::Log10);
    let r = rect();
    assert_eq!(PlotTransform::from_axes(&lin, &log, &r).combo(), ScaleCombo::LinLog);
    assert_eq!(PlotTransform::from_axes(&log, &lin, &r).combo(), ScaleCombo::LogLin);
    assert_eq!(PlotTransform::from_axes(&log, &log, &r).combo(), ScaleCombo::LogLog);

    let tr = PlotTransform::from_axes(&log, &log, &r);
    for v in [1.0, 5.0, 10.0, 123.4, 1000.0] {
        let bx = tr.from_screen_x(tr.to_screen_x(v));
        let by = tr.from_screen_y(tr.to_screen_y(v));
        assert!((bx - v).abs() / v < 1e-4, "x {v} -> {bx}");
        assert!((by - v).abs() / v < 1e-4, "y {v} -> {by}");
    }
}

#[test]
fn endpoints_land_on_rect_edges() {
    let x = Axis::new("x", -3.0, 7.0);
    let y = Axis::new("y", 1.0, 1000.0).with_kind(ScaleKind::Log10);
    let r = rect();
    let tr = PlotTransform::from_axes(&x, &y, &r);
    assert!((tr.to_screen_x(-3.0) - r.min.x).abs() < 1e-3);
    assert!((tr.to_screen_x(7.0) - r.max.x).abs() < 1e-3);
    // y grows upward
    assert!((tr.to_screen_y(1.0) - r.max.y).abs() < 1e-3);
    assert!((tr.to_screen_y(1000.0) - r.min.y).abs() < 1e-3);
    // decades are evenly spaced on a log axis
    let d1 = tr.to_screen_y(1.0) - tr.to_screen_y(10.0);
    let d2 = tr.to_screen_y(10.0) - tr.to_screen_y(100.0);
    assert!((d1 - d2).abs() < 1e-3);
}

#[test]
fn inverted_axes_swap_ends() {
    let flags = AxisFlags { invert: true, ..AxisFlags::default() };
    let x = Axis::new("x", 0.0, 10.0).with_flags(flags);
    let y = Axis::new("y", 0.0, 10.0).with_flags(flags);
    let r = rect();
    let tr = PlotTransform::from_axes(&x, &y, &r);
    assert!((tr.to_screen_x(0.0) - r.max.x).abs() < 1e-3);
    assert!((tr.to_screen_y(0.0) - r.min.y).abs() < 1e-3);
    let p = PlotPoint::new(2.5, 7.5);
    let back = tr.from_screen(tr.to_screen(p));
    assert!(close(back.x, p.x, 1e-5) && close(back.y, p.y, 1e-5));
}

#[test]
fn zero_width_rect_maps_to_one_pixel() {
    let tr = AxisTransform::new(Range::new(0.0, 10.0), 5.0, 5.0, false);
    assert_eq!(tr.to_pixel(0.0), 5.0);
    assert_eq!(tr.to_pixel(10.0), 5.0);
    assert_eq!(tr.to_plot(123.0), 0.0);

    let x = Axis::new("x", 0.0, 1.0);
    let flat = PixelRect::from_ltwh(5.0, 5.0, 0.0, 0.0);
    let pt = PlotTransform::from_axes(&x, &x, &flat).to_screen(PlotPoint::new(0.7, 0.2));
    assert_eq!(pt, PixelPoint::new(5.0, 5.0));
}

#[test]
fn time_axis_round_trip_at_epoch_magnitudes() {
    let t0 = 1_700_000_000.0;
    let r = rect();
    for span in [0.001, 60.0, 86_400.0, 10.0 * 365.0 * 86_400.0] {
        let x = Axis::new("t", t0, t0 + span).with_kind(ScaleKind::Time);
        let tr = AxisTransform::horizontal(&x, &r);
        // timestamp rounding plus a thousandth of a pixel
        let tol = 2.0 * f64::EPSILON * (t0 + span) + span / r.width() as f64 * 1e-3;
        for f in [0.0, 0.1, 0.5, 0.77, 1.0] {
            let v = t0 + f * span;
            let back = tr.to_plot(tr.to_pixel(v));
            assert!((back - v).abs() <= tol, "span {span}: {v} -> {back} (tol {tol})");
        }
    }
}

#[test]
fn full_f64_range_maps_finitely() {
    let x = Axis::new("x", f64::NEG_INFINITY, f64::INFINITY);
    assert_eq!((x.range().min, x.range().max), (f64::MIN, f64::MAX));
    let tr = AxisTransform::new(x.range(), 0.0, 400.0, false);
    assert_eq!(tr.to_pixel(f64::MIN), 0.0);
    assert_eq!(tr.to_pixel(0.0), 200.0);
    assert_eq!(tr.to_pixel(f64::MAX), 400.0);
    assert_eq!(tr.to_plot(200.0), 0.0);
    for v in [f64::MIN, -1e300, 0.0, f64::MAX * 0.25, f64::MAX] {
        let back = tr.to_plot(tr.to_pixel(v));
        assert!(back.is_finite() && (back * 0.5 - v * 0.5).abs() <= f64::MAX * 1e-6, "{v} -> {back}");
    }
    // past the ends saturates instead of overflowing
    assert_eq!(tr.to_plot(-40.0), f64::MIN);
    assert_eq!(tr.to_plot(440.0), f64::MAX);
}
