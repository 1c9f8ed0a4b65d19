// File: crates/axis-core/tests/fit.rs
// Purpose: Extent accumulation and the fit rules, including degenerate data and locked bounds.

use axis_core::fit::{apply_fit, fit_range};
use axis_core::{Axis, AxisFlags, AxisId, Extents, FitAccumulator, FitConfig, PlotPoint, ScaleKind, YAxis};

fn extents(values: &[f64]) -> Extents {
    let mut e = Extents::default();
    for &v in values {
        e.extend(v);
    }
    e
}

#[test]
fn accumulates_x_and_y_extents() {
    let mut acc = FitAccumulator::new();
    for p in [(1.0, 1.0), (5.0, 9.0), (-2.0, 3.0)] {
        acc.extend(PlotPoint::from(p));
    }
    assert_eq!(acc.extents(AxisId::X), Extents { min: -2.0, max: 5.0 });
    assert_eq!(acc.extents(AxisId::Y(YAxis::Y1)), Extents { min: 1.0, max: 9.0 });
    assert!(acc.extents(AxisId::Y(YAxis::Y2)).is_empty());

    acc.reset();
    assert!(acc.extents(AxisId::X).is_empty());
}

#[test]
fn non_finite_values_are_skipped() {
    let e = extents(&[f64::NAN, 2.0, f64::INFINITY, -1.0, f64::NEG_INFINITY]);
    assert_eq!((e.min, e.max), (-1.0, 2.0));
    assert!(extents(&[f64::NAN]).is_empty());
}

#[test]
fn log_axes_skip_non_positive_values() {
    let mut acc = FitAccumulator::with_kinds(ScaleKind::Linear, [ScaleKind::Log10, ScaleKind::Linear, ScaleKind::Linear]);
    acc.extend(PlotPoint::new(-3.0, -3.0));
    acc.extend(PlotPoint::new(0.0, 0.0));
    acc.extend(PlotPoint::new(4.0, 20.0));
    acc.extend_on(YAxis::Y2, PlotPoint::new(1.0, -7.0));
    assert_eq!(acc.extents(AxisId::X), Extents { min: -3.0, max: 4.0 });
    assert_eq!(acc.extents(AxisId::Y(YAxis::Y1)), Extents { min: 20.0, max: 20.0 });
    assert_eq!(acc.extents(AxisId::Y(YAxis::Y2)), Extents { min: -7.0, max: -7.0 });
}

#[test]
fn report_single_axis_values() {
    let mut acc = FitAccumulator::new();
    acc.extend_axis(AxisId::Y(YAxis::Y3), 12.0);
    acc.extend_axis(AxisId::Y(YAxis::Y3), -4.0);
    assert_eq!(acc.extents(AxisId::Y(YAxis::Y3)).as_range().map(|r| (r.min, r.max)), Some((-4.0, 12.0)));
    assert!(acc.extents(AxisId::X).as_range().is_none());
}

#[test]
fn degenerate_extents_get_a_renderable_width() {
    let cfg = FitConfig::default();
    let r = fit_range(extents(&[3.0]), ScaleKind::Linear, &cfg).unwrap();
    assert!((r.min - 2.7).abs() < 1e-12 && (r.max - 3.3).abs() < 1e-12, "{r:?}");

    let r = fit_range(extents(&[0.0]), ScaleKind::Linear, &cfg).unwrap();
    assert_eq!((r.min, r.max), (-0.1, 0.1));

    let r = fit_range(extents(&[10.0]), ScaleKind::Log10, &cfg).unwrap();
    assert!((r.min - 10.0 / 1.1).abs() < 1e-9 && (r.max - 11.0).abs() < 1e-9, "{r:?}");

    let r = fit_range(extents(&[1_700_000_000.0]), ScaleKind::Time, &cfg).unwrap();
    assert_eq!((r.min, r.max), (1_699_999_999.0, 1_700_000_001.0));
}

#[test]
fn padding_widens_fitted_span() {
    let cfg = FitConfig { padding: 0.1, ..FitConfig::default() };
    let r = fit_range(extents(&[0.0, 10.0]), ScaleKind::Linear, &cfg).unwrap();
    assert_eq!((r.min, r.max), (-1.0, 11.0));

    let r = fit_range(extents(&[1.0, 100.0]), ScaleKind::Log10, &cfg).unwrap();
    // 0.2 decades each side
    assert!((r.min.log10() + 0.2).abs() < 1e-9 && (r.max.log10() - 2.2).abs() < 1e-9, "{r:?}");
}

#[test]
fn apply_fit_sets_axis_range() {
    let mut axis = Axis::new("x", 0.0, 1.0);
    assert!(apply_fit(&mut axis, extents(&[40.0, 50.0]), &FitConfig::default()));
    assert_eq!((axis.range().min, axis.range().max), (40.0, 50.0));

    let mut single = Axis::new("y", 0.0, 1.0);
    assert!(apply_fit(&mut single, extents(&[7.0]), &FitConfig::default()));
    assert!(single.range().max > single.range().min);
}

#[test]
fn locked_bound_survives_fit() {
    let flags = AxisFlags { lock_min: true, ..AxisFlags::default() };
    let mut axis = Axis::new("x", 0.0, 10.0).with_flags(flags);
    assert!(apply_fit(&mut axis, extents(&[2.0, 5.0]), &FitConfig::default()));
    assert_eq!((axis.range().min, axis.range().max), (0.0, 5.0));
}

#[test]
fn empty_extents_leave_axis_alone() {
    let mut axis = Axis::new("x", 0.0, 10.0);
    assert!(!apply_fit(&mut axis, Extents::EMPTY, &FitConfig::default()));
    assert_eq!((axis.range().min, axis.range().max), (0.0, 10.0));
}
