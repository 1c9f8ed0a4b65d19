// File: crates/axis-core/src/scale.rs
// Summary: Plot-space <-> pixel-space transforms for linear and log10 axes, composed per X/Y pair.

use crate::axis::{Axis, ScaleKind};
use crate::geometry::{PixelPoint, PixelRect};
use crate::range::Range;
use crate::types::PlotPoint;

/// Logical X coordinate (e.g., sample index or timestamp).
pub type Logical = f64;
/// Value Y coordinate.
pub type Value = f64;

/// General scale transform operations for an X/Y axis pair.
pub trait ScaleTransform {
    fn to_screen_x(&self, x: Logical) -> f32;
    fn to_screen_y(&self, y: Value) -> f32;
    fn from_screen_x(&self, px: f32) -> Logical;
    fn from_screen_y(&self, py: f32) -> Value;

    fn to_screen(&self, p: PlotPoint) -> PixelPoint {
        PixelPoint::new(self.to_screen_x(p.x), self.to_screen_y(p.y))
    }
    fn from_screen(&self, p: PixelPoint) -> PlotPoint {
        PlotPoint::new(self.from_screen_x(p.x), self.from_screen_y(p.y))
    }
}

/// The four X/Y scale combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleCombo {
    LinLin,
    /// log x, linear y
    LogLin,
    /// linear x, log y
    LinLog,
    LogLog,
}

impl ScaleCombo {
    pub fn from_axes(x_log: bool, y_log: bool) -> Self {
        match (x_log, y_log) {
            (false, false) => ScaleCombo::LinLin,
            (true, false) => ScaleCombo::LogLin,
            (false, true) => ScaleCombo::LinLog,
            (true, true) => ScaleCombo::LogLog,
        }
    }
}

/// One-dimensional mapping between a constrained range and a pixel span.
///
/// Only valid for the range snapshot it was built from. `pix_start` is the
/// pixel that `range.min` lands on, so inverted and vertical axes simply swap
/// the endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisTransform {
    log: bool,
    plot_min: f64,
    plot_max: f64,
    pix_start: f64,
    pix_size: f64,
    // 1 / ((max - min) / 2), halved so the full f64 range has a finite span
    inv_half_span: f64,
    half_span: f64,
    // cached log endpoints when log is true
    log_min: f64,
    log_den: f64,
    inv_log_den: f64,
}

#[inline]
fn safe_recip(v: f64) -> f64 {
    if v != 0.0 && v.is_finite() { 1.0 / v } else { 0.0 }
}

impl AxisTransform {
    pub fn new(range: Range, pix_start: f32, pix_end: f32, log: bool) -> Self {
        let half_span = range.max * 0.5 - range.min * 0.5;
        let (log_min, log_den) = if log {
            let lmin = range.min.log10();
            (lmin, range.max.log10() - lmin)
        } else {
            (0.0, 0.0)
        };
        Self {
            log,
            plot_min: range.min,
            plot_max: range.max,
            pix_start: pix_start as f64,
            pix_size: (pix_end - pix_start) as f64,
            inv_half_span: safe_recip(half_span),
            half_span,
            log_min,
            log_den,
            inv_log_den: safe_recip(log_den),
        }
    }

    /// Left-to-right mapping (right-to-left when inverted).
    pub fn horizontal(axis: &Axis, rect: &PixelRect) -> Self {
        let (a, b) = if axis.flags.invert { (rect.max.x, rect.min.x) } else { (rect.min.x, rect.max.x) };
        Self::new(axis.range(), a, b, axis.kind == ScaleKind::Log10)
    }

    /// Bottom-to-top mapping (top-to-bottom when inverted).
    pub fn vertical(axis: &Axis, rect: &PixelRect) -> Self {
        let (a, b) = if axis.flags.invert { (rect.min.y, rect.max.y) } else { (rect.max.y, rect.min.y) };
        Self::new(axis.range(), a, b, axis.kind == ScaleKind::Log10)
    }

    pub fn is_log(&self) -> bool {
        self.log
    }

    pub fn range(&self) -> Range {
        Range::new(self.plot_min, self.plot_max)
    }

    #[inline]
    pub fn to_pixel(&self, v: f64) -> f32 {
        let t = if self.log {
            (v.max(f64::MIN_POSITIVE).log10() - self.log_min) * self.inv_log_den
        } else {
            (v * 0.5 - self.plot_min * 0.5) * self.inv_half_span
        };
        (self.pix_start + t * self.pix_size) as f32
    }

    #[inline]
    pub fn to_plot(&self, px: f32) -> f64 {
        if self.pix_size == 0.0 {
            return self.plot_min;
        }
        let t = (px as f64 - self.pix_start) / self.pix_size;
        if self.log {
            10f64.powf(self.log_min + t * self.log_den)
        } else {
            ((self.plot_min * 0.5 + t * self.half_span) * 2.0).clamp(f64::MIN, f64::MAX)
        }
    }
}

/// Transform for one X/Y pair. Several may coexist per frame (one per active
/// Y axis), all sharing the same X mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotTransform {
    pub x: AxisTransform,
    pub y: AxisTransform,
}

impl PlotTransform {
    pub fn new(x: AxisTransform, y: AxisTransform) -> Self {
        Self { x, y }
    }

    /// Build both mappings for `rect` from the axes' current ranges.
    pub fn from_axes(x_axis: &Axis, y_axis: &Axis, rect: &PixelRect) -> Self {
        Self::new(AxisTransform::horizontal(x_axis, rect), AxisTransform::vertical(y_axis, rect))
    }

    pub fn combo(&self) -> ScaleCombo {
        ScaleCombo::from_axes(self.x.is_log(), self.y.is_log())
    }
}

impl ScaleTransform for PlotTransform {
    #[inline]
    fn to_screen_x(&self, x: Logical) -> f32 {
        self.x.to_pixel(x)
    }
    #[inline]
    fn to_screen_y(&self, y: Value) -> f32 {
        self.y.to_pixel(y)
    }
    #[inline]
    fn from_screen_x(&self, px: f32) -> Logical {
        self.x.to_plot(px)
    }
    #[inline]
    fn from_screen_y(&self, py: f32) -> Value {
        self.y.to_plot(py)
    }
}
