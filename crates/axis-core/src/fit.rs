// File: crates/axis-core/src/fit.rs
// Summary: Per-frame data extents and the auto-fit rules that turn them into axis ranges.

use crate::axis::{Axis, ScaleKind};
use crate::range::Range;
use crate::types::{AxisId, PlotPoint, YAxis, Y_AXES};

/// Fit tuning shared by every axis of a plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitConfig {
    /// Extra margin on each side, as a fraction of the fitted span (log axes: of the decade span).
    pub padding: f64,
    /// Relative half-width used when every reported value is identical.
    pub degenerate_pad: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self { padding: 0.0, degenerate_pad: 0.1 }
    }
}

/// Running min/max of the finite values reported this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extents {
    pub min: f64,
    pub max: f64,
}

impl Extents {
    pub const EMPTY: Extents = Extents { min: f64::INFINITY, max: f64::NEG_INFINITY };

    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    #[inline]
    pub fn extend(&mut self, v: f64) {
        if v.is_finite() {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
    }

    /// Like [`Extents::extend`] but drops values a log axis cannot show.
    #[inline]
    pub fn extend_for(&mut self, kind: ScaleKind, v: f64) {
        if kind == ScaleKind::Log10 && v <= 0.0 {
            return;
        }
        self.extend(v);
    }

    pub fn is_empty(&self) -> bool {
        !(self.min <= self.max)
    }

    pub fn as_range(&self) -> Option<Range> {
        if self.is_empty() { None } else { Some(Range::new(self.min, self.max)) }
    }
}

impl Default for Extents {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Extents for one X axis and up to three Y axes.
#[derive(Clone, Debug, Default)]
pub struct FitAccumulator {
    pub x: Extents,
    pub y: [Extents; Y_AXES],
    x_kind: ScaleKind,
    y_kind: [ScaleKind; Y_AXES],
}

impl FitAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scale kinds decide which values are admissible (non-positive values are
    /// skipped on log axes).
    pub fn with_kinds(x: ScaleKind, y: [ScaleKind; Y_AXES]) -> Self {
        Self { x_kind: x, y_kind: y, ..Self::default() }
    }

    pub fn set_kinds(&mut self, x: ScaleKind, y: [ScaleKind; Y_AXES]) {
        self.x_kind = x;
        self.y_kind = y;
    }

    pub fn reset(&mut self) {
        self.x.reset();
        for e in &mut self.y {
            e.reset();
        }
    }

    /// Report a point against the X axis and `Y1`.
    #[inline]
    pub fn extend(&mut self, p: PlotPoint) {
        self.extend_on(YAxis::Y1, p);
    }

    #[inline]
    pub fn extend_on(&mut self, y: YAxis, p: PlotPoint) {
        self.x.extend_for(self.x_kind, p.x);
        self.y[y.index()].extend_for(self.y_kind[y.index()], p.y);
    }

    #[inline]
    pub fn extend_axis(&mut self, id: AxisId, v: f64) {
        match id {
            AxisId::X => self.x.extend_for(self.x_kind, v),
            AxisId::Y(y) => self.y[y.index()].extend_for(self.y_kind[y.index()], v),
        }
    }

    pub fn extents(&self, id: AxisId) -> Extents {
        match id {
            AxisId::X => self.x,
            AxisId::Y(y) => self.y[y.index()],
        }
    }
}

/// Range covering `extents` on an axis of `kind`, or `None` when nothing finite was reported.
pub fn fit_range(extents: Extents, kind: ScaleKind, config: &FitConfig) -> Option<Range> {
    let r = extents.as_range()?;
    let (mut lo, mut hi) = (r.min, r.max);
    if lo == hi {
        match kind {
            ScaleKind::Log10 => {
                let f = 1.0 + config.degenerate_pad.abs().max(f64::EPSILON);
                lo /= f;
                hi *= f;
            }
            ScaleKind::Time => {
                lo -= 1.0;
                hi += 1.0;
            }
            ScaleKind::Linear => {
                let pad = if lo == 0.0 { config.degenerate_pad } else { config.degenerate_pad * lo.abs() };
                let pad = pad.abs().max(f64::EPSILON);
                lo -= pad;
                hi += pad;
            }
        }
    } else if config.padding > 0.0 {
        match kind {
            ScaleKind::Log10 => {
                let f = 10f64.powf((hi.log10() - lo.log10()) * config.padding);
                lo /= f;
                hi *= f;
            }
            ScaleKind::Linear | ScaleKind::Time => {
                let m = (hi - lo) * config.padding;
                lo -= m;
                hi += m;
            }
        }
    }
    Some(Range::new(lo, hi))
}

/// Fit `axis` to `extents`. Locked bounds keep their value. Returns `true`
/// when the range was updated.
pub fn apply_fit(axis: &mut Axis, extents: Extents, config: &FitConfig) -> bool {
    let Some(target) = fit_range(extents, axis.kind, config) else {
        log::warn!("fit skipped for axis '{}': no finite data reported", axis.label);
        return false;
    };
    let current = axis.range();
    let min = if axis.flags.lock_min { current.min } else { target.min };
    let max = if axis.flags.lock_max { current.max } else { target.max };
    let ok = axis.set_range(min, max);
    if ok {
        axis.constrain();
        log::debug!("axis '{}' fit to [{}, {}]", axis.label, axis.range().min, axis.range().max);
    } else {
        log::debug!("axis '{}' fit to [{}, {}] rejected", axis.label, min, max);
    }
    ok
}
