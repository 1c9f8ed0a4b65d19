// File: crates/axis-core/src/axis.rs
// Summary: Persistent axis model: range with guarded mutators, scale kind, display flags, tick cache.

use crate::range::{constrain_inf, constrain_log, constrain_nan, constrain_time, Range};
use crate::ticks::TickCollection;
use crate::types::TIME_EPSILON;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScaleKind {
    #[default]
    Linear,
    Log10,
    /// Linear mapping over UTC epoch seconds, with calendar-aware ticks.
    Time,
}

/// Display and behaviour switches for one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisFlags {
    pub invert: bool,
    pub lock_min: bool,
    pub lock_max: bool,
    pub tick_labels: bool,
    pub grid: bool,
    /// Fit to the plotted data every frame.
    pub auto_fit: bool,
}

impl Default for AxisFlags {
    fn default() -> Self {
        Self { invert: false, lock_min: false, lock_max: false, tick_labels: true, grid: true, auto_fit: false }
    }
}

/// One axis of a plot. Lives as long as the plot so pan/zoom state survives
/// between frames; `dragging`/`hovered` and the tick cache are rebuilt per frame.
#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub kind: ScaleKind,
    pub flags: AxisFlags,
    pub dragging: bool,
    pub hovered: bool,
    pub ticks: TickCollection,
    range: Range,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        let mut a = Self {
            label: label.into(),
            kind: ScaleKind::Linear,
            flags: AxisFlags::default(),
            dragging: false,
            hovered: false,
            ticks: TickCollection::default(),
            range: Range::new(min, max),
        };
        a.constrain();
        a
    }

    pub fn with_kind(mut self, kind: ScaleKind) -> Self {
        self.kind = kind;
        self.constrain();
        self
    }

    pub fn with_flags(mut self, flags: AxisFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn default_x() -> Self {
        Self::new("X", 0.0, 1.0)
    }

    pub fn default_y() -> Self {
        Self::new("Y", 0.0, 1.0)
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    pub fn is_log(&self) -> bool {
        self.kind == ScaleKind::Log10
    }

    pub fn is_time(&self) -> bool {
        self.kind == ScaleKind::Time
    }

    /// Change the scale kind and repair the range for the new domain.
    pub fn set_kind(&mut self, kind: ScaleKind) {
        if self.kind != kind {
            self.kind = kind;
            self.constrain();
        }
    }

    /// Apply every sanitizer relevant to this axis' domain.
    pub fn sanitize(&self, v: f64) -> f64 {
        let mut v = constrain_nan(constrain_inf(v));
        match self.kind {
            ScaleKind::Log10 => v = constrain_log(v),
            ScaleKind::Time => v = constrain_time(v),
            ScaleKind::Linear => {}
        }
        v
    }

    fn min_span(&self) -> f64 {
        if self.is_time() { TIME_EPSILON } else { f64::EPSILON }
    }

    /// Set the lower bound. Returns `false` (range untouched) when the bound
    /// would not stay below `max`.
    pub fn set_min(&mut self, v: f64) -> bool {
        let v = self.sanitize(v);
        if self.is_time() && self.range.max - v < TIME_EPSILON {
            return false;
        }
        if v >= self.range.max {
            return false;
        }
        self.range.min = v;
        true
    }

    /// Set the upper bound. Returns `false` (range untouched) when the bound
    /// would not stay above `min`.
    pub fn set_max(&mut self, v: f64) -> bool {
        let v = self.sanitize(v);
        if self.is_time() && v - self.range.min < TIME_EPSILON {
            return false;
        }
        if v <= self.range.min {
            return false;
        }
        self.range.max = v;
        true
    }

    /// Set both bounds, ordering the two writes so a valid target range is
    /// never rejected because of the bound it replaces.
    pub fn set_range(&mut self, min: f64, max: f64) -> bool {
        let (min_s, max_s) = (self.sanitize(min), self.sanitize(max));
        if max_s <= min_s || (self.is_time() && max_s - min_s < TIME_EPSILON) {
            return false;
        }
        if min_s >= self.range.max {
            self.set_max(max) && self.set_min(min)
        } else {
            self.set_min(min) && self.set_max(max)
        }
    }

    /// Idempotent repair applied once per frame before transforms are built.
    pub fn constrain(&mut self) {
        let before = self.range;
        let mut min = self.sanitize(self.range.min);
        let mut max = self.sanitize(self.range.max);
        let too_narrow = max <= min || (self.is_time() && max - min < TIME_EPSILON);
        if too_narrow {
            let delta = self.min_span().max(min.abs() * f64::EPSILON * 2.0);
            let hi = min + delta;
            if hi.is_finite() && hi > min && self.sanitize(hi) == hi {
                max = hi;
            } else {
                max = min;
                min -= delta;
            }
        }
        self.range = Range::new(min, max);
        if before != self.range {
            log::debug!(
                "axis '{}' range repaired: [{}, {}] -> [{}, {}]",
                self.label, before.min, before.max, min, max
            );
        }
    }
}

impl Default for Axis {
    fn default() -> Self {
        Self::new("", 0.0, 1.0)
    }
}
