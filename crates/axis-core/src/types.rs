// File: crates/axis-core/src/types.rs
// Summary: Shared types and constants (domain limits, point types, axis ids, insets).

/// Number of Y axes a plot can carry.
pub const Y_AXES: usize = 3;

/// Smallest value a logarithmic axis bound may take.
pub const LOG_FLOOR: f64 = 0.001;

/// Earliest supported timestamp (1970-01-01 UTC).
pub const MIN_TIME: f64 = 0.0;
/// Latest supported timestamp (3000-01-01 UTC).
pub const MAX_TIME: f64 = 32_503_680_000.0;
/// Minimum span of a time axis, in seconds.
pub const TIME_EPSILON: f64 = 0.0001;

/// A point in plot (data) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for PlotPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Y axis selector. `Y1` is always present; `Y2`/`Y3` are opt-in per plot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum YAxis {
    #[default]
    Y1,
    Y2,
    Y3,
}

impl YAxis {
    pub const ALL: [YAxis; Y_AXES] = [YAxis::Y1, YAxis::Y2, YAxis::Y3];

    pub const fn index(self) -> usize {
        match self {
            YAxis::Y1 => 0,
            YAxis::Y2 => 1,
            YAxis::Y3 => 2,
        }
    }
}

/// Any axis of a plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisId {
    X,
    Y(YAxis),
}

impl AxisId {
    pub const ALL: [AxisId; 1 + Y_AXES] =
        [AxisId::X, AxisId::Y(YAxis::Y1), AxisId::Y(YAxis::Y2), AxisId::Y(YAxis::Y3)];

    /// Dense index: X is 0, Y axes follow.
    pub const fn slot(self) -> usize {
        match self {
            AxisId::X => 0,
            AxisId::Y(y) => 1 + y.index(),
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, AxisId::X)
    }
}

/// When queued next-plot limits are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Condition {
    /// Only the first frame a plot is seen.
    #[default]
    Once,
    /// Every frame; also locks the axis against interaction.
    Always,
}

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    /// Create new insets; negative inputs are clamped to zero.
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left: left.max(0.0), right: right.max(0.0), top: top.max(0.0), bottom: bottom.max(0.0) }
    }
    /// Total horizontal inset (left + right).
    pub fn hsum(&self) -> f32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f32 { self.top + self.bottom }
}
