// File: crates/axis-core/src/lib.rs
// Summary: Core library entry point; exports the axis scaling, tick generation, calendar and fit API.

pub mod types;
pub mod geometry;
pub mod range;
pub mod axis;
pub mod scale;
pub mod text;
pub mod time;
pub mod ticks;
pub mod fit;
pub mod view;
pub mod plot;
pub mod error;

pub use types::{AxisId, Condition, Insets, PlotPoint, YAxis, Y_AXES};
pub use geometry::{PixelPoint, PixelRect};
pub use range::Range;
pub use axis::{Axis, AxisFlags, ScaleKind};
pub use scale::{AxisTransform, PlotTransform, ScaleCombo, ScaleTransform};
pub use text::{FixedAdvance, TextMeasure};
pub use time::{CivilTime, TimeFmt, TimeUnit};
pub use ticks::{Tick, TickCollection, TickConfig};
pub use fit::{Extents, FitAccumulator, FitConfig};
pub use view::InputState;
pub use plot::{AxisOptions, CustomTicks, Plot, PlotConfig, PlotContext, PlotFlags, PlotFrame, PlotOptions};
pub use error::TickError;
