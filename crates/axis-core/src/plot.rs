// File: crates/axis-core/src/plot.rs
// Summary: Explicit plot context and the per-frame sequence: queued limits, input, constrain, ticks, layout, transforms, fit.
// Notes:
// - `PlotContext` is owned by the caller; there is no global current plot.
// - A `PlotFrame` borrows the context mutably, so only one plot can be open at a time.

use std::collections::HashMap;

use crate::axis::{Axis, AxisFlags, ScaleKind};
use crate::error::TickError;
use crate::fit::{self, Extents, FitAccumulator, FitConfig};
use crate::geometry::{PixelPoint, PixelRect};
use crate::range::Range;
use crate::scale::{AxisTransform, PlotTransform, ScaleTransform};
use crate::text::TextMeasure;
use crate::ticks::{self, TickCollection, TickConfig};
use crate::types::{AxisId, Condition, Insets, PlotPoint, YAxis, Y_AXES};
use crate::view::{self, InputState};

const SLOTS: usize = 1 + Y_AXES;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotConfig {
    pub ticks: TickConfig,
    pub fit: FitConfig,
    /// Fraction of the span removed per zoom-in step.
    pub zoom_rate: f32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self { ticks: TickConfig::default(), fit: FitConfig::default(), zoom_rate: 0.1 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlotFlags {
    pub y2: bool,
    pub y3: bool,
    /// Ignore host input entirely.
    pub no_inputs: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisOptions {
    pub label: String,
    pub kind: ScaleKind,
    pub flags: AxisFlags,
}

impl AxisOptions {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), ..Self::default() }
    }

    pub fn kind(mut self, kind: ScaleKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn flags(mut self, flags: AxisFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Everything `begin_plot` needs to know about the axes this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlotOptions {
    pub flags: PlotFlags,
    pub x: AxisOptions,
    pub y: [AxisOptions; Y_AXES],
}

/// Caller-supplied ticks for one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomTicks {
    pub values: Vec<f64>,
    pub labels: Option<Vec<String>>,
    pub keep_default: bool,
}

#[derive(Clone, Debug, Default)]
struct NextAxisData {
    limits: Option<(Range, Condition)>,
    fit: bool,
    ticks: Option<CustomTicks>,
}

#[derive(Clone, Debug, Default)]
struct NextPlotData {
    axes: [NextAxisData; SLOTS],
}

/// Persistent state of one plot, keyed by title in the [`PlotContext`].
#[derive(Clone, Debug)]
pub struct Plot {
    pub x: Axis,
    pub y: [Axis; Y_AXES],
    pub flags: PlotFlags,
    canvas: PixelRect,
    plot_rect: PixelRect,
    insets: Insets,
    panel_widths: [f32; Y_AXES],
    x_transform: AxisTransform,
    y_transforms: [AxisTransform; Y_AXES],
    fit: FitAccumulator,
    fit_armed: [bool; SLOTS],
    locked: [bool; SLOTS],
    custom: [Option<CustomTicks>; SLOTS],
    current_y: YAxis,
}

impl Plot {
    fn new() -> Self {
        let x = Axis::default_x();
        let y = [Axis::default_y(), Axis::default_y(), Axis::default_y()];
        let identity = AxisTransform::new(Range::default(), 0.0, 1.0, false);
        Self {
            x,
            y,
            flags: PlotFlags::default(),
            canvas: PixelRect::default(),
            plot_rect: PixelRect::default(),
            insets: Insets::default(),
            panel_widths: [0.0; Y_AXES],
            x_transform: identity,
            y_transforms: [identity; Y_AXES],
            fit: FitAccumulator::new(),
            fit_armed: [false; SLOTS],
            locked: [false; SLOTS],
            custom: Default::default(),
            current_y: YAxis::Y1,
        }
    }

    pub fn axis(&self, id: AxisId) -> &Axis {
        match id {
            AxisId::X => &self.x,
            AxisId::Y(y) => &self.y[y.index()],
        }
    }

    pub fn axis_mut(&mut self, id: AxisId) -> &mut Axis {
        match id {
            AxisId::X => &mut self.x,
            AxisId::Y(y) => &mut self.y[y.index()],
        }
    }

    pub fn is_active(&self, id: AxisId) -> bool {
        match id {
            AxisId::X | AxisId::Y(YAxis::Y1) => true,
            AxisId::Y(YAxis::Y2) => self.flags.y2,
            AxisId::Y(YAxis::Y3) => self.flags.y3,
        }
    }

    pub fn plot_rect(&self) -> PixelRect {
        self.plot_rect
    }

    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// Width of the label panel beside a Y axis; zero when it has no labels.
    pub fn panel_width(&self, y: YAxis) -> f32 {
        self.panel_widths[y.index()]
    }

    pub fn is_locked(&self, id: AxisId) -> bool {
        self.locked[id.slot()]
    }

    fn axis_transform(&self, id: AxisId) -> &AxisTransform {
        match id {
            AxisId::X => &self.x_transform,
            AxisId::Y(y) => &self.y_transforms[y.index()],
        }
    }

    fn apply_options(&mut self, opts: &PlotOptions) {
        self.flags = opts.flags;
        for id in AxisId::ALL {
            let o = match id {
                AxisId::X => &opts.x,
                AxisId::Y(y) => &opts.y[y.index()],
            };
            let axis = self.axis_mut(id);
            if axis.label != o.label {
                axis.label.clone_from(&o.label);
            }
            axis.flags = o.flags;
            axis.set_kind(o.kind);
        }
        if !self.is_active(AxisId::Y(self.current_y)) {
            self.current_y = YAxis::Y1;
        }
    }

    fn apply_next(&mut self, next: NextPlotData, first_frame: bool) {
        for (id, data) in AxisId::ALL.into_iter().zip(next.axes) {
            let axis = self.axis_mut(id);
            let mut locked = axis.flags.lock_min && axis.flags.lock_max;
            if let Some((r, cond)) = data.limits {
                if first_frame || cond == Condition::Always {
                    if !axis.set_range(r.min, r.max) {
                        log::warn!("axis '{}' rejected limits [{}, {}]", axis.label, r.min, r.max);
                    }
                }
                locked |= cond == Condition::Always;
            }
            let slot = id.slot();
            self.locked[slot] = locked;
            self.fit_armed[slot] = data.fit || self.axis(id).flags.auto_fit;
            self.custom[slot] = data.ticks;
        }
    }

    fn constrain_all(&mut self) {
        self.x.constrain();
        for y in &mut self.y {
            y.constrain();
        }
    }

    fn rebuild_transforms(&mut self) {
        self.x_transform = AxisTransform::horizontal(&self.x, &self.plot_rect);
        for (t, axis) in self.y_transforms.iter_mut().zip(&self.y) {
            *t = AxisTransform::vertical(axis, &self.plot_rect);
        }
    }

    fn update_hover(&mut self, mouse: Option<PixelPoint>) {
        for id in AxisId::ALL {
            let a = self.axis_mut(id);
            a.hovered = false;
            a.dragging = false;
        }
        let Some(m) = mouse else { return };
        let (c, p) = (self.canvas, self.plot_rect);
        let inside = p.contains(m);
        self.x.hovered = inside || PixelRect::from_ltrb(p.min.x, p.max.y, p.max.x, c.max.y).contains(m);
        self.y[0].hovered = inside || PixelRect::from_ltrb(c.min.x, p.min.y, p.min.x, p.max.y).contains(m);
        let mut left = p.max.x;
        for i in 1..Y_AXES {
            if !self.is_active(AxisId::Y(YAxis::ALL[i])) {
                continue;
            }
            let right = left + self.panel_widths[i];
            self.y[i].hovered = inside || PixelRect::from_ltrb(left, p.min.y, right, p.max.y).contains(m);
            left = right;
        }
    }

    fn handle_input(&mut self, input: &InputState, zoom_rate: f32) {
        if self.flags.no_inputs {
            self.update_hover(None);
            return;
        }
        self.update_hover(input.mouse);
        for id in AxisId::ALL {
            if !self.is_active(id) || self.locked[id.slot()] || !self.axis(id).hovered {
                continue;
            }
            let tr = *self.axis_transform(id);
            let horizontal = id.is_horizontal();
            if let Some(d) = input.drag_delta {
                let delta = if horizontal { d.x } else { d.y };
                let axis = self.axis_mut(id);
                axis.dragging = true;
                view::pan_axis(axis, &tr, delta);
            }
            if let Some(m) = input.mouse {
                if input.scroll != 0.0 {
                    let cursor = if horizontal { m.x } else { m.y };
                    view::zoom_axis(self.axis_mut(id), &tr, cursor, input.scroll, zoom_rate);
                }
            }
        }
        if input.double_clicked && input.mouse.is_some_and(|m| self.plot_rect.contains(m)) {
            for id in AxisId::ALL {
                if self.is_active(id) {
                    self.fit_armed[id.slot()] = true;
                }
            }
        }
    }

    fn generate_ticks(&mut self, config: &TickConfig, measure: &dyn TextMeasure) {
        let (w, h) = (self.plot_rect.width(), self.plot_rect.height());
        for id in AxisId::ALL {
            let active = self.is_active(id);
            let custom = self.custom[id.slot()].take();
            let axis = self.axis_mut(id);
            axis.ticks.reset();
            if active {
                fill_axis_ticks(axis, id, custom.as_ref(), if id.is_horizontal() { w } else { h }, config, measure);
            }
            self.custom[id.slot()] = custom;
        }
    }

    fn layout(&mut self, padding: f32) {
        let panel = |ticks: &TickCollection, extent: f32| if ticks.is_empty() || extent <= 0.0 { 0.0 } else { extent + padding };
        let bottom = panel(&self.x.ticks, self.x.ticks.max_height);
        let left = panel(&self.y[0].ticks, self.y[0].ticks.max_width);
        self.panel_widths[0] = left;
        let mut right = 0.0;
        for i in 1..Y_AXES {
            self.panel_widths[i] = panel(&self.y[i].ticks, self.y[i].ticks.max_width);
            right += self.panel_widths[i];
        }
        self.insets = Insets::new(left, right, 0.0, bottom);
        self.plot_rect = self.canvas.inset(&self.insets);
    }

    fn place_ticks(&mut self, padding: f32) {
        self.x.ticks.update_pixels(&self.x_transform);
        self.x.ticks.resolve_overlaps(true, padding);
        for (axis, tr) in self.y.iter_mut().zip(&self.y_transforms) {
            axis.ticks.update_pixels(tr);
            axis.ticks.resolve_overlaps(false, padding);
        }
    }

    /// Ticks, layout and transforms from the current ranges.
    fn refresh(&mut self, config: &TickConfig, measure: &dyn TextMeasure) {
        self.generate_ticks(config, measure);
        self.layout(config.label_padding_px);
        self.rebuild_transforms();
        self.place_ticks(config.label_padding_px);
    }

    /// Apply armed fits to unlocked axes. Returns true if any range changed.
    fn apply_fits(&mut self, config: &FitConfig) -> bool {
        let mut changed = false;
        for id in AxisId::ALL {
            let slot = id.slot();
            if !self.fit_armed[slot] {
                continue;
            }
            self.fit_armed[slot] = false;
            if !self.is_active(id) || self.locked[slot] {
                continue;
            }
            let extents = self.fit.extents(id);
            changed |= fit::apply_fit(self.axis_mut(id), extents, config);
        }
        changed
    }
}

fn fill_axis_ticks(
    axis: &mut Axis,
    id: AxisId,
    custom: Option<&CustomTicks>,
    pixel_len: f32,
    config: &TickConfig,
    measure: &dyn TextMeasure,
) {
    let keep_default = custom.map_or(true, |c| c.keep_default);
    if keep_default {
        let n_major = config.major_count(pixel_len, id.is_horizontal());
        ticks::generate_ticks(axis.kind, axis.range(), n_major, config, &mut axis.ticks, measure);
    }
    if let Some(c) = custom {
        if let Err(e) = ticks::add_ticks_custom(axis.range(), &c.values, c.labels.as_deref(), &mut axis.ticks, measure) {
            log::warn!("custom ticks for axis '{}' dropped: {e}", axis.label);
        }
    }
    if !axis.flags.tick_labels {
        axis.ticks.hide_labels();
    }
}

/// Owner of all plot state. Pass it explicitly to every frame.
#[derive(Default)]
pub struct PlotContext {
    plots: HashMap<String, Plot>,
    next: NextPlotData,
    pub config: PlotConfig,
}

impl PlotContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PlotConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn plot(&self, title: &str) -> Option<&Plot> {
        self.plots.get(title)
    }

    pub fn plot_mut(&mut self, title: &str) -> Option<&mut Plot> {
        self.plots.get_mut(title)
    }

    pub fn set_next_plot_limits(&mut self, x_min: f64, x_max: f64, y_min: f64, y_max: f64, cond: Condition) {
        self.set_next_plot_limits_x(x_min, x_max, cond);
        self.set_next_plot_limits_y(y_min, y_max, cond, YAxis::Y1);
    }

    pub fn set_next_plot_limits_x(&mut self, min: f64, max: f64, cond: Condition) {
        self.next.axes[AxisId::X.slot()].limits = Some((Range::new(min, max), cond));
    }

    pub fn set_next_plot_limits_y(&mut self, min: f64, max: f64, cond: Condition, y: YAxis) {
        self.next.axes[AxisId::Y(y).slot()].limits = Some((Range::new(min, max), cond));
    }

    /// One-shot fit requests for the next plot.
    pub fn fit_next_plot_axes(&mut self, x: bool, y1: bool, y2: bool, y3: bool) {
        for (id, on) in AxisId::ALL.into_iter().zip([x, y1, y2, y3]) {
            self.next.axes[id.slot()].fit |= on;
        }
    }

    pub fn set_next_plot_ticks_x<S: AsRef<str>>(
        &mut self,
        values: &[f64],
        labels: Option<&[S]>,
        keep_default: bool,
    ) -> Result<(), TickError> {
        self.queue_ticks(AxisId::X, values, labels, keep_default)
    }

    pub fn set_next_plot_ticks_y<S: AsRef<str>>(
        &mut self,
        values: &[f64],
        labels: Option<&[S]>,
        keep_default: bool,
        y: YAxis,
    ) -> Result<(), TickError> {
        self.queue_ticks(AxisId::Y(y), values, labels, keep_default)
    }

    fn queue_ticks<S: AsRef<str>>(
        &mut self,
        id: AxisId,
        values: &[f64],
        labels: Option<&[S]>,
        keep_default: bool,
    ) -> Result<(), TickError> {
        if let Some(l) = labels {
            if l.len() != values.len() {
                log::warn!("custom ticks for {id:?} rejected: {} labels for {} values", l.len(), values.len());
                return Err(TickError::LabelCountMismatch { values: values.len(), labels: l.len() });
            }
        }
        self.next.axes[id.slot()].ticks = Some(CustomTicks {
            values: values.to_vec(),
            labels: labels.map(|l| l.iter().map(|s| s.as_ref().to_owned()).collect()),
            keep_default,
        });
        Ok(())
    }

    /// Start a frame of the plot titled `title` drawn into `canvas`.
    pub fn begin_plot<'a>(
        &'a mut self,
        title: &str,
        canvas: PixelRect,
        opts: &PlotOptions,
        input: &InputState,
        measure: &'a dyn TextMeasure,
    ) -> PlotFrame<'a> {
        let next = std::mem::take(&mut self.next);
        let config = &self.config;
        let first_frame = !self.plots.contains_key(title);
        let plot = self.plots.entry(title.to_owned()).or_insert_with(Plot::new);

        plot.apply_options(opts);
        plot.apply_next(next, first_frame);
        plot.fit.set_kinds(plot.x.kind, [plot.y[0].kind, plot.y[1].kind, plot.y[2].kind]);
        plot.fit.reset();

        // Input is interpreted against what was on screen last frame.
        plot.canvas = canvas;
        plot.plot_rect = canvas.inset(&plot.insets);
        plot.constrain_all();
        plot.rebuild_transforms();
        plot.handle_input(input, config.zoom_rate);
        plot.constrain_all();
        plot.refresh(&config.ticks, measure);

        PlotFrame { plot, config, measure, finished: false }
    }
}

/// One open plot for the duration of a frame.
pub struct PlotFrame<'a> {
    plot: &'a mut Plot,
    config: &'a PlotConfig,
    measure: &'a dyn TextMeasure,
    finished: bool,
}

impl<'a> PlotFrame<'a> {
    pub fn plot(&self) -> &Plot {
        self.plot
    }

    pub fn axis(&self, id: AxisId) -> &Axis {
        self.plot.axis(id)
    }

    pub fn ticks(&self, id: AxisId) -> &TickCollection {
        &self.plot.axis(id).ticks
    }

    pub fn plot_rect(&self) -> PixelRect {
        self.plot.plot_rect
    }

    pub fn insets(&self) -> Insets {
        self.plot.insets
    }

    /// Route subsequent reports and conversions through `y`. Inactive axes are ignored.
    pub fn set_current_y_axis(&mut self, y: YAxis) -> bool {
        if !self.plot.is_active(AxisId::Y(y)) {
            log::warn!("Y axis {y:?} is not enabled for this plot");
            return false;
        }
        self.plot.current_y = y;
        true
    }

    pub fn current_y_axis(&self) -> YAxis {
        self.plot.current_y
    }

    pub fn is_fit_requested(&self, id: AxisId) -> bool {
        self.plot.fit_armed[id.slot()]
    }

    pub fn is_any_fit_requested(&self) -> bool {
        self.plot.fit_armed.iter().any(|&f| f)
    }

    /// Widen the fit extents of X and the current Y axis.
    #[inline]
    pub fn report_point(&mut self, p: PlotPoint) {
        let y = self.plot.current_y;
        self.plot.fit.extend_on(y, p);
    }

    #[inline]
    pub fn report_value(&mut self, id: AxisId, v: f64) {
        self.plot.fit.extend_axis(id, v);
    }

    pub fn extents(&self, id: AxisId) -> Extents {
        self.plot.fit.extents(id)
    }

    pub fn transform(&self, y: YAxis) -> PlotTransform {
        PlotTransform::new(self.plot.x_transform, self.plot.y_transforms[y.index()])
    }

    pub fn current_transform(&self) -> PlotTransform {
        self.transform(self.plot.current_y)
    }

    pub fn plot_to_pixels(&self, p: PlotPoint) -> PixelPoint {
        self.current_transform().to_screen(p)
    }

    pub fn pixels_to_plot(&self, p: PixelPoint) -> PlotPoint {
        self.current_transform().from_screen(p)
    }

    /// Fit armed axes now and rebuild ticks and transforms, so items drawn
    /// afterwards see the fitted ranges.
    pub fn apply_fit(&mut self) -> bool {
        let changed = self.plot.apply_fits(&self.config.fit);
        if changed {
            self.plot.refresh(&self.config.ticks, self.measure);
        }
        changed
    }

    /// Close the frame. Fits still armed apply to the ranges used next frame.
    pub fn end(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        if self.plot.apply_fits(&self.config.fit) {
            self.plot.constrain_all();
        }
    }
}

impl Drop for PlotFrame<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}
