// File: crates/axis-core/src/ticks.rs
// Summary: Tick collections and the linear, logarithmic, time and custom tick generators.
// Notes:
// - Generators append to a collection; the owner resets it once per frame.
// - Label text lives in one append-only arena per collection, so refilling a
//   collection every frame reuses its allocations.

use std::fmt::{self, Write as _};

use crate::axis::ScaleKind;
use crate::error::TickError;
use crate::range::Range;
use crate::scale::AxisTransform;
use crate::text::TextMeasure;
use crate::time::{add_time, floor_time, format_time, to_epoch_seconds, unit_for_range, year_of, CivilTime, TimeFmt, TimeUnit};

/// Tick generation knobs shared by every axis of a plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickConfig {
    /// Target pixel distance between major ticks on horizontal axes.
    pub x_spacing_px: f32,
    /// Target pixel distance between major ticks on vertical axes.
    pub y_spacing_px: f32,
    /// Minor ticks inserted between consecutive linear majors.
    pub minor_per_major: usize,
    /// Hard cap on ticks generated per axis per frame.
    pub max_ticks: usize,
    /// Minimum gap between two visible labels.
    pub label_padding_px: f32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self { x_spacing_px: 100.0, y_spacing_px: 60.0, minor_per_major: 4, max_ticks: 500, label_padding_px: 5.0 }
    }
}

impl TickConfig {
    /// Number of majors to aim for along `pixel_len` pixels (at least 2).
    pub fn major_count(&self, pixel_len: f32, horizontal: bool) -> usize {
        let spacing = if horizontal { self.x_spacing_px } else { self.y_spacing_px };
        if !(spacing > 0.0) || !pixel_len.is_finite() {
            return 2;
        }
        ((pixel_len.abs() / spacing).round() as usize).max(2)
    }
}

/// Handle to a label stored in a [`LabelArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelId {
    start: u32,
    end: u32,
}

/// Append-only string storage addressed by [`LabelId`].
#[derive(Clone, Debug, Default)]
pub struct LabelArena {
    buf: String,
}

impl LabelArena {
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Append whatever `write` produces and return its handle.
    pub fn push_with<F>(&mut self, write: F) -> Result<LabelId, fmt::Error>
    where
        F: FnOnce(&mut String) -> fmt::Result,
    {
        let start = self.buf.len();
        if let Err(e) = write(&mut self.buf) {
            self.buf.truncate(start);
            return Err(e);
        }
        Ok(LabelId { start: start as u32, end: self.buf.len() as u32 })
    }

    pub fn push_str(&mut self, s: &str) -> LabelId {
        let start = self.buf.len();
        self.buf.push_str(s);
        LabelId { start: start as u32, end: self.buf.len() as u32 }
    }

    pub fn get(&self, id: LabelId) -> &str {
        &self.buf[id.start as usize..id.end as usize]
    }

    /// Bytes currently stored.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// One tick mark. `level` is 0 for ticks at the primary granularity and 1 for
/// coarser rollover ticks on time axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub pixel: f32,
    pub label: Option<LabelId>,
    pub label_size: (f32, f32),
    pub major: bool,
    pub show_label: bool,
    pub level: u8,
}

impl Tick {
    pub fn new(position: f64, major: bool, show_label: bool) -> Self {
        Self { position, pixel: 0.0, label: None, label_size: (0.0, 0.0), major, show_label, level: 0 }
    }
}

/// Ticks for one axis plus aggregate label metrics used to size axis panels.
#[derive(Clone, Debug, Default)]
pub struct TickCollection {
    ticks: Vec<Tick>,
    labels: LabelArena,
    spans: Vec<(f32, f32)>,
    pub total_width: f32,
    pub total_height: f32,
    pub max_width: f32,
    pub max_height: f32,
}

impl TickCollection {
    pub fn reset(&mut self) {
        self.ticks.clear();
        self.labels.clear();
        self.total_width = 0.0;
        self.total_height = 0.0;
        self.max_width = 0.0;
        self.max_height = 0.0;
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter()
    }

    /// Label text of a tick from this collection, if it has one.
    pub fn label(&self, tick: &Tick) -> Option<&str> {
        tick.label.map(|id| self.labels.get(id))
    }

    pub fn label_at(&self, idx: usize) -> Option<&str> {
        self.ticks.get(idx).and_then(|t| self.label(t))
    }

    /// Labels that survived overlap resolution, in tick order.
    pub fn visible_labels(&self) -> impl Iterator<Item = (&Tick, &str)> {
        self.ticks.iter().filter(|t| t.show_label).filter_map(move |t| self.label(t).map(|s| (t, s)))
    }

    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.ticks.iter().map(|t| t.position)
    }

    pub fn push(&mut self, tick: Tick) {
        if tick.show_label {
            self.accumulate(tick.label_size);
        }
        self.ticks.push(tick);
    }

    fn accumulate(&mut self, (w, h): (f32, f32)) {
        self.total_width += w;
        self.total_height += h;
        self.max_width = self.max_width.max(w);
        self.max_height = self.max_height.max(h);
    }

    /// Add a tick whose label (when shown) is produced by `write`.
    pub fn add_with<F>(&mut self, position: f64, major: bool, show_label: bool, level: u8, measure: &dyn TextMeasure, write: F)
    where
        F: FnOnce(&mut String) -> fmt::Result,
    {
        let mut tick = Tick::new(position, major, show_label);
        tick.level = level;
        if show_label {
            match self.labels.push_with(write) {
                Ok(id) => {
                    tick.label = Some(id);
                    tick.label_size = measure.measure_text(self.labels.get(id));
                }
                Err(_) => tick.show_label = false,
            }
        }
        self.push(tick);
    }

    /// Add a tick with a fixed label.
    pub fn add_labeled(&mut self, position: f64, major: bool, label: &str, measure: &dyn TextMeasure) {
        let mut tick = Tick::new(position, major, true);
        let id = self.labels.push_str(label);
        tick.label = Some(id);
        tick.label_size = measure.measure_text(label);
        self.push(tick);
    }

    /// Add a tick that never shows a label.
    pub fn add_unlabeled(&mut self, position: f64, major: bool) {
        self.push(Tick::new(position, major, false));
    }

    /// Keep the ticks but show none of their labels.
    pub fn hide_labels(&mut self) {
        for t in &mut self.ticks {
            t.show_label = false;
        }
        self.recompute_totals();
    }

    /// Fill in pixel coordinates for the current transform.
    pub fn update_pixels(&mut self, transform: &AxisTransform) {
        for t in &mut self.ticks {
            t.pixel = transform.to_pixel(t.position);
        }
    }

    /// Hide labels that would overlap an already placed one. Higher levels are
    /// placed first so rollover labels survive crowding.
    pub fn resolve_overlaps(&mut self, horizontal: bool, padding: f32) {
        self.spans.clear();
        let top_level = self.ticks.iter().map(|t| t.level).max().unwrap_or(0);
        for level in (0..=top_level).rev() {
            for tick in self.ticks.iter_mut().filter(|t| t.level == level && t.show_label) {
                let extent = if horizontal { tick.label_size.0 } else { tick.label_size.1 };
                let lo = tick.pixel - extent * 0.5 - padding * 0.5;
                let hi = tick.pixel + extent * 0.5 + padding * 0.5;
                if self.spans.iter().any(|&(a, b)| lo < b && a < hi) {
                    tick.show_label = false;
                } else {
                    self.spans.push((lo, hi));
                }
            }
        }
        self.recompute_totals();
    }

    fn recompute_totals(&mut self) {
        let (mut tw, mut th, mut mw, mut mh) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
        for &(w, h) in self.ticks.iter().filter(|t| t.show_label).map(|t| &t.label_size) {
            tw += w;
            th += h;
            mw = mw.max(w);
            mh = mh.max(h);
        }
        self.total_width = tw;
        self.total_height = th;
        self.max_width = mw;
        self.max_height = mh;
    }
}

// ---- numeric helpers ---------------------------------------------------------

/// Round `x` to 1, 2, 5 or 10 times a power of ten (Graphics Gems 1, 11.2).
/// `round` picks the nearest candidate; otherwise the smallest one `>= x`.
pub fn nice_num(x: f64, round: bool) -> f64 {
    let expv = x.log10().floor();
    let f = x / 10f64.powf(expv);
    let nf = if round {
        if f < 1.5 {
            1.0
        } else if f < 3.0 {
            2.0
        } else if f < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if f <= 1.0 {
        1.0
    } else if f <= 2.0 {
        2.0
    } else if f <= 5.0 {
        5.0
    } else {
        10.0
    };
    nf * 10f64.powf(expv)
}

pub fn order_of_magnitude(v: f64) -> i32 {
    if v == 0.0 { 0 } else { v.abs().log10().floor() as i32 }
}

/// Decimal places needed to print multiples of `step` exactly.
pub fn precision_for_step(step: f64) -> usize {
    let order = order_of_magnitude(step);
    if order >= 0 { 0 } else { (-order) as usize }
}

/// Distance from `v` to the next representable value away from zero.
fn ulp(v: f64) -> f64 {
    let m = v.abs();
    if !m.is_finite() {
        return f64::INFINITY;
    }
    f64::from_bits(m.to_bits() + 1) - m
}

/// Exact powers of ten for the integer exponents log axes use.
fn pow10(e: i32) -> f64 {
    if e >= 0 { 10f64.powi(e) } else { 1.0 / 10f64.powi(-e) }
}

// ---- generators --------------------------------------------------------------

/// Dispatch to the generator for `kind`. Guarantees at least one tick.
pub fn generate_ticks(
    kind: ScaleKind,
    range: Range,
    n_major: usize,
    config: &TickConfig,
    ticks: &mut TickCollection,
    measure: &dyn TextMeasure,
) {
    let before = ticks.len();
    match kind {
        ScaleKind::Linear => add_ticks_linear(range, n_major, config.minor_per_major, config.max_ticks, ticks, measure),
        ScaleKind::Log10 => add_ticks_log(range, n_major, config.max_ticks, ticks, measure),
        ScaleKind::Time => add_ticks_time(range, n_major, config.max_ticks, ticks, measure),
    }
    if ticks.len() == before {
        add_midpoint_tick(kind, range, ticks, measure);
    }
    log::trace!("{:?} axis [{}, {}]: {} ticks", kind, range.min, range.max, ticks.len() - before);
}

fn add_midpoint_tick(kind: ScaleKind, range: Range, ticks: &mut TickCollection, measure: &dyn TextMeasure) {
    let mid = range.midpoint();
    match kind {
        ScaleKind::Time => {
            let fmt = unit_for_range(range.size()).primary_fmt();
            ticks.add_with(mid, true, true, 0, measure, |s| format_time(mid, fmt, s));
        }
        ScaleKind::Log10 => ticks.add_with(mid, true, true, 0, measure, |s| write!(s, "{:.3e}", mid)),
        ScaleKind::Linear => ticks.add_with(mid, true, true, 0, measure, |s| write!(s, "{}", mid)),
    }
}

/// Majors at multiples of a 1/2/5 x 10^k step, `n_minor` evenly spaced minors between them.
pub fn add_ticks_linear(
    range: Range,
    n_major: usize,
    n_minor: usize,
    max_ticks: usize,
    ticks: &mut TickCollection,
    measure: &dyn TextMeasure,
) {
    let n_major = n_major.max(2);
    let nice_range = nice_num(range.size() * 0.99, false);
    let interval = nice_num(nice_range / (n_major - 1) as f64, true);
    // Steps closer than two ulps at the bounds collapse after rounding.
    let resolution = 2.0 * ulp(range.min).max(ulp(range.max));
    if !(interval > 0.0) || !interval.is_finite() || interval < resolution {
        return;
    }

    let graph_min = (range.min / interval).floor() * interval;
    let graph_max = (range.max / interval).ceil() * interval;
    let steps = ((graph_max - graph_min) / interval + 0.5).floor() as usize;
    let mut n_minor = n_minor;
    if interval / ((n_minor + 1) as f64) < resolution {
        n_minor = 0;
    }
    if (steps + 1).saturating_mul(n_minor + 1) > max_ticks {
        log::warn!("linear ticks over cap ({} majors x {} minors); dropping minors", steps + 1, n_minor);
        n_minor = 0;
    }

    let tol = interval * 1e-6;
    let precision = precision_for_step(interval);
    let minor_step = interval / (n_minor + 1) as f64;
    let start = ticks.len();
    let mut last = f64::NEG_INFINITY;

    for k in 0..=steps {
        if ticks.len() - start >= max_ticks {
            log::warn!("linear ticks truncated at {} for range [{}, {}]", max_ticks, range.min, range.max);
            break;
        }
        let mut major = graph_min + k as f64 * interval;
        if major.abs() < tol {
            major = 0.0;
        }
        if major >= range.min - tol && major <= range.max + tol {
            let value = major.clamp(range.min, range.max);
            if value > last {
                ticks.add_with(value, true, true, 0, measure, |s| write!(s, "{:.*}", precision, major + 0.0));
                last = value;
            }
        }
        for i in 1..=n_minor {
            let minor = major + i as f64 * minor_step;
            if range.contains(minor) && minor > last {
                ticks.add_unlabeled(minor, false);
                last = minor;
            }
        }
    }
}

/// Majors at powers of ten, minors at 2..9 x 10^k. Wide ranges thin the
/// decades to a stride that is a multiple of three.
pub fn add_ticks_log(range: Range, n_major: usize, max_ticks: usize, ticks: &mut TickCollection, measure: &dyn TextMeasure) {
    if range.min <= 0.0 || range.max <= 0.0 {
        return;
    }
    let log_min = range.min.log10();
    let log_max = range.max.log10();
    let e_lo = log_min.floor() as i32;
    let e_hi = log_max.ceil() as i32;

    let mut exp_step = (((log_max - log_min) as i32) / n_major.max(1) as i32).max(1);
    if exp_step != 1 {
        while exp_step % 3 != 0 {
            exp_step += 1;
        }
    }
    let in_range = |v: f64| v >= range.min * (1.0 - 1e-12) && v <= range.max * (1.0 + 1e-12);
    let start = ticks.len();

    for e in e_lo..=e_hi {
        if ticks.len() - start >= max_ticks {
            log::warn!("log ticks truncated at {} for range [{}, {}]", max_ticks, range.min, range.max);
            break;
        }
        let decade = pow10(e);
        if in_range(decade) {
            if e.rem_euclid(exp_step) == 0 {
                ticks.add_with(decade, true, true, 0, measure, |s| write!(s, "{:.0e}", decade));
            } else {
                ticks.add_unlabeled(decade, false);
            }
        }
        if exp_step == 1 {
            for k in 2..=9 {
                let minor = k as f64 * decade;
                if in_range(minor) {
                    ticks.add_unlabeled(minor, false);
                }
            }
        }
    }
}

const SUB_SECOND_STEPS: [i32; 11] = [1, 2, 5, 10, 20, 25, 50, 100, 200, 250, 500];
const SEXAGESIMAL_STEPS: [i32; 6] = [1, 2, 5, 10, 15, 30];
const HOUR_STEPS: [i32; 5] = [1, 2, 3, 6, 12];
const DAY_STEPS: [i32; 4] = [1, 2, 7, 14];
const MONTH_STEPS: [i32; 4] = [1, 2, 3, 6];

/// Units advanced per level-0 tick so about `n_major` ticks cover `span` seconds.
pub fn time_step(unit: TimeUnit, span: f64, n_major: usize) -> i32 {
    let n_major = n_major.max(1) as f64;
    let units = span / unit.span();
    let table: &[i32] = match unit {
        TimeUnit::Us | TimeUnit::Ms => &SUB_SECOND_STEPS,
        TimeUnit::S | TimeUnit::Min => &SEXAGESIMAL_STEPS,
        TimeUnit::Hr => &HOUR_STEPS,
        TimeUnit::Day => &DAY_STEPS,
        TimeUnit::Mo => &MONTH_STEPS,
        TimeUnit::Yr => {
            let years = nice_num((units / n_major).max(1.0), true);
            return years.min(i32::MAX as f64) as i32;
        }
    };
    table
        .iter()
        .copied()
        .find(|&s| units / s as f64 <= n_major)
        .unwrap_or(table[table.len() - 1])
}

/// Calendar-aware time ticks with the unit picked from the visible span.
/// Never fails; a rejected configuration falls back to the midpoint tick.
pub fn add_ticks_time(range: Range, n_major: usize, max_ticks: usize, ticks: &mut TickCollection, measure: &dyn TextMeasure) {
    let unit = unit_for_range(range.size());
    let step = time_step(unit, range.size(), n_major);
    if let Err(e) = try_add_ticks_time_with(range, unit, step, max_ticks, ticks, measure) {
        log::warn!("time ticks skipped: {e}");
    }
}

/// Time ticks at an explicit unit and step. Level-0 ticks restart at every
/// boundary of the next coarser unit, which carries a level-1 label.
/// Returns the number of ticks added.
pub fn try_add_ticks_time_with(
    range: Range,
    unit: TimeUnit,
    step: i32,
    max_ticks: usize,
    ticks: &mut TickCollection,
    measure: &dyn TextMeasure,
) -> Result<usize, TickError> {
    if step <= 0 {
        return Err(TickError::InvalidStep(step));
    }
    let rollovers = unit.coarser().map(|c| range.size() / c.span()).unwrap_or(0.0);
    let estimate = range.size() / (unit.span() * step as f64) + rollovers + 2.0;
    if !estimate.is_finite() || estimate > max_ticks as f64 {
        return Err(TickError::TooManyTicks {
            unit,
            step,
            estimated: if estimate.is_finite() { estimate as usize } else { usize::MAX },
            cap: max_ticks,
        });
    }

    let start = ticks.len();
    let fmt0 = unit.primary_fmt();

    let Some(parent) = unit.coarser() else {
        // Unclamped so stride multiples stay aligned below the epoch.
        let first_year = year_of(range.min).div_euclid(step) * step;
        let origin = to_epoch_seconds(&CivilTime::date(first_year, 1, 1)) as f64;
        for k in 0.. {
            let t = add_time(origin, TimeUnit::Yr, k * step);
            if t > range.max || ticks.len() - start >= max_ticks {
                break;
            }
            if k > 0 && t <= add_time(origin, TimeUnit::Yr, (k - 1) * step) {
                log::warn!("year ticks stopped advancing at {t}");
                break;
            }
            if range.contains(t) {
                ticks.add_with(t, true, true, 0, measure, |s| format_time(t, fmt0, s));
            }
        }
        return Ok(ticks.len() - start);
    };

    let mut t1 = floor_time(range.min, parent);
    while t1 <= range.max && ticks.len() - start < max_ticks {
        let t2 = add_time(t1, parent, 1);
        if t2 <= t1 {
            log::warn!("{parent:?} rollover stopped advancing at {t1}");
            break;
        }
        if range.contains(t1) {
            ticks.add_with(t1, true, true, 1, measure, |s| write_rollover_label(t1, unit, s));
        }
        let limit = t2 - unit.span() * 0.5;
        let mut prev = t1;
        for k in 1.. {
            let t = add_time(t1, unit, k * step);
            if t >= limit || t > range.max || ticks.len() - start >= max_ticks {
                break;
            }
            if t <= prev {
                log::warn!("{unit:?} ticks stopped advancing at {t}");
                return Ok(ticks.len() - start);
            }
            if range.contains(t) {
                if ticks.len() == start {
                    // No rollover in view yet: the first tick carries the date.
                    ticks.add_with(t, true, true, 1, measure, |s| write_context_label(t, unit, s));
                } else {
                    ticks.add_with(t, true, true, 0, measure, |s| format_time(t, fmt0, s));
                }
            }
            prev = t;
        }
        t1 = t2;
    }
    Ok(ticks.len() - start)
}

/// Level-1 label at a rollover. Sub-second units keep their fraction.
fn write_rollover_label<W: fmt::Write>(t: f64, unit: TimeUnit, out: &mut W) -> fmt::Result {
    format_time(t, unit.rollover_fmt(), out)?;
    if matches!(unit, TimeUnit::Us | TimeUnit::Ms) {
        out.write_char(' ')?;
        format_time(t, unit.primary_fmt(), out)?;
    }
    Ok(())
}

/// Level-1 label for the first tick of a view that crosses no rollover.
fn write_context_label<W: fmt::Write>(t: f64, unit: TimeUnit, out: &mut W) -> fmt::Result {
    match unit {
        TimeUnit::Us | TimeUnit::Ms | TimeUnit::S => {
            format_time(t, unit.rollover_fmt(), out)?;
            out.write_char(' ')?;
            format_time(t, unit.primary_fmt(), out)
        }
        TimeUnit::Hr => format_time(t, TimeFmt::DayMoHrMin, out),
        TimeUnit::Mo => {
            format_time(t, unit.primary_fmt(), out)?;
            out.write_char(' ')?;
            format_time(t, unit.rollover_fmt(), out)
        }
        TimeUnit::Min | TimeUnit::Day | TimeUnit::Yr => format_time(t, unit.rollover_fmt(), out),
    }
}

/// Caller-supplied ticks. Values outside `range` are skipped; without labels
/// each value is printed as-is.
pub fn add_ticks_custom<S: AsRef<str>>(
    range: Range,
    values: &[f64],
    labels: Option<&[S]>,
    ticks: &mut TickCollection,
    measure: &dyn TextMeasure,
) -> Result<(), TickError> {
    if let Some(labels) = labels {
        if labels.len() != values.len() {
            return Err(TickError::LabelCountMismatch { values: values.len(), labels: labels.len() });
        }
        for (&v, label) in values.iter().zip(labels).filter(|(v, _)| range.contains(**v)) {
            ticks.add_labeled(v, true, label.as_ref(), measure);
        }
    } else {
        for &v in values.iter().filter(|v| range.contains(**v)) {
            ticks.add_with(v, true, true, 0, measure, |s| write!(s, "{}", v));
        }
    }
    Ok(())
}
