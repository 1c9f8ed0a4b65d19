// File: crates/axis-core/src/time.rs
// Summary: UTC calendar arithmetic and time label formatting for time axes.
// Notes:
// - No timezone, locale or host clock is consulted; every conversion is done by
//   hand over the proleptic Gregorian calendar so results are platform independent.
// - Timestamps are f64 seconds since 1970-01-01T00:00:00Z. Leap seconds do not exist here.

use std::fmt;

use crate::text::TextMeasure;
use crate::types::MAX_TIME;

const SECS_PER_DAY: i64 = 86_400;

/// Display granularity of a time axis, finest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeUnit {
    Us,
    Ms,
    S,
    Min,
    Hr,
    Day,
    Mo,
    Yr,
}

impl TimeUnit {
    pub const COUNT: usize = 8;
    pub const ALL: [TimeUnit; TimeUnit::COUNT] = [
        TimeUnit::Us,
        TimeUnit::Ms,
        TimeUnit::S,
        TimeUnit::Min,
        TimeUnit::Hr,
        TimeUnit::Day,
        TimeUnit::Mo,
        TimeUnit::Yr,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Nominal length in seconds (months and years are averages).
    pub fn span(self) -> f64 {
        TIME_UNIT_SPANS[self.index()]
    }

    /// Next coarser unit; `None` for years.
    pub fn coarser(self) -> Option<TimeUnit> {
        TimeUnit::ALL.get(self.index() + 1).copied()
    }

    /// Format of the ticks at this unit's own granularity.
    pub fn primary_fmt(self) -> TimeFmt {
        TIME_FORMAT_LEVEL0[self.index()]
    }

    /// Coarser format used at rollovers of the next unit up.
    pub fn rollover_fmt(self) -> TimeFmt {
        TIME_FORMAT_LEVEL1[self.index()]
    }
}

/// Label formats; the comment shows a sample rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeFmt {
    SUs,          // :29.428552
    SMs,          // :29.428
    S,            // :29
    HrMin,        // 7:21pm
    Hr,           // 7pm
    DayMo,        // 10/3
    DayMoHrMin,   // 10/3 7:21pm
    DayMoYrHrMin, // 10/3/1991 7:21pm
    Mo,           // Oct
    Yr,           // 1991
}

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const MONTH_ABBREV: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
const TIME_UNIT_SPANS: [f64; TimeUnit::COUNT] = [0.000001, 0.001, 1.0, 60.0, 3600.0, 86400.0, 2629800.0, 31557600.0];
const UNIT_CUTOFFS: [f64; TimeUnit::COUNT] = [0.001, 1.0, 60.0, 3600.0, 86400.0, 2629800.0, 31557600.0, MAX_TIME];

const TIME_FORMAT_LEVEL0: [TimeFmt; TimeUnit::COUNT] = [
    TimeFmt::SUs,
    TimeFmt::SMs,
    TimeFmt::S,
    TimeFmt::HrMin,
    TimeFmt::Hr,
    TimeFmt::DayMo,
    TimeFmt::Mo,
    TimeFmt::Yr,
];

const TIME_FORMAT_LEVEL1: [TimeFmt; TimeUnit::COUNT] = [
    TimeFmt::DayMoHrMin,
    TimeFmt::DayMoHrMin,
    TimeFmt::DayMoHrMin,
    TimeFmt::DayMoHrMin,
    TimeFmt::DayMo,
    TimeFmt::DayMo,
    TimeFmt::Yr,
    TimeFmt::Yr,
];

/// Pick the display unit for a visible span (seconds) by cutoff lookup.
pub fn unit_for_range(span: f64) -> TimeUnit {
    TimeUnit::ALL
        .into_iter()
        .zip(UNIT_CUTOFFS)
        .find(|&(_, cutoff)| span <= cutoff)
        .map(|(unit, _)| unit)
        .unwrap_or(TimeUnit::Yr)
}

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days in `month` (1..=12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    debug_assert!((1..=12).contains(&month), "month out of range: {month}");
    DAYS_IN_MONTH[(month - 1) as usize] + u32::from(month == 2 && is_leap_year(year))
}

/// Calendar fields of a UTC instant. `month` and `day` are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CivilTime {
    pub const fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self { year, month, day, hour, minute, second }
    }

    /// Midnight at the start of the given date.
    pub const fn date(year: i32, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }
}

impl Default for CivilTime {
    fn default() -> Self {
        Self::date(1970, 1, 1)
    }
}

// Leap days in years [1, y], valid for negative y as well.
fn leaps_through(y: i64) -> i64 {
    y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

// Days from 1970-01-01 to January 1st of `year`.
fn days_before_year(year: i32) -> i64 {
    let y = year as i64;
    365 * (y - 1970) + leaps_through(y - 1) - leaps_through(1969)
}

fn days_before_month(year: i32, month: u32) -> i64 {
    (1..month).map(|m| days_in_month(year, m) as i64).sum()
}

/// Seconds since the epoch for a civil UTC time.
pub fn to_epoch_seconds(c: &CivilTime) -> i64 {
    debug_assert!((1..=12).contains(&c.month), "month out of range: {}", c.month);
    debug_assert!(c.day >= 1 && c.day <= days_in_month(c.year, c.month), "day out of range: {}", c.day);
    debug_assert!(c.hour < 24 && c.minute < 60 && c.second < 60, "time of day out of range");
    let days = days_before_year(c.year) + days_before_month(c.year, c.month) + (c.day as i64 - 1);
    days * SECS_PER_DAY + c.hour as i64 * 3600 + c.minute as i64 * 60 + c.second as i64
}

/// Civil UTC fields for whole seconds since the epoch.
pub fn from_epoch_seconds(secs: i64) -> CivilTime {
    let days = secs.div_euclid(SECS_PER_DAY);
    let rem = secs.rem_euclid(SECS_PER_DAY);

    let mut year = 1970 + (days as f64 / 365.2425).floor() as i32;
    while days_before_year(year) > days {
        year -= 1;
    }
    while days_before_year(year + 1) <= days {
        year += 1;
    }

    let mut day_of_year = days - days_before_year(year);
    let mut month = 1;
    loop {
        let dim = days_in_month(year, month) as i64;
        if day_of_year < dim || month == 12 {
            break;
        }
        day_of_year -= dim;
        month += 1;
    }

    CivilTime {
        year,
        month,
        day: day_of_year as u32 + 1,
        hour: (rem / 3600) as u32,
        minute: (rem % 3600 / 60) as u32,
        second: (rem % 60) as u32,
    }
}

#[inline]
fn civil_of(t: f64) -> CivilTime {
    from_epoch_seconds(t.floor() as i64)
}

/// Floor a sub-second timestamp onto a grid of `1/scale` seconds such that
/// flooring the result again is a no-op.
fn floor_scaled(t: f64, scale: f64) -> f64 {
    let mut k = (t * scale).floor();
    if (k + 1.0) / scale <= t {
        k += 1.0;
    } else if k / scale > t {
        k -= 1.0;
    }
    k / scale
}

/// Start of the `unit` containing `t`. Idempotent.
pub fn floor_time(t: f64, unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::Us => return floor_scaled(t, 1_000_000.0),
        TimeUnit::Ms => return floor_scaled(t, 1_000.0),
        TimeUnit::S => return t.floor(),
        _ => {}
    }
    let mut c = civil_of(t);
    if unit >= TimeUnit::Min {
        c.second = 0;
    }
    if unit >= TimeUnit::Hr {
        c.minute = 0;
    }
    if unit >= TimeUnit::Day {
        c.hour = 0;
    }
    if unit >= TimeUnit::Mo {
        c.day = 1;
    }
    if unit >= TimeUnit::Yr {
        c.month = 1;
    }
    to_epoch_seconds(&c) as f64
}

/// Start of the next `unit` after `floor_time(t, unit)`.
pub fn ceil_time(t: f64, unit: TimeUnit) -> f64 {
    add_time(floor_time(t, unit), unit, 1)
}

type UnitAdder = fn(f64, i32) -> f64;

fn add_micros(t: f64, n: i32) -> f64 { t + n as f64 * 0.000001 }
fn add_millis(t: f64, n: i32) -> f64 { t + n as f64 * 0.001 }
fn add_seconds(t: f64, n: i32) -> f64 { t + n as f64 }
fn add_minutes(t: f64, n: i32) -> f64 { t + n as f64 * 60.0 }
fn add_hours(t: f64, n: i32) -> f64 { t + n as f64 * 3600.0 }
fn add_days(t: f64, n: i32) -> f64 { t + n as f64 * 86400.0 }

/// Calendar month addition; the day of month is clamped to the target month's length.
fn add_months(t: f64, n: i32) -> f64 {
    let whole = t.floor();
    let frac = t - whole;
    let mut c = from_epoch_seconds(whole as i64);
    let total = c.year as i64 * 12 + (c.month as i64 - 1) + n as i64;
    c.year = total.div_euclid(12) as i32;
    c.month = total.rem_euclid(12) as u32 + 1;
    c.day = c.day.min(days_in_month(c.year, c.month));
    to_epoch_seconds(&c) as f64 + frac
}

fn add_years(t: f64, n: i32) -> f64 {
    add_months(t, n.saturating_mul(12))
}

const UNIT_ADDERS: [UnitAdder; TimeUnit::COUNT] =
    [add_micros, add_millis, add_seconds, add_minutes, add_hours, add_days, add_months, add_years];

/// Advance `t` by `count` units, calendar-aware for months and years.
pub fn add_time(t: f64, unit: TimeUnit, count: i32) -> f64 {
    UNIT_ADDERS[unit.index()](t, count)
}

/// Calendar year containing `t`.
pub fn year_of(t: f64) -> i32 {
    civil_of(t).year
}

/// Start of `year`, clamped to the epoch.
pub fn make_year(year: i32) -> f64 {
    let s = to_epoch_seconds(&CivilTime::date(year.max(1970), 1, 1));
    s.max(0) as f64
}

fn hour12(hour: u32) -> (u32, &'static str) {
    match hour {
        0 => (12, "am"),
        12 => (12, "pm"),
        h if h < 12 => (h, "am"),
        h => (h - 12, "pm"),
    }
}

/// Write `t` formatted as `fmt` into `out`.
pub fn format_time<W: fmt::Write>(t: f64, fmt: TimeFmt, out: &mut W) -> fmt::Result {
    let whole = t.floor();
    let frac = t - whole;
    let c = from_epoch_seconds(whole as i64);
    let ms = ((frac * 1_000.0).round() as u32).min(999);
    let us = ((frac * 1_000_000.0).round() as u32).min(999_999);
    let (h12, ampm) = hour12(c.hour);
    match fmt {
        TimeFmt::Yr => write!(out, "{}", c.year),
        TimeFmt::Mo => out.write_str(MONTH_ABBREV[(c.month - 1) as usize]),
        TimeFmt::DayMo => write!(out, "{}/{}", c.month, c.day),
        TimeFmt::DayMoHrMin => write!(out, "{}/{} {}:{:02}{}", c.month, c.day, h12, c.minute, ampm),
        TimeFmt::DayMoYrHrMin => {
            write!(out, "{}/{}/{} {}:{:02}{}", c.month, c.day, c.year, h12, c.minute, ampm)
        }
        TimeFmt::Hr => write!(out, "{}{}", h12, ampm),
        TimeFmt::HrMin => write!(out, "{}:{:02}{}", h12, c.minute, ampm),
        TimeFmt::S => write!(out, ":{:02}", c.second),
        TimeFmt::SMs => write!(out, ":{:02}.{:03}", c.second, ms),
        TimeFmt::SUs => write!(out, ":{:02}.{:06}", c.second, us),
    }
}

/// Convenience wrapper around [`format_time`].
pub fn format_time_string(t: f64, fmt: TimeFmt) -> String {
    let mut s = String::new();
    // Writing into a String cannot fail.
    let _ = format_time(t, fmt, &mut s);
    s
}

/// Nominal widest rendering of `fmt`.
pub fn time_label_width(fmt: TimeFmt, measure: &dyn TextMeasure) -> f32 {
    let sample = match fmt {
        TimeFmt::SUs => ":88.888888",
        TimeFmt::SMs => ":88.888",
        TimeFmt::S => ":88",
        TimeFmt::HrMin => "88:88pm",
        TimeFmt::Hr => "8pm",
        TimeFmt::DayMo => "88/88",
        TimeFmt::DayMoHrMin => "88/88 88:88pm",
        TimeFmt::DayMoYrHrMin => "88/88/8888 88:88pm",
        TimeFmt::Mo => "MMM",
        TimeFmt::Yr => "8888",
    };
    measure.measure_text(sample).0
}
