// File: crates/axis-core/tests/time_ticks.rs
// Purpose: Calendar-aligned time ticks, rollover labels, step selection and tick caps.

use axis_core::ticks::{add_ticks_time, generate_ticks, time_step, try_add_ticks_time_with};
use axis_core::time::{to_epoch_seconds, CivilTime};
use axis_core::types::MAX_TIME;
use axis_core::{FixedAdvance, Range, ScaleKind, TickCollection, TickConfig, TickError, TimeUnit};

fn epoch(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> f64 {
    to_epoch_seconds(&CivilTime::new(y, mo, d, h, mi, s)) as f64
}

fn time_ticks(min: f64, max: f64, n_major: usize) -> TickCollection {
    let mut tc = TickCollection::default();
    add_ticks_time(Range::new(min, max), n_major, 500, &mut tc, &FixedAdvance::default());
    tc
}

fn labels(tc: &TickCollection) -> Vec<String> {
    tc.iter().filter_map(|t| tc.label(t)).map(str::to_owned).collect()
}

#[test]
fn one_day_gets_three_hour_ticks_between_midnights() {
    let t0 = epoch(2024, 3, 10, 0, 0, 0);
    let tc = time_ticks(t0, t0 + 86_400.0, 10);
    assert_eq!(labels(&tc), vec!["3/10", "3am", "6am", "9am", "12pm", "3pm", "6pm", "9pm", "3/11"]);
    assert_eq!(tc.iter().filter(|t| t.level == 1).count(), 2);
    assert_eq!(tc.ticks()[1].position, t0 + 3.0 * 3600.0);
    assert_eq!(tc.label_at(8), Some("3/11"));
    assert_eq!(tc.label_at(9), None);
}

#[test]
fn one_year_gets_bimonthly_ticks() {
    let tc = time_ticks(epoch(2024, 1, 1, 0, 0, 0), epoch(2024, 12, 31, 0, 0, 0), 10);
    assert_eq!(labels(&tc), vec!["2024", "Mar", "May", "Jul", "Sep", "Nov"]);
    assert_eq!(tc.ticks()[0].level, 1);
    assert_eq!(tc.ticks()[1].position, epoch(2024, 3, 1, 0, 0, 0));
}

#[test]
fn half_second_gets_millisecond_ticks() {
    let t0 = 1_700_000_000.0; // 2023-11-14 22:13:20 UTC
    let tc = time_ticks(t0, t0 + 0.5, 10);
    assert_eq!(tc.len(), 11);
    let l = labels(&tc);
    assert_eq!(l[0], "11/14 10:13pm :20.000");
    assert_eq!(tc.ticks()[0].level, 1);
    assert_eq!(l[1], ":20.050");
    assert_eq!(l[10], ":20.500");
}

#[test]
fn view_without_rollover_keeps_date_on_first_tick() {
    let t0 = epoch(2024, 3, 10, 0, 0, 0);
    let tc = time_ticks(t0 + 3.0 * 3600.0, t0 + 21.0 * 3600.0, 10);
    assert_eq!(labels(&tc), vec!["3/10 4:00am", "6am", "8am", "10am", "12pm", "2pm", "4pm", "6pm", "8pm"]);
    assert_eq!(tc.ticks()[0].level, 1);
    assert!(tc.iter().skip(1).all(|t| t.level == 0));
}

#[test]
fn sub_second_view_without_rollover_keeps_seconds() {
    let t0 = 1_700_000_000.0;
    let tc = time_ticks(t0 + 0.21, t0 + 0.61, 10);
    let l = labels(&tc);
    assert_eq!(l[0], "11/14 10:13pm :20.250");
    assert_eq!(l[1], ":20.300");
    assert_eq!(tc.ticks()[0].level, 1);
}

#[test]
fn step_tables() {
    assert_eq!(time_step(TimeUnit::Hr, 86_400.0, 10), 3);
    assert_eq!(time_step(TimeUnit::Ms, 0.5, 10), 50);
    assert_eq!(time_step(TimeUnit::S, 30.0, 10), 5);
    assert_eq!(time_step(TimeUnit::Min, 3_600.0, 4), 15);
    assert_eq!(time_step(TimeUnit::Day, 30.0 * 86_400.0, 5), 7);
    assert_eq!(time_step(TimeUnit::Yr, MAX_TIME, 10), 100);
}

#[test]
fn full_time_range_uses_century_steps() {
    let tc = time_ticks(0.0, MAX_TIME, 10);
    let expected: Vec<String> = (20..=30).map(|c| format!("{}", c * 100)).collect();
    assert_eq!(labels(&tc), expected);
    assert_eq!(tc.ticks().last().map(|t| t.position), Some(MAX_TIME));
}

#[test]
fn ticks_stay_in_range_and_increase() {
    let base = epoch(2021, 6, 15, 13, 47, 12) + 0.375;
    for span in [0.002, 0.75, 45.0, 2_000.0, 50_000.0, 9.0 * 86_400.0, 100.0 * 86_400.0, 3.0 * 365.0 * 86_400.0] {
        let tc = time_ticks(base, base + span, 8);
        assert!(!tc.is_empty(), "span {span}");
        let all: Vec<f64> = tc.positions().collect();
        for w in all.windows(2) {
            assert!(w[1] > w[0], "span {span}: {:?}", all);
        }
        for p in &all {
            assert!(*p >= base && *p <= base + span, "span {span}: {p} outside");
        }
    }
}

#[test]
fn too_fine_a_step_is_rejected_without_output() {
    let mut tc = TickCollection::default();
    let err = try_add_ticks_time_with(Range::new(0.0, MAX_TIME), TimeUnit::Us, 1, 500, &mut tc, &FixedAdvance::default())
        .unwrap_err();
    assert!(matches!(err, TickError::TooManyTicks { unit: TimeUnit::Us, step: 1, cap: 500, .. }), "{err:?}");
    assert!(tc.is_empty());

    let err = try_add_ticks_time_with(Range::new(0.0, 60.0), TimeUnit::S, 0, 500, &mut tc, &FixedAdvance::default())
        .unwrap_err();
    assert_eq!(err, TickError::InvalidStep(0));
}

#[test]
fn explicit_step_reports_count() {
    let t0 = epoch(2024, 3, 10, 0, 0, 0);
    let mut tc = TickCollection::default();
    let n = try_add_ticks_time_with(Range::new(t0, t0 + 86_400.0), TimeUnit::Hr, 6, 500, &mut tc, &FixedAdvance::default())
        .unwrap();
    assert_eq!(n, 5);
    assert_eq!(labels(&tc), vec!["3/10", "6am", "12pm", "6pm", "3/11"]);
}

#[test]
fn rejected_time_ticks_fall_back_to_midpoint() {
    let cfg = TickConfig { max_ticks: 1, ..TickConfig::default() };
    let t0 = epoch(2024, 3, 10, 0, 0, 0);
    let mut tc = TickCollection::default();
    generate_ticks(ScaleKind::Time, Range::new(t0, t0 + 86_400.0), 10, &cfg, &mut tc, &FixedAdvance::default());
    assert_eq!(tc.len(), 1);
    assert_eq!(tc.ticks()[0].position, t0 + 43_200.0);
    assert_eq!(labels(&tc), vec!["12pm"]);
}
