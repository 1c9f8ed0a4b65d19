// File: crates/axis-core/tests/ticks_log.rs
// Purpose: Decade majors, 2..9 minors and decade thinning on logarithmic axes.

use axis_core::ticks::add_ticks_log;
use axis_core::{FixedAdvance, Range, TickCollection};

fn log_ticks(min: f64, max: f64, n_major: usize) -> TickCollection {
    let mut tc = TickCollection::default();
    add_ticks_log(Range::new(min, max), n_major, 500, &mut tc, &FixedAdvance::default());
    tc
}

#[test]
fn one_to_thousand_has_four_decade_majors() {
    let tc = log_ticks(1.0, 1000.0, 5);
    let majors: Vec<f64> = tc.iter().filter(|t| t.major).map(|t| t.position).collect();
    assert_eq!(majors, vec![1.0, 10.0, 100.0, 1000.0]);
    let labels: Vec<&str> = tc.visible_labels().map(|(_, s)| s).collect();
    assert_eq!(labels, vec!["1e0", "1e1", "1e2", "1e3"]);
    // 2..9 in each of the three full decades
    assert_eq!(tc.iter().filter(|t| !t.major).count(), 24);
    assert!(tc.iter().filter(|t| !t.major).all(|t| t.label.is_none()));
}

#[test]
fn minors_outside_the_range_are_dropped() {
    let tc = log_ticks(0.5, 50.0, 5);
    let majors: Vec<f64> = tc.iter().filter(|t| t.major).map(|t| t.position).collect();
    assert_eq!(majors, vec![1.0, 10.0]);
    for t in tc.iter() {
        assert!(t.position >= 0.5 * (1.0 - 1e-9) && t.position <= 50.0 * (1.0 + 1e-9), "{}", t.position);
    }
    let all: Vec<f64> = tc.positions().collect();
    for w in all.windows(2) {
        assert!(w[1] > w[0], "{:?}", all);
    }
    // 0.5..0.9, 2..9, 20..50
    assert_eq!(tc.len(), 2 + 5 + 8 + 4);
}

#[test]
fn wide_ranges_thin_labeled_decades() {
    let tc = log_ticks(1e-10, 1e10, 4);
    let labeled: Vec<&str> = tc.visible_labels().map(|(_, s)| s).collect();
    assert_eq!(labeled, vec!["1e-6", "1e0", "1e6"]);
    // every decade still gets an unlabeled mark, no 2..9 minors
    assert_eq!(tc.len(), 21);
}

#[test]
fn non_positive_ranges_produce_nothing() {
    assert!(log_ticks(0.0, 10.0, 5).is_empty());
    assert!(log_ticks(-5.0, -1.0, 5).is_empty());
}
