use flockweigh_core::stats::{analyze, analyze_samples, sample_std_dev};
use flockweigh_core::{WeightSet, WeightSlot};

fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

#[test]
fn analyze_basic_descriptive_stats() {
    let set = WeightSet::from_values(&[2.00, 2.10, 1.90, 2.50, 1.50]).unwrap();
    let a = analyze(&set).expect("analysis");

    assert_eq!(a.count, 5);
    assert!(approx(a.min, 1.50, 1e-12));
    assert!(approx(a.max, 2.50, 1e-12));
    assert!(approx(a.range, 1.00, 1e-12));
    assert!(approx(a.mean, 2.00, 1e-12));
    // median på sortert serie: 1.5, 1.9, 2.0, 2.1, 2.5
    assert!(approx(a.median, 2.00, 1e-12));

    // Σ(x−x̄)² = 0.52 → var = 0.52/4
    let sd = a.std_dev.expect("std_dev for n=5");
    assert!(approx(sd, 0.13f64.sqrt(), 1e-9), "sd={sd}");
    let cv = a.coefficient_of_variation.expect("cv");
    assert!(approx(cv, 0.13f64.sqrt() / 2.0 * 100.0, 1e-9), "cv={cv}");

    assert_eq!((a.below_band, a.in_band, a.above_band), (1, 3, 1));
    assert!(approx(a.uniformity, 60.0, 1e-9));
}

#[test]
fn analyze_even_count_median_is_midpoint() {
    let a = analyze_samples(&[4.0, 1.0, 3.0, 2.0]).unwrap();
    assert!(approx(a.median, 2.5, 1e-12));
    assert!(approx(a.min, 1.0, 1e-12));
    assert!(approx(a.max, 4.0, 1e-12));
}

#[test]
fn analyze_ignores_empty_zero_and_negative_slots() {
    let slots = vec![
        WeightSlot::Empty,
        WeightSlot::Value(0.0),
        WeightSlot::Value(2.40),
        WeightSlot::parse("abc"),
        WeightSlot::Value(-1.0),
        WeightSlot::parse("2,60"),
    ];
    let set = WeightSet::from_slots(slots).unwrap();
    let a = analyze(&set).unwrap();
    assert_eq!(a.count, 2);
    assert!(approx(a.mean, 2.50, 1e-12));
}

#[test]
fn analyze_single_sample_has_no_dispersion() {
    let a = analyze_samples(&[2.0]).unwrap();
    assert_eq!(a.count, 1);
    assert!(a.std_dev.is_none(), "n=1 skal ikke gi standardavvik");
    assert!(a.coefficient_of_variation.is_none());
    assert!(approx(a.uniformity, 100.0, 1e-12));
    assert!(approx(a.range, 0.0, 1e-12));
}

#[test]
fn analyze_empty_set_is_none() {
    let set = WeightSet::new(60).unwrap();
    assert!(analyze(&set).is_none());
    assert!(analyze_samples(&[]).is_none());
}

#[test]
fn analyze_does_not_depend_on_slot_order() {
    let a = analyze_samples(&[2.0, 2.1, 1.6, 2.4, 1.9]).unwrap();
    let b = analyze_samples(&[1.6, 1.9, 2.0, 2.1, 2.4]).unwrap();
    assert!(approx(a.mean, b.mean, 1e-12));
    assert!(approx(a.median, b.median, 1e-12));
    assert_eq!(a.in_band, b.in_band);
}

#[test]
fn std_dev_needs_two_samples() {
    assert!(sample_std_dev(&[1.0], 1.0).is_none());
    let sd = sample_std_dev(&[1.0, 3.0], 2.0).unwrap();
    assert!(approx(sd, 2f64.sqrt(), 1e-12));
}
