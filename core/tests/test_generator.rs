use rand::rngs::StdRng;
use rand::SeedableRng;

use flockweigh_core::generator::{generate_weights, generate_with_bounds};
use flockweigh_core::{analyze, is_parity_valid, FlockError, GeneratorConfig};

#[test]
fn generator_hits_mean_and_spread() {
    let cfg = GeneratorConfig::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let (set, bounds) = generate_with_bounds(2.500, 0.400, 60, &cfg, &mut rng).expect("generate");

    assert_eq!(set.unit_count(), 60);
    assert_eq!(set.valid_count(), 60);

    let a = analyze(&set).unwrap();
    assert!((a.mean - 2.500).abs() < 0.001, "mean={}", a.mean);
    // grensene: 0.40 + inntil 10 % jitter, pluss avrunding til 0.02
    let width = bounds.max - bounds.min;
    assert!(width >= 0.400 - 1e-9 && width <= 0.400 * 1.10 + 0.02 + 1e-9, "width={width}");
    // faktisk range for 60 trekk ligger tett under bredden
    assert!(a.range > 0.30 && a.range <= width + 1e-9, "range={}", a.range);
    for x in set.valid_samples() {
        assert!(is_parity_valid(x), "odd hundredths: {x}");
    }
}

#[test]
fn generator_stays_inside_drawn_bounds() {
    let cfg = GeneratorConfig::default();
    let mut rng = StdRng::seed_from_u64(99);
    let (set, bounds) = generate_with_bounds(1.850, 0.300, 120, &cfg, &mut rng).unwrap();

    assert!(bounds.spread >= 0.300 && bounds.spread <= 0.300 * 1.10 + 1e-12);
    for x in set.valid_samples() {
        assert!(x >= bounds.min - 1e-9 && x <= bounds.max + 1e-9, "{x} outside {bounds:?}");
    }
    let mean = set.total() / 120.0;
    assert!((mean - 1.850).abs() < 0.001, "mean={mean}");
}

#[test]
fn generator_is_deterministic_for_a_seed() {
    let cfg = GeneratorConfig::default();
    let a = generate_weights(2.2, 0.5, 30, &cfg, &mut StdRng::seed_from_u64(5)).unwrap();
    let b = generate_weights(2.2, 0.5, 30, &cfg, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn generator_rejects_bad_parameters() {
    let cfg = GeneratorConfig::default();
    let mut rng = StdRng::seed_from_u64(1);

    let err = generate_weights(0.0, 0.4, 10, &cfg, &mut rng).unwrap_err();
    assert_eq!(err.code(), "invalid_generator_params");
    assert!(err.to_string().contains("average=0"));

    let err = generate_weights(2.5, -0.1, 10, &cfg, &mut rng).unwrap_err();
    assert!(matches!(err, FlockError::InvalidGeneratorParams { .. }));

    let err = generate_weights(2.5, f64::NAN, 10, &cfg, &mut rng).unwrap_err();
    assert!(matches!(err, FlockError::InvalidGeneratorParams { .. }));

    // snitt langt over det vekta kan vise gir feil, ikke overløp
    let err = generate_weights(1.0e16, 0.4, 60, &cfg, &mut rng).unwrap_err();
    assert!(matches!(err, FlockError::InvalidGeneratorParams { .. }));

    assert_eq!(
        generate_weights(2.5, 0.4, 0, &cfg, &mut rng).unwrap_err(),
        FlockError::InvalidCount(0)
    );
    assert_eq!(
        generate_weights(2.5, 0.4, 301, &cfg, &mut rng).unwrap_err(),
        FlockError::InvalidCount(301)
    );
}

#[test]
fn generator_without_jitter_uses_exact_range() {
    let cfg = GeneratorConfig {
        spread_jitter: 0.0,
        ..GeneratorConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(3);
    let (_, bounds) = generate_with_bounds(2.0, 0.4, 50, &cfg, &mut rng).unwrap();
    assert!((bounds.min - 1.80).abs() < 1e-9, "{bounds:?}");
    assert!((bounds.max - 2.20).abs() < 1e-9, "{bounds:?}");
}
