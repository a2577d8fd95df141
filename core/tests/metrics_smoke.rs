use flockweigh_core::metrics::{gather_text, metrics};
use flockweigh_core::{optimize_uniformity, OptimizerConfig, WeightSet};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn optimizer_outcomes_are_counted() {
    let m = metrics();
    let before_fail = m.optimizer_runs.with_label_values(&["insufficient_data"]).get();

    let mut set = WeightSet::from_values(&[2.0, 2.2]).unwrap();
    let res = optimize_uniformity(&mut set, 80.0, &OptimizerConfig::default(), &mut StdRng::seed_from_u64(1));
    assert!(!res.success);

    let after_fail = m.optimizer_runs.with_label_values(&["insufficient_data"]).get();
    assert!(after_fail >= before_fail + 1);

    let text = gather_text();
    assert!(text.contains("flock_optimizer_runs_total"), "{text}");
    assert!(text.contains("outcome=\"insufficient_data\""));
}
