// core/src/generator.rs
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::error::{FlockError, FlockResult};
use crate::metrics;
use crate::models::{WeightSet, MAX_UNITS};
use crate::precision::{from_centigrams, parity_centigrams, MAX_WEIGHT_KG, PARITY_STEP_CG};

/// Grensene (kg) én generering trakk innenfor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratedBounds {
    pub spread: f64,
    pub min: f64,
    pub max: f64,
}

/// Lager `count` partallsvekter med snitt `target_average` og spredning
/// rundt `target_range` (+ inntil `spread_jitter` ekstra).
pub fn generate_weights<R: Rng + ?Sized>(
    target_average: f64,
    target_range: f64,
    count: usize,
    cfg: &GeneratorConfig,
    rng: &mut R,
) -> FlockResult<WeightSet> {
    let res = generate_with_bounds(target_average, target_range, count, cfg, rng);
    metrics::generator_run(res.as_ref().map_or_else(|e| e.code(), |_| "ok"));
    res.map(|(set, _)| set)
}

pub fn generate_with_bounds<R: Rng + ?Sized>(
    target_average: f64,
    target_range: f64,
    count: usize,
    cfg: &GeneratorConfig,
    rng: &mut R,
) -> FlockResult<(WeightSet, GeneratedBounds)> {
    let params_ok = target_average.is_finite()
        && target_range.is_finite()
        && target_average > 0.0
        && target_range > 0.0
        && target_average + target_range <= MAX_WEIGHT_KG;
    if !params_ok {
        return Err(FlockError::InvalidGeneratorParams {
            average: target_average,
            range: target_range,
        });
    }
    if !(1..=MAX_UNITS).contains(&count) {
        return Err(FlockError::InvalidCount(count));
    }

    // 1) spredning med jitter, grenser sentrert om snittet
    let spread = target_range + rng.gen::<f64>() * cfg.spread_jitter * target_range;
    let half = spread / 2.0;
    let min_cg = parity_centigrams(target_average - half).max(PARITY_STEP_CG);
    let max_cg = parity_centigrams(target_average + half).max(min_cg);

    // 2) uavhengige uniforme trekk, paritetsrundet
    let (lo, hi) = (from_centigrams(min_cg), from_centigrams(max_cg));
    let mut work: Vec<i64> = (0..count)
        .map(|_| parity_centigrams(rng.gen_range(lo..=hi)).clamp(min_cg, max_cg))
        .collect();

    // 3) sumkorreksjon i ±0.02-steg innenfor [min, max]
    let target_sum_cg = target_average * count as f64 * 100.0;
    let passes = correct_sum(&mut work, target_sum_cg, min_cg, max_cg, cfg);

    let residual_kg = (target_sum_cg - work.iter().sum::<i64>() as f64) / 100.0;
    if residual_kg.abs() >= cfg.tolerance_kg {
        log::warn!(
            "generator sum off by {residual_kg:.3} kg after {passes} pass(es) (best effort)"
        );
    }
    log::info!(
        "generated {count} weights: target avg {target_average:.3} kg, bounds [{lo:.2}, {hi:.2}], {passes} correction pass(es)"
    );

    let values: Vec<f64> = work.iter().map(|&cg| from_centigrams(cg)).collect();
    let set = WeightSet::from_values(&values)?;
    Ok((
        set,
        GeneratedBounds {
            spread,
            min: lo,
            max: hi,
        },
    ))
}

fn correct_sum(
    work: &mut [i64],
    target_sum_cg: f64,
    min_cg: i64,
    max_cg: i64,
    cfg: &GeneratorConfig,
) -> usize {
    let tolerance_cg = cfg.tolerance_kg * 100.0;
    // Under et halvt steg kan ikke et 0.02-dytt forbedre summen
    let half_step = PARITY_STEP_CG as f64 / 2.0;
    let mut diff = target_sum_cg - work.iter().sum::<i64>() as f64;
    let mut passes = 0;

    while diff.abs() >= tolerance_cg && diff.abs() >= half_step && passes < cfg.max_correction_passes {
        passes += 1;
        let mut moved = false;

        for x in work.iter_mut() {
            if diff.abs() < tolerance_cg || diff.abs() < half_step {
                break;
            }
            let step = if diff > 0.0 { PARITY_STEP_CG } else { -PARITY_STEP_CG };
            let cand = *x + step;
            if cand < min_cg || cand > max_cg {
                continue;
            }
            *x = cand;
            diff -= step as f64;
            moved = true;
        }

        if !moved {
            break;
        }
    }
    passes
}
