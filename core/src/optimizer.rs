// core/src/optimizer.rs
use rand::seq::SliceRandom;
use rand::Rng;

use crate::band::{Band, Classification};
use crate::config::OptimizerConfig;
use crate::error::{FlockError, FlockResult};
use crate::metrics;
use crate::models::WeightSet;
use crate::precision::{
    from_centigrams, is_parity_valid, parity_centigrams, to_centigrams, MAX_WEIGHT_KG,
    PARITY_STEP_CG,
};
use crate::types::OptimizationResult;

/// Færre gyldige vekter enn dette gir ikke mening å optimalisere.
pub const MIN_SAMPLES: usize = 3;

/// Detaljert utfall av en vellykket kjøring.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationOutcome {
    pub before_uniformity: f64,
    pub after_uniformity: f64,
    pub target_count: usize,
    pub in_band: usize,
    pub adjusted_count: usize,
    /// Iterasjoner brukt i båndsøket.
    pub iterations: usize,
    /// Gjennomganger brukt i sum-rebalanseringen.
    pub rebalance_passes: usize,
    /// Gjenværende sumavvik (kg) etter rebalansering.
    pub residual_kg: f64,
}

impl OptimizationOutcome {
    pub fn message(&self) -> String {
        format!(
            "{:.1}% → {:.1}%, {} samples modified",
            self.before_uniformity, self.after_uniformity, self.adjusted_count
        )
    }
}

/// Omskriver vektene slik at antallet i båndet nærmer seg
/// `round(target/100 · n)`, med uendret sum og kun partall i hundredelen.
/// Ved feil er `weights` urørt.
pub fn optimize_uniformity<R: Rng + ?Sized>(
    weights: &mut WeightSet,
    target_uniformity_percent: f64,
    cfg: &OptimizerConfig,
    rng: &mut R,
) -> OptimizationResult {
    match try_optimize(weights, target_uniformity_percent, cfg, rng) {
        Ok(outcome) => {
            metrics::optimizer_run("ok");
            log::info!(
                "uniformity optimized: {} (iterations={}, passes={}, residual={:.3} kg)",
                outcome.message(),
                outcome.iterations,
                outcome.rebalance_passes,
                outcome.residual_kg
            );
            OptimizationResult::ok(outcome.message())
                .with_adjusted(outcome.adjusted_count, outcome.after_uniformity)
        }
        Err(e) => {
            metrics::optimizer_run(e.code());
            log::debug!("uniformity optimizer rejected input: {e}");
            OptimizationResult::failure(&e)
        }
    }
}

pub fn try_optimize<R: Rng + ?Sized>(
    weights: &mut WeightSet,
    target_uniformity_percent: f64,
    cfg: &OptimizerConfig,
    rng: &mut R,
) -> FlockResult<OptimizationOutcome> {
    // NaN faller også ut her
    if !(target_uniformity_percent > 50.0 && target_uniformity_percent <= 100.0) {
        return Err(FlockError::InvalidTarget(target_uniformity_percent));
    }

    let indices = weights.valid_indices();
    let values = weights.valid_samples();
    let n = values.len();

    if n < MIN_SAMPLES {
        return Err(FlockError::InsufficientData {
            needed: MIN_SAMPLES,
            got: n,
        });
    }

    if let Some(&value) = values.iter().find(|&&x| x > MAX_WEIGHT_KG) {
        return Err(FlockError::WeightOutOfRange { value });
    }

    let odd: Vec<f64> = values.iter().copied().filter(|x| !is_parity_valid(*x)).collect();
    if let Some(&first) = odd.first() {
        return Err(FlockError::OddWeights {
            count: odd.len(),
            first,
        });
    }

    let original: Vec<i64> = values.iter().map(|&x| to_centigrams(x)).collect();
    let sum_cg: i64 = original.iter().sum();
    let target_count = (target_uniformity_percent / 100.0 * n as f64).round() as usize;
    let band = Band::from_centigrams(sum_cg, n);

    let in_before = count_in_band(&original, &band);
    let before_uniformity = pct(in_before, n);
    if in_before == target_count {
        return Err(FlockError::AlreadyAtTarget {
            current: before_uniformity,
            in_band: in_before,
            total: n,
        });
    }

    let mean = from_centigrams(sum_cg) / n as f64;
    let anchors = Anchors::new(&band, mean, cfg.exclusion_offset_kg);

    let mut work = original.clone();
    let iterations = steer_band_count(&mut work, &band, target_count, &anchors, cfg.max_iterations);
    let (rebalance_passes, residual_cg) = rebalance_sum(&mut work, sum_cg, &band, &anchors, cfg);

    let in_after = count_in_band(&work, &band);
    if in_after != target_count {
        log::warn!(
            "optimizer stopped at {in_after} in band, target was {target_count} (best effort)"
        );
    }
    let adjusted_count = work.iter().zip(&original).filter(|(a, b)| a != b).count();

    // Fjern posisjonsmønster før tilbakeskriving
    if cfg.shuffle_on_write {
        work.shuffle(rng);
    }
    let out: Vec<f64> = work.iter().map(|&cg| from_centigrams(cg)).collect();
    weights.write_values(&indices, &out);

    Ok(OptimizationOutcome {
        before_uniformity,
        after_uniformity: pct(in_after, n),
        target_count,
        in_band: in_after,
        adjusted_count,
        iterations,
        rebalance_passes,
        residual_kg: from_centigrams(residual_cg),
    })
}

/// Målverdier (centigram) for å flytte en prøve inn i eller ut av båndet.
struct Anchors {
    /// Paritetsrundet snitt, garantert inne i båndet.
    mean: Option<i64>,
    /// bandMin − offset, garantert under båndet og > 0.
    low: Option<i64>,
    /// bandMax + offset, garantert over båndet.
    high: i64,
}

impl Anchors {
    fn new(band: &Band, mean: f64, offset_kg: f64) -> Self {
        let mean_cg = parity_centigrams(mean);
        let mean = (band.classify_cg(mean_cg) == Classification::In && !band.on_edge_cg(mean_cg))
            .then_some(mean_cg);

        let mut low = parity_centigrams(band.min - offset_kg);
        while low > 0 && band.classify_cg(low) != Classification::Below {
            low -= PARITY_STEP_CG;
        }
        let low = (low > 0).then_some(low);

        let mut high = parity_centigrams(band.max + offset_kg);
        while band.classify_cg(high) != Classification::Above {
            high += PARITY_STEP_CG;
        }

        Self { mean, low, high }
    }
}

/// Steg 1: én prøve per iterasjon inn i eller ut av båndet til antallet stemmer.
fn steer_band_count(
    work: &mut [i64],
    band: &Band,
    target_count: usize,
    anchors: &Anchors,
    max_iterations: usize,
) -> usize {
    let mut push_low = true;
    let mut used = 0;

    for _ in 0..max_iterations {
        let in_count = count_in_band(work, band);
        if in_count == target_count {
            break;
        }
        used += 1;

        if in_count < target_count {
            // Nærmeste prøve under båndet først, ellers nærmeste over
            let Some(mean_cg) = anchors.mean else { break };
            let below = pick(work, |x| band.classify_cg(x) == Classification::Below, |x| x);
            let above = pick(work, |x| band.classify_cg(x) == Classification::Above, |x| -x);
            match below.or(above) {
                Some(i) => work[i] = mean_cg,
                None => break,
            }
        } else {
            // Veksle mellom nedre og øvre side så snittet ikke forskyves
            let go_low = push_low && anchors.low.is_some();
            push_low = !push_low;
            let inside = |x: i64| band.classify_cg(x) == Classification::In;
            let (idx, dest) = if go_low {
                (pick(work, inside, |x| -x), anchors.low.unwrap_or(anchors.high))
            } else {
                (pick(work, inside, |x| x), anchors.high)
            };
            match idx {
                Some(i) => work[i] = dest,
                None => break,
            }
        }
    }

    log::debug!("band steering used {used} iteration(s)");
    used
}

/// Steg 2: ±0.02-dytt som ikke endrer klassifiseringen, til summen er tilbake.
/// Stopper dyttene helt, flyttes én prøve utenfor båndet til ankeret på
/// motsatt side og rebalanseringen fortsetter derfra.
/// Returnerer (gjennomganger, restavvik i centigram).
fn rebalance_sum(
    work: &mut [i64],
    sum_cg: i64,
    band: &Band,
    anchors: &Anchors,
    cfg: &OptimizerConfig,
) -> (usize, i64) {
    let n = work.len();
    let tolerance_cg = cfg.tolerance_kg * 100.0;
    let mut diff = sum_cg - work.iter().sum::<i64>();
    let mut passes = 0;
    let mut flips = 0;

    while (diff.abs() as f64) >= tolerance_cg && passes < cfg.rebalance_passes {
        passes += 1;
        let mut moved = false;

        for x in work.iter_mut() {
            if (diff.abs() as f64) < tolerance_cg {
                break;
            }
            let step = PARITY_STEP_CG * diff.signum();
            let cand = *x + step;
            if cand <= 0 {
                continue;
            }
            if band.classify_cg(cand) != band.classify_cg(*x) || band.on_edge_cg(cand) {
                continue;
            }
            *x = cand;
            diff -= step;
            moved = true;
        }

        if !moved {
            if flips >= n {
                break;
            }
            // For tung: nærmeste prøve over båndet ned under. For lett: omvendt.
            let (idx, dest) = if diff < 0 {
                let above = pick(work, |x| band.classify_cg(x) == Classification::Above, |x| -x);
                (above, anchors.low)
            } else {
                let below = pick(work, |x| band.classify_cg(x) == Classification::Below, |x| x);
                (below, Some(anchors.high))
            };
            let (Some(i), Some(dest)) = (idx, dest) else { break };
            diff -= dest - work[i];
            work[i] = dest;
            flips += 1;
        }
    }

    if (diff.abs() as f64) >= tolerance_cg {
        log::warn!(
            "sum rebalancing left {:.2} kg after {passes} pass(es)",
            from_centigrams(diff)
        );
    } else {
        log::debug!("sum rebalanced in {passes} pass(es), {flips} side switch(es)");
    }
    (passes, diff)
}

/// Indeksen med størst `key` blant prøvene som oppfyller `filter`.
fn pick(work: &[i64], filter: impl Fn(i64) -> bool, key: impl Fn(i64) -> i64) -> Option<usize> {
    work.iter()
        .enumerate()
        .filter(|&(_, &x)| filter(x))
        .max_by_key(|&(_, &x)| key(x))
        .map(|(i, _)| i)
}

fn count_in_band(work: &[i64], band: &Band) -> usize {
    work.iter()
        .filter(|&&x| band.classify_cg(x) == Classification::In)
        .count()
}

fn pct(k: usize, n: usize) -> f64 {
    k as f64 / n as f64 * 100.0
}
