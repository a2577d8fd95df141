use ordered_float::OrderedFloat;

use crate::band::{classify, Band, Classification};
use crate::models::WeightSet;
use crate::types::AnalysisResult;

/// Median av en sortert serie.
fn median_sorted(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        (xs[n / 2 - 1] + xs[n / 2]) / 2.0
    }
}

/// Utvalgsstandardavvik (Bessel, n−1). `None` for n < 2.
pub fn sample_std_dev(xs: &[f64], mean: f64) -> Option<f64> {
    let n = xs.len();
    if n < 2 {
        return None;
    }
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let sd = var.sqrt();
    sd.is_finite().then_some(sd)
}

/// Statistikk for en liste rå verdier. Kun gyldige (endelige, > 0) teller.
pub fn analyze_samples(samples: &[f64]) -> Option<AnalysisResult> {
    let valid: Vec<f64> = samples
        .iter()
        .copied()
        .filter(|x| x.is_finite() && *x > 0.0)
        .collect();
    if valid.is_empty() {
        return None;
    }

    let n = valid.len();
    let mean = valid.iter().sum::<f64>() / n as f64;

    let mut sorted = valid.clone();
    sorted.sort_by_key(|x| OrderedFloat(*x));
    let min = sorted[0];
    let max = sorted[n - 1];

    let std_dev = sample_std_dev(&valid, mean);
    let coefficient_of_variation = match std_dev {
        Some(sd) if mean != 0.0 => Some(sd / mean * 100.0),
        _ => None,
    };

    let band = Band::of_samples(&valid)?;
    let (mut below_band, mut in_band, mut above_band) = (0usize, 0usize, 0usize);
    for &x in &valid {
        match classify(x, &band) {
            Classification::Below => below_band += 1,
            Classification::In => in_band += 1,
            Classification::Above => above_band += 1,
        }
    }

    Some(AnalysisResult {
        count: n,
        min,
        max,
        range: max - min,
        mean,
        median: median_sorted(&sorted),
        std_dev,
        coefficient_of_variation,
        band,
        below_band,
        in_band,
        above_band,
        uniformity: in_band as f64 / n as f64 * 100.0,
    })
}

/// Beregnes på nytt ved hver lesing. `None` uten gyldige vekter.
pub fn analyze(weights: &WeightSet) -> Option<AnalysisResult> {
    analyze_samples(&weights.valid_samples())
}
