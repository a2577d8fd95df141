use serde::{Deserialize, Serialize};

/// Uniformitetsbåndet er alltid snitt ± 10 %. Fast bransjekonvensjon.
pub const BAND_FRACTION: f64 = 0.10;

// Klassifisering skjer i heltall milligram mot summen, ikke mot et avrundet snitt.
const UNITS_PER_KG: f64 = 1_000_000.0;
const UNITS_PER_CG: i128 = 10_000;

/// Båndet rundt snittet av et sett. `min`/`max` er for visning; selve
/// klassifiseringen går mot den eksakte summen:
/// x ∈ [0.9·S/n, 1.1·S/n]  ⇔  9·S ≤ 10·n·x ≤ 11·S
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BandBounds", into = "BandBounds")]
pub struct Band {
    /// snitt · 0.9
    pub min: f64,
    /// snitt · 1.1
    pub max: f64,
    /// snitt · 0.1 (halv båndbredde)
    pub half_width: f64,
    sum_units: i128,
    n: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BandBounds {
    min: f64,
    max: f64,
    half_width: f64,
}

impl From<Band> for BandBounds {
    fn from(b: Band) -> Self {
        Self {
            min: b.min,
            max: b.max,
            half_width: b.half_width,
        }
    }
}

impl From<BandBounds> for Band {
    fn from(b: BandBounds) -> Self {
        Band::around(b.min + b.half_width)
    }
}

impl Band {
    /// Bånd rundt et oppgitt snitt.
    pub fn around(mean: f64) -> Self {
        Self::with_basis(mean, to_units(mean), 1)
    }

    /// Bånd for et sett gyldige prøver. `None` for tomt sett.
    pub fn of_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let sum_units = samples
            .iter()
            .fold(0i128, |acc, &x| acc.saturating_add(to_units(x)));
        Some(Self::with_basis(mean, sum_units, n))
    }

    /// Bånd for `n` prøver med sum `sum_cg` centigram.
    pub(crate) fn from_centigrams(sum_cg: i64, n: usize) -> Self {
        let mean = sum_cg as f64 / 100.0 / n.max(1) as f64;
        Self::with_basis(mean, sum_cg as i128 * UNITS_PER_CG, n.max(1))
    }

    fn with_basis(mean: f64, sum_units: i128, n: usize) -> Self {
        let half_width = mean * BAND_FRACTION;
        Self {
            min: mean - half_width,
            max: mean + half_width,
            half_width,
            sum_units,
            n,
        }
    }

    pub fn contains(&self, x: f64) -> bool {
        classify(x, self) == Classification::In
    }

    #[inline]
    pub(crate) fn classify_cg(&self, x_cg: i64) -> Classification {
        self.classify_units(x_cg as i128 * UNITS_PER_CG)
    }

    /// Ligger x nøyaktig på en av båndkantene?
    #[inline]
    pub(crate) fn on_edge_cg(&self, x_cg: i64) -> bool {
        let (scaled, lo, hi) = self.scaled(x_cg as i128 * UNITS_PER_CG);
        scaled == lo || scaled == hi
    }

    #[inline]
    fn classify_units(&self, x: i128) -> Classification {
        let (scaled, lo, hi) = self.scaled(x);
        if scaled < lo {
            Classification::Below
        } else if scaled > hi {
            Classification::Above
        } else {
            Classification::In
        }
    }

    // (10·n·x, 9·S, 11·S), mettende så ekstreme verdier ikke kan flyte over
    #[inline]
    fn scaled(&self, x: i128) -> (i128, i128, i128) {
        (
            x.saturating_mul(10 * self.n as i128),
            self.sum_units.saturating_mul(9),
            self.sum_units.saturating_mul(11),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Below,
    In,
    Above,
}

/// Felles klassifisering for analyse, optimalisering og visning.
/// Begge kanter er inkludert i båndet.
#[inline]
pub fn classify(sample: f64, band: &Band) -> Classification {
    band.classify_units(to_units(sample))
}

// `as` metter ved ekstreme verdier; NaN blir 0
#[inline]
fn to_units(x: f64) -> i128 {
    (x * UNITS_PER_KG).round() as i128
}
