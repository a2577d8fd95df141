// Vekten kommer fra en vekt som kun viser partall i hundredelen (0.02 kg-steg).
// Optimalisering og generator regner internt i heltall centigram for å holde
// summen eksakt.

/// Minste steg en vekt kan endres med (kg).
pub const PARITY_STEP_KG: f64 = 0.02;

/// Absolutt toleranse for sum/likhet (kg).
pub const SUM_TOLERANCE_KG: f64 = 0.001;

/// Samme steg uttrykt i centigram.
pub const PARITY_STEP_CG: i64 = 2;

/// Største vekt (kg) optimizer og generator regner med.
pub const MAX_WEIGHT_KG: f64 = 10_000.0;

// Hvor langt fra et helt centigram en verdi kan ligge og fortsatt regnes som eksakt.
const CENTIGRAM_EPS: f64 = 1e-6;

pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 {
            return self.round();
        }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// Runder til nærmeste multiplum av 0.02 (`round(v * 50) / 50`).
#[inline]
pub fn round_to_parity(value: f64) -> f64 {
    (value * 50.0).round() / 50.0
}

/// Sann når verdien er et helt antall centigram med partall i hundredelen,
/// altså et multiplum av 0.02. 2.004 er ikke gyldig.
#[inline]
pub fn is_parity_valid(value: f64) -> bool {
    let cg = value * 100.0;
    cg.is_finite() && (cg - cg.round()).abs() <= CENTIGRAM_EPS && to_centigrams(value) % 2 == 0
}

#[inline]
pub fn to_centigrams(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

#[inline]
pub fn from_centigrams(cg: i64) -> f64 {
    cg as f64 / 100.0
}

/// Paritetsrundet verdi direkte i centigram.
#[inline]
pub fn parity_centigrams(value: f64) -> i64 {
    2 * (value * 50.0).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalSeparator {
    #[default]
    Dot,
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(self) -> char {
        match self {
            DecimalSeparator::Dot => '.',
            DecimalSeparator::Comma => ',',
        }
    }
}

/// Fast antall desimaler, uten tusenskille.
pub fn format_number(value: f64, decimals: u32, separator: DecimalSeparator) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let fixed = format!("{:.*}", decimals as usize, (value + f64::EPSILON).round_to(decimals));
    match separator {
        DecimalSeparator::Dot => fixed,
        DecimalSeparator::Comma => fixed.replace('.', ","),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_rounding_snaps_to_even_hundredths() {
        assert!((round_to_parity(2.47) - 2.48).abs() < 1e-12 || (round_to_parity(2.47) - 2.46).abs() < 1e-12);
        assert!((round_to_parity(2.455) - 2.46).abs() < 1e-12);
        assert!((round_to_parity(1.8) - 1.8).abs() < 1e-12);
        assert_eq!(parity_centigrams(2.315), 232);
        assert_eq!(parity_centigrams(2.285), 228);
    }

    #[test]
    fn parity_check_uses_hundredths_digit() {
        assert!(is_parity_valid(2.00));
        assert!(is_parity_valid(1.98));
        assert!(!is_parity_valid(1.01));
        assert!(!is_parity_valid(2.35));
        assert!(!is_parity_valid(2.004));
        assert!(!is_parity_valid(f64::NAN));
        assert!(is_parity_valid(0.1 + 0.2 + 2.2));
    }

    #[test]
    fn format_number_respects_separator() {
        assert_eq!(format_number(2.5, 2, DecimalSeparator::Dot), "2.50");
        assert_eq!(format_number(2.125, 3, DecimalSeparator::Comma), "2,125");
        assert_eq!(format_number(f64::NAN, 2, DecimalSeparator::Dot), "0");
    }
}
