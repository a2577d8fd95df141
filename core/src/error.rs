use thiserror::Error;

/// Alle forventede feil i kjernen. Ingen av disse er fatale; de er vanlige
/// inputtilstander i et interaktivt verktøy og rapporteres som `success=false`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlockError {
    #[error("invalid unit count {0}: must be between 1 and {max}", max = crate::models::MAX_UNITS)]
    InvalidUnitCount(usize),

    #[error("insufficient data: at least {needed} valid weights are required, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("odd weights present: {count} weight(s) are not a multiple of 0.02 kg (first: {first})")]
    OddWeights { count: usize, first: f64 },

    #[error("uniformity is already at target ({current:.1}% with {in_band} of {total} in band)")]
    AlreadyAtTarget {
        current: f64,
        in_band: usize,
        total: usize,
    },

    #[error("weight {value} kg is out of range (max {max} kg)", max = crate::precision::MAX_WEIGHT_KG)]
    WeightOutOfRange { value: f64 },

    #[error("invalid target uniformity {0}: must be in (50, 100]")]
    InvalidTarget(f64),

    #[error(
        "invalid generator parameters: average={average}, range={range} (both must be > 0, average + range at most {max} kg)",
        max = crate::precision::MAX_WEIGHT_KG
    )]
    InvalidGeneratorParams { average: f64, range: f64 },

    #[error("invalid sample count {0}: must be between 1 and {max}", max = crate::models::MAX_UNITS)]
    InvalidCount(usize),

    #[error("no backup available")]
    NoBackup,

    #[error("slot index {index} out of range (unit count {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no weights found in text")]
    NoWeightsFound,
}

impl FlockError {
    /// Stabil maskinlesbar kode (brukes i resultater, metrikker og JSON).
    pub fn code(&self) -> &'static str {
        match self {
            FlockError::InvalidUnitCount(_) => "invalid_unit_count",
            FlockError::InsufficientData { .. } => "insufficient_data",
            FlockError::OddWeights { .. } => "odd_weights",
            FlockError::AlreadyAtTarget { .. } => "already_at_target",
            FlockError::WeightOutOfRange { .. } => "weight_out_of_range",
            FlockError::InvalidTarget(_) => "invalid_target",
            FlockError::InvalidGeneratorParams { .. } => "invalid_generator_params",
            FlockError::InvalidCount(_) => "invalid_count",
            FlockError::NoBackup => "no_backup",
            FlockError::IndexOutOfRange { .. } => "index_out_of_range",
            FlockError::NoWeightsFound => "no_weights_found",
        }
    }
}

pub type FlockResult<T> = Result<T, FlockError>;
