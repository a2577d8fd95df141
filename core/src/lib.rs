pub mod backup;
pub mod band;
pub mod config;
pub mod error;
pub mod generator;
pub mod json_api;
pub mod metrics;
pub mod models;
pub mod optimizer;
pub mod precision;
pub mod session;
pub mod stats;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use backup::{Backup, BackupSlot};
pub use band::{classify, Band, Classification, BAND_FRACTION};
pub use config::{load_config, save_config, CoreConfig, GeneratorConfig, OptimizerConfig};
pub use error::{FlockError, FlockResult};
pub use generator::generate_weights;
pub use models::{WeightSet, WeightSlot, MAX_UNITS};
pub use optimizer::optimize_uniformity;
pub use precision::{is_parity_valid, round_to_parity, DecimalSeparator};
pub use session::FlockSession;
pub use stats::analyze;
pub use types::{AnalysisResult, OptimizationResult};
