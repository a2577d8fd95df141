use std::path::Path;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::precision::SUM_TOLERANCE_KG;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Maks iterasjoner i søket etter riktig antall i båndet.
    pub max_iterations: usize,
    /// Maks gjennomganger i sum-rebalanseringen.
    pub rebalance_passes: usize,
    pub tolerance_kg: f64,
    /// Hvor langt utenfor båndet en prøve skyves når uniformiteten skal ned.
    pub exclusion_offset_kg: f64,
    /// Stokk verdiene før de skrives tilbake i rutene.
    pub shuffle_on_write: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            rebalance_passes: 500,
            tolerance_kg: SUM_TOLERANCE_KG,
            exclusion_offset_kg: 0.04,
            shuffle_on_write: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub max_correction_passes: usize,
    /// Ekstra spredning (andel av ønsket range) trukket tilfeldig i [0, jitter].
    pub spread_jitter: f64,
    pub tolerance_kg: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_correction_passes: 2000,
            spread_jitter: 0.10,
            tolerance_kg: SUM_TOLERANCE_KG,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub optimizer: OptimizerConfig,
    pub generator: GeneratorConfig,
    /// Fast seed gir reproduserbare kjøringer.
    pub seed: Option<u64>,
}

impl CoreConfig {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Leser konfig fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-konfig.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<CoreConfig> {
    let path = path.as_ref();
    if !path.exists() {
        log::warn!(
            "config not found at {}, using defaults",
            path.display()
        );
        return Ok(CoreConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let mut de = serde_json::Deserializer::from_str(&contents);
    let cfg: CoreConfig = serde_path_to_error::deserialize(&mut de)
        .with_context(|| format!("parsing config {}", path.display()))?;

    log::info!(
        "config loaded from {} (seed={:?}, shuffle_on_write={})",
        path.display(),
        cfg.seed,
        cfg.optimizer.shuffle_on_write
    );
    Ok(cfg)
}

/// Lagrer konfig til disk som JSON (pretty-print).
pub fn save_config(cfg: &CoreConfig, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path, json).with_context(|| format!("writing config {}", path.display()))?;
    log::info!("config saved to {}", path.display());
    Ok(())
}
