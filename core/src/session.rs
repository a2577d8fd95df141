use rand::rngs::StdRng;
use rand::Rng;

use crate::backup::BackupSlot;
use crate::config::CoreConfig;
use crate::error::FlockResult;
use crate::generator::generate_with_bounds;
use crate::metrics;
use crate::models::{WeightSet, WeightSlot};
use crate::optimizer::optimize_uniformity;
use crate::stats::analyze;
use crate::types::{AnalysisResult, OptimizationResult};

/// Tilstanden kalleren holder for ett veiesett: vektene, en eventuell
/// backup, konfig og tilfeldighetskilden.
#[derive(Debug, Clone)]
pub struct FlockSession<R: Rng = StdRng> {
    weights: WeightSet,
    backup: BackupSlot,
    config: CoreConfig,
    rng: R,
}

impl FlockSession<StdRng> {
    pub fn new(unit_count: usize) -> FlockResult<Self> {
        Self::with_config(unit_count, CoreConfig::default())
    }

    pub fn with_config(unit_count: usize, config: CoreConfig) -> FlockResult<Self> {
        let rng = config.rng();
        Ok(Self::with_rng(WeightSet::new(unit_count)?, config, rng))
    }
}

impl<R: Rng> FlockSession<R> {
    pub fn with_rng(weights: WeightSet, config: CoreConfig, rng: R) -> Self {
        Self {
            weights,
            backup: BackupSlot::new(),
            config,
            rng,
        }
    }

    pub fn weights(&self) -> &WeightSet {
        &self.weights
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn backup(&self) -> &BackupSlot {
        &self.backup
    }

    pub fn has_backup(&self) -> bool {
        self.backup.is_present()
    }

    pub fn set_weight(&mut self, index: usize, slot: WeightSlot) -> FlockResult<()> {
        self.weights.set(index, slot)
    }

    pub fn resize(&mut self, unit_count: usize) -> FlockResult<()> {
        self.weights.resize(unit_count)
    }

    /// Bytter til et annet registrert sett. Ventende backup gjelder ikke lenger.
    pub fn load(&mut self, weights: WeightSet) {
        self.backup.clear();
        self.weights = weights;
    }

    /// Tømmer tabellen og eventuell backup.
    pub fn clear(&mut self) {
        self.backup.clear();
        self.weights.clear();
    }

    pub fn analyze(&self) -> Option<AnalysisResult> {
        analyze(&self.weights)
    }

    pub fn optimize(&mut self, target_uniformity_percent: f64) -> OptimizationResult {
        let before = (!self.backup.is_present()).then(|| self.weights.clone());
        let result = optimize_uniformity(
            &mut self.weights,
            target_uniformity_percent,
            &self.config.optimizer,
            &mut self.rng,
        );
        if result.success {
            if let Some(before) = before {
                self.backup.snapshot(&before);
            }
        }
        result
    }

    /// Fyller hele settet (alle ruter) med syntetiske vekter.
    pub fn generate(&mut self, target_average: f64, target_range: f64) -> OptimizationResult {
        let count = self.weights.unit_count();
        match generate_with_bounds(
            target_average,
            target_range,
            count,
            &self.config.generator,
            &mut self.rng,
        ) {
            Ok((generated, bounds)) => {
                metrics::generator_run("ok");
                self.backup.snapshot(&self.weights);
                self.weights = generated;
                let uniformity = self.analyze().map(|a| a.uniformity).unwrap_or(0.0);
                OptimizationResult::ok(format!(
                    "{count} weights generated in [{:.2}, {:.2}] kg",
                    bounds.min, bounds.max
                ))
                .with_adjusted(count, uniformity)
            }
            Err(e) => {
                metrics::generator_run(e.code());
                OptimizationResult::failure(&e)
            }
        }
    }

    pub fn restore(&mut self) -> OptimizationResult {
        match self.backup.restore(&mut self.weights) {
            Ok(()) => OptimizationResult::ok("weights restored from backup"),
            Err(e) => OptimizationResult::failure(&e),
        }
    }

    /// Forkaster backupen. Kalleren må ha bekreftet med brukeren.
    pub fn discard(&mut self) -> OptimizationResult {
        match self.backup.discard() {
            Ok(()) => OptimizationResult::ok("backup discarded"),
            Err(e) => OptimizationResult::failure(&e),
        }
    }

    pub fn into_weights(self) -> WeightSet {
        self.weights
    }
}
