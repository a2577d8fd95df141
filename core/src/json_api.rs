// core/src/json_api.rs
// JSON inn → kjerne → JSON ut. Brukes av Python-bindingene og andre
// klienter som snakker streng. Feil i parsing rapporteres med sti.
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use serde_path_to_error as spte;

use crate::config::{GeneratorConfig, OptimizerConfig};
use crate::generator::generate_weights;
use crate::models::WeightSet;
use crate::optimizer::optimize_uniformity;
use crate::stats::analyze;
use crate::types::OptimizationResult;

#[derive(Debug, Deserialize)]
struct AnalyzeIn {
    weights: WeightSet,
}

#[derive(Debug, Deserialize)]
struct OptimizeIn {
    weights: WeightSet,
    #[serde(alias = "target", alias = "targetUniformity")]
    target_uniformity: f64,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    config: Option<OptimizerConfig>,
}

#[derive(Debug, Deserialize)]
struct GenerateIn {
    #[serde(alias = "targetAverage")]
    target_average: f64,
    #[serde(alias = "targetRange")]
    target_range: f64,
    count: usize,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    config: Option<GeneratorConfig>,
}

fn parse<T: DeserializeOwned>(json_in: &str, what: &str) -> Result<T, String> {
    let mut de = serde_json::Deserializer::from_str(json_in);
    spte::deserialize(&mut de).map_err(|e| format!("parse error ({what}) at {}: {}", e.path(), e))
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn to_string(v: Value) -> Result<String, String> {
    serde_json::to_string(&v).map_err(|e| e.to_string())
}

/// `{"weights": [...]}` → `{"analysis": {...} | null}`
pub fn analyze_json(json_in: &str) -> Result<String, String> {
    let parsed: AnalyzeIn = parse(json_in, "AnalyzeIn")?;
    to_string(json!({ "analysis": analyze(&parsed.weights) }))
}

/// `{"weights": [...], "target_uniformity": 80, "seed"?, "config"?}`
/// → `{"result": {...}, "weights": [...], "analysis": {...}}`
pub fn optimize_json(json_in: &str) -> Result<String, String> {
    let parsed: OptimizeIn = parse(json_in, "OptimizeIn")?;
    let mut weights = parsed.weights;
    let cfg = parsed.config.unwrap_or_default();
    let mut rng = rng_for(parsed.seed);

    let result = optimize_uniformity(&mut weights, parsed.target_uniformity, &cfg, &mut rng);
    let analysis = analyze(&weights);
    to_string(json!({
        "result": result,
        "weights": weights,
        "analysis": analysis,
    }))
}

/// `{"target_average": 2.5, "target_range": 0.4, "count": 60, "seed"?, "config"?}`
/// → `{"result": {...}, "weights": [...] | null, "analysis": {...} | null}`
pub fn generate_json(json_in: &str) -> Result<String, String> {
    let parsed: GenerateIn = parse(json_in, "GenerateIn")?;
    let cfg = parsed.config.unwrap_or_default();
    let mut rng = rng_for(parsed.seed);

    let out = match generate_weights(
        parsed.target_average,
        parsed.target_range,
        parsed.count,
        &cfg,
        &mut rng,
    ) {
        Ok(weights) => {
            let analysis = analyze(&weights);
            let result = OptimizationResult::ok(format!("{} weights generated", parsed.count));
            json!({ "result": result, "weights": weights, "analysis": analysis })
        }
        Err(e) => json!({
            "result": OptimizationResult::failure(&e),
            "weights": Value::Null,
            "analysis": Value::Null,
        }),
    };
    to_string(out)
}
