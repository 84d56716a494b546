// Configuration loading and parsing (weights.toml).
//
// The engine's only tunable is the four-factors weight vector. Everything
// else (the 0.44 free-throw coefficient, metric scales) is part of the
// formulas' contracts and deliberately not configurable.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Four-factors weights
// ---------------------------------------------------------------------------

/// Weights for Dean Oliver's four-factors composite, in his canonical order
/// of importance: shooting, turnovers, rebounding, free throws.
///
/// The documented default is Oliver's (0.40, 0.25, 0.20, 0.15). Custom
/// weights should sum to 1.0 so composite scores stay comparable.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FourFactorsWeights {
    pub shooting: f64,
    pub turnovers: f64,
    pub rebounding: f64,
    pub free_throws: f64,
}

impl Default for FourFactorsWeights {
    fn default() -> Self {
        Self {
            shooting: 0.40,
            turnovers: 0.25,
            rebounding: 0.20,
            free_throws: 0.15,
        }
    }
}

/// Wrapper for the top-level `[four_factors]` table in weights.toml.
#[derive(Debug, Clone, Deserialize)]
struct WeightsFile {
    four_factors: FourFactorsWeights,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load four-factors weights from a TOML file and validate them.
pub fn load_weights(path: &Path) -> Result<FourFactorsWeights, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    let file: WeightsFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&file.four_factors)?;
    Ok(file.four_factors)
}

/// Load weights from `path` if the file exists, otherwise fall back to the
/// documented default.
pub fn load_weights_or_default(path: &Path) -> Result<FourFactorsWeights, ConfigError> {
    if path.exists() {
        load_weights(path)
    } else {
        Ok(FourFactorsWeights::default())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Tolerance for the weight-sum check; generous enough for hand-written TOML.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

fn validate(weights: &FourFactorsWeights) -> Result<(), ConfigError> {
    let fields: &[(&str, f64)] = &[
        ("four_factors.shooting", weights.shooting),
        ("four_factors.turnovers", weights.turnovers),
        ("four_factors.rebounding", weights.rebounding),
        ("four_factors.free_throws", weights.free_throws),
    ];
    for (name, val) in fields {
        if *val < 0.0 || !val.is_finite() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be a non-negative finite number, got {val}"),
            });
        }
    }

    let sum = weights.shooting + weights.turnovers + weights.rebounding + weights.free_throws;
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::ValidationError {
            field: "four_factors".into(),
            message: format!("weights must sum to 1.0, got {sum}"),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
