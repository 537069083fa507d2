use crate::error::{Result, ScreenError};
use crate::types::config::ScoringConfig;
use crate::types::snapshot::keys;
use std::collections::HashMap;
use std::path::Path;

pub const PRESET_NAMES: [&str; 5] = ["overall", "value", "growth", "momentum", "quality"];

fn tilted(entries: &[(&str, f64)]) -> ScoringConfig {
    ScoringConfig {
        metrics: entries.iter().map(|(name, _)| (*name).to_string()).collect(),
        weights: entries
            .iter()
            .map(|(name, weight)| ((*name).to_string(), *weight))
            .collect::<HashMap<_, _>>(),
        ..ScoringConfig::default()
    }
}

/// Built-in configurations. `overall` is the default weight table; the style
/// presets re-tilt weights toward their factor's metrics and keep the full
/// logic table enabled.
pub fn preset(name: &str) -> Result<ScoringConfig> {
    match name.to_lowercase().as_str() {
        "overall" => Ok(ScoringConfig::default()),
        "value" => Ok(tilted(&[
            (keys::PE, 0.25),
            (keys::PB, 0.25),
            (keys::ROE, 0.20),
            (keys::PEG, 0.10),
            (keys::GROSS_MARGIN, 0.10),
            (keys::FCF_EV, 0.10),
        ])),
        "growth" => Ok(tilted(&[
            (keys::PEG, 0.30),
            (keys::PE, 0.15),
            (keys::ROE, 0.15),
            (keys::GROSS_MARGIN, 0.15),
            (keys::NET_MARGIN, 0.15),
            (keys::EBITDA_EV, 0.10),
        ])),
        "momentum" => Ok(tilted(&[
            (keys::EBITDA_EV, 0.30),
            (keys::FCF_EV, 0.20),
            (keys::BALANCE, 0.20),
            (keys::ROE, 0.15),
            (keys::PE, 0.15),
        ])),
        "quality" => Ok(tilted(&[
            (keys::ROE, 0.25),
            (keys::GROSS_MARGIN, 0.20),
            (keys::NET_MARGIN, 0.20),
            (keys::DE, 0.20),
            (keys::FCF_EV, 0.15),
        ])),
        other => Err(ScreenError::UnknownPreset(format!(
            "{other} (expected one of: {})",
            PRESET_NAMES.join(", ")
        ))),
    }
}

/// Loads and validates a TOML scoring config from disk.
pub fn load_config(path: &Path) -> Result<ScoringConfig> {
    if !path.exists() {
        return Err(ScreenError::ConfigNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let config: ScoringConfig = toml::from_str(&content)
        .map_err(|e| ScreenError::ConfigParse(format!("{}: {}", path.display(), e)))?;
    config.validate()?;
    tracing::debug!(path = %path.display(), metrics = config.metrics.len(), "loaded scoring config");
    Ok(config)
}

/// One scoring config per request: an explicit file wins, then a preset,
/// then the defaults.
pub fn resolve_request(
    config_path: Option<&Path>,
    preset_name: Option<&str>,
) -> Result<ScoringConfig> {
    match (config_path, preset_name) {
        (Some(path), _) => load_config(path),
        (None, Some(name)) => preset(name),
        (None, None) => Ok(ScoringConfig::default()),
    }
}
