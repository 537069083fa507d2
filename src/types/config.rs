use crate::engine::conditions;
use crate::error::ScreenError;
use crate::types::snapshot::{keys, MetricSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Metric names the scorer knows how to grade.
pub const SCORABLE_METRICS: [&str; 10] = [
    keys::PE,
    keys::ROE,
    keys::DE,
    keys::PB,
    keys::PEG,
    keys::GROSS_MARGIN,
    keys::NET_MARGIN,
    keys::FCF_EV,
    keys::EBITDA_EV,
    keys::BALANCE,
];

const DEFAULT_WEIGHTS: [(&str, f64); 8] = [
    (keys::PE, 0.20),
    (keys::ROE, 0.20),
    (keys::PB, 0.10),
    (keys::PEG, 0.15),
    (keys::GROSS_MARGIN, 0.10),
    (keys::NET_MARGIN, 0.10),
    (keys::FCF_EV, 0.10),
    (keys::EBITDA_EV, 0.05),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreMode {
    #[default]
    DiscreteTier,
    LinearNormalize,
}

/// Policy for metrics absent from a snapshot when computing the base score.
///
/// `TreatAsZero` keeps the absent metric in the weighted sum with a 0 score
/// (worst case, matches the historical behavior). `ExcludeMetric` drops it
/// from the selected subset before weight normalization. Condition and factor
/// predicates always observe the 0-default regardless of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPolicy {
    #[default]
    TreatAsZero,
    ExcludeMetric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicEntry {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub boost: i32,
}

fn default_enabled() -> bool {
    true
}

/// Caller-supplied scoring configuration. Never mutated by the engine;
/// `resolve()` produces the normalized view a scoring run actually uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,
    #[serde(default = "default_weight_map")]
    pub weights: HashMap<String, f64>,
    #[serde(default)]
    pub logic: HashMap<String, LogicEntry>,
    #[serde(default)]
    pub score_mode: ScoreMode,
    #[serde(default)]
    pub missing_policy: MissingPolicy,
}

fn default_metrics() -> Vec<String> {
    DEFAULT_WEIGHTS
        .iter()
        .map(|(name, _)| (*name).to_string())
        .collect()
}

fn default_weight_map() -> HashMap<String, f64> {
    DEFAULT_WEIGHTS
        .iter()
        .map(|(name, weight)| ((*name).to_string(), *weight))
        .collect()
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            metrics: default_metrics(),
            weights: default_weight_map(),
            logic: HashMap::new(),
            score_mode: ScoreMode::default(),
            missing_policy: MissingPolicy::default(),
        }
    }
}

impl ScoringConfig {
    /// Caller-boundary validation. The engine itself stays total on any
    /// numeric input; this rejects configs that name metrics or flags the
    /// registries do not know, so typos surface as errors instead of silently
    /// scoring zero.
    pub fn validate(&self) -> Result<(), ScreenError> {
        if self.metrics.is_empty() {
            return Err(ScreenError::ConfigParse(
                "metrics must name at least one metric".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for metric in &self.metrics {
            if !SCORABLE_METRICS.contains(&metric.as_str()) {
                return Err(ScreenError::ConfigParse(format!(
                    "unknown metric in metrics list: {metric}"
                )));
            }
            if !seen.insert(metric.as_str()) {
                return Err(ScreenError::ConfigParse(format!(
                    "metrics list contains duplicate: {metric}"
                )));
            }
        }

        for (metric, weight) in &self.weights {
            if !SCORABLE_METRICS.contains(&metric.as_str()) {
                return Err(ScreenError::ConfigParse(format!(
                    "weights contains unknown metric: {metric}"
                )));
            }
            if !weight.is_finite() || *weight < 0.0 {
                return Err(ScreenError::ConfigParse(format!(
                    "weight for {metric} must be a non-negative finite number"
                )));
            }
        }

        for flag in self.logic.keys() {
            if !conditions::is_known_flag(flag) {
                return Err(ScreenError::ConfigParse(format!(
                    "logic contains unknown flag: {flag}"
                )));
            }
        }

        Ok(())
    }

    /// Builds the resolved view: raw weights paired with the selected subset
    /// and the logic table merged over the condition registry defaults, in
    /// registry order.
    pub fn resolve(&self) -> ResolvedConfig {
        let selected = self
            .metrics
            .iter()
            .map(|metric| {
                let weight = self.weights.get(metric).copied().unwrap_or(0.0);
                (metric.clone(), weight)
            })
            .collect();

        let logic = conditions::registry()
            .iter()
            .map(|def| {
                let entry = self.logic.get(def.name);
                ResolvedFlag {
                    name: def.name,
                    enabled: entry.map(|e| e.enabled).unwrap_or(true),
                    boost: entry.map(|e| e.boost).unwrap_or(def.default_boost),
                }
            })
            .collect();

        ResolvedConfig {
            selected,
            logic,
            score_mode: self.score_mode,
            missing_policy: self.missing_policy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFlag {
    pub name: &'static str,
    pub enabled: bool,
    pub boost: i32,
}

/// One scoring run's view of the configuration: selected metrics with raw
/// weights, the full logic table in registry order, and the mode switches.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub selected: Vec<(String, f64)>,
    pub logic: Vec<ResolvedFlag>,
    pub score_mode: ScoreMode,
    pub missing_policy: MissingPolicy,
}

impl ResolvedConfig {
    /// Normalized weight per participating metric. A zero weight sum yields
    /// all-zero weights (and therefore a zero base score), not an error.
    /// Under `ExcludeMetric`, metrics absent from the snapshot drop out
    /// before normalization; the Balance composite is always computable and
    /// never drops out.
    pub fn normalized_weights(&self, snapshot: &MetricSnapshot) -> Vec<(&str, f64)> {
        let participating: Vec<(&str, f64)> = self
            .selected
            .iter()
            .filter(|(metric, _)| match self.missing_policy {
                MissingPolicy::TreatAsZero => true,
                MissingPolicy::ExcludeMetric => {
                    metric == keys::BALANCE || snapshot.has_metric(metric)
                }
            })
            .map(|(metric, weight)| (metric.as_str(), *weight))
            .collect();

        let sum: f64 = participating.iter().map(|(_, weight)| weight).sum();
        participating
            .into_iter()
            .map(|(metric, weight)| {
                let normalized = if sum > 0.0 { weight / sum } else { 0.0 };
                (metric, normalized)
            })
            .collect()
    }
}
