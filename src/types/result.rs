use crate::types::snapshot::MetricSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Style-alignment points per factor lens. Each factor contributes 0, 10 or
/// 20 points independently of the flag logic table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorBoosts {
    pub value: i32,
    pub momentum: i32,
    pub quality: i32,
    pub growth: i32,
}

impl FactorBoosts {
    pub fn total(&self) -> i32 {
        self.value + self.momentum + self.quality + self.growth
    }

    pub fn entries(&self) -> [(&'static str, i32); 4] {
        [
            ("Value", self.value),
            ("Momentum", self.momentum),
            ("Quality", self.quality),
            ("Growth", self.growth),
        ]
    }
}

/// Size bucket derived from market capitalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapCategory {
    Mega,
    Large,
    Mid,
    Small,
    Micro,
    Nano,
    Unknown,
}

impl CapCategory {
    pub fn from_market_cap(market_cap: Option<f64>) -> Self {
        match market_cap {
            None => CapCategory::Unknown,
            Some(cap) if cap > 200e9 => CapCategory::Mega,
            Some(cap) if cap >= 10e9 => CapCategory::Large,
            Some(cap) if cap >= 2e9 => CapCategory::Mid,
            Some(cap) if cap >= 300e6 => CapCategory::Small,
            Some(cap) if cap >= 50e6 => CapCategory::Micro,
            Some(_) => CapCategory::Nano,
        }
    }
}

impl fmt::Display for CapCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CapCategory::Mega => "Mega",
            CapCategory::Large => "Large",
            CapCategory::Mid => "Mid",
            CapCategory::Small => "Small",
            CapCategory::Micro => "Micro",
            CapCategory::Nano => "Nano",
            CapCategory::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Output of one scoring run for one snapshot. Recomputed on every request;
/// nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    pub base_score: f64,
    pub boost_total: i32,
    pub factor_boosts: FactorBoosts,
    /// Unclamped; a heavily penalized snapshot can score negative.
    pub final_score: f64,
    /// Triggered flags in registry evaluation order.
    pub flags: Vec<String>,
    pub positives: Vec<String>,
    pub risks: Vec<String>,
    pub cap_category: CapCategory,
    pub metrics: MetricSnapshot,
}

impl ScoredResult {
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.iter().any(|flag| flag == name)
    }
}
