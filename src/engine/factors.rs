use crate::types::result::FactorBoosts;
use crate::types::snapshot::{keys, MetricSnapshot};

/// A style-alignment lens: a strong tier worth 20 points and a partial tier
/// worth 10. Factors are always evaluated; the flag logic table does not
/// apply to them.
pub struct FactorDef {
    pub name: &'static str,
    pub strong: fn(&MetricSnapshot) -> bool,
    pub partial: fn(&MetricSnapshot) -> bool,
}

// Predicates compare the raw 0-default for absent metrics, same as the flag
// registry. A missing price multiple therefore reads as cheap; observable in
// the returned factor points rather than special-cased away.
static REGISTRY: [FactorDef; 4] = [
    FactorDef {
        name: "Value",
        strong: |s| {
            s.metric(keys::P_FCF) < 15.0
                || (s.metric(keys::PB) < 1.5 && s.metric(keys::ROE) > 15.0)
        },
        partial: |s| s.metric(keys::P_FCF) < 20.0,
    },
    FactorDef {
        name: "Momentum",
        strong: |s| {
            let rsi = s.metric(keys::RSI);
            s.metric(keys::PRICE) > 0.9 * s.metric(keys::HIGH_52W)
                && rsi > 50.0
                && rsi < 70.0
                && s.metric(keys::AVG_VOLUME) > 1e6
                && s.metric(keys::ROE) > 15.0
        },
        partial: |s| s.metric(keys::PRICE) > 0.8 * s.metric(keys::HIGH_52W),
    },
    FactorDef {
        name: "Quality",
        strong: |s| {
            s.metric(keys::ROE) > 20.0
                && s.metric(keys::DE) < 1.0
                && s.metric(keys::GROSS_MARGIN) > 40.0
                && s.metric(keys::DIVIDEND_YIELD) > 2.0
                && s.metric(keys::BETA) < 1.0
        },
        partial: |s| s.metric(keys::ROE) > 15.0 && s.metric(keys::DE) < 1.5,
    },
    FactorDef {
        name: "Growth",
        strong: |s| {
            s.metric(keys::PEG) < 1.5
                && s.metric(keys::REVENUE_GROWTH) > 10.0
                && s.metric(keys::EARNINGS_GROWTH) > 10.0
                && s.metric(keys::FORWARD_PE) < 25.0
                && s.metric(keys::DE) < 1.0
        },
        partial: |s| s.metric(keys::PEG) < 2.0,
    },
];

fn points(def: &FactorDef, snapshot: &MetricSnapshot) -> i32 {
    if (def.strong)(snapshot) {
        20
    } else if (def.partial)(snapshot) {
        10
    } else {
        0
    }
}

/// Scores all four lenses against a snapshot.
pub fn evaluate(snapshot: &MetricSnapshot) -> FactorBoosts {
    let mut boosts = FactorBoosts::default();
    for def in &REGISTRY {
        let points = points(def, snapshot);
        match def.name {
            "Value" => boosts.value = points,
            "Momentum" => boosts.momentum = points,
            "Quality" => boosts.quality = points,
            "Growth" => boosts.growth = points,
            _ => {}
        }
    }
    boosts
}
