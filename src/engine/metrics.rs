use crate::types::config::ScoreMode;
use crate::types::snapshot::{keys, MetricSnapshot};

/// Discrete 0-10 tier score for a single metric value. Polarity is fixed per
/// metric: valuation ratios (P/E, D/E, P/B, PEG) score higher when lower,
/// profitability and cash-yield metrics score higher when higher.
pub fn tier_score(metric: &str, value: f64) -> f64 {
    let score = match metric {
        keys::PE => {
            if value < 15.0 {
                10
            } else if value < 20.0 {
                7
            } else if value < 30.0 {
                5
            } else if value < 40.0 {
                2
            } else {
                0
            }
        }
        keys::ROE => {
            if value > 15.0 {
                10
            } else if value >= 10.0 {
                7
            } else if value >= 5.0 {
                5
            } else {
                0
            }
        }
        keys::DE => {
            if value < 1.0 {
                10
            } else if value < 1.5 {
                7
            } else if value < 2.0 {
                5
            } else {
                0
            }
        }
        keys::PB => {
            if value < 1.5 {
                10
            } else if value < 2.5 {
                7
            } else if value < 4.0 {
                5
            } else {
                0
            }
        }
        keys::PEG => {
            if value < 1.0 {
                10
            } else if value < 1.5 {
                7
            } else if value < 2.0 {
                5
            } else {
                0
            }
        }
        keys::GROSS_MARGIN => {
            if value > 40.0 {
                10
            } else if value >= 30.0 {
                7
            } else if value >= 20.0 {
                5
            } else {
                0
            }
        }
        keys::NET_MARGIN => {
            if value > 15.0 {
                10
            } else if value >= 10.0 {
                7
            } else if value >= 5.0 {
                5
            } else {
                0
            }
        }
        keys::FCF_EV => {
            if value > 5.0 {
                10
            } else if value >= 3.0 {
                7
            } else if value >= 1.0 {
                5
            } else {
                0
            }
        }
        keys::EBITDA_EV => {
            if value > 10.0 {
                10
            } else if value >= 5.0 {
                7
            } else if value >= 2.0 {
                5
            } else {
                0
            }
        }
        _ => 0,
    };
    f64::from(score)
}

// (metric, value scoring 10, value scoring 0) for the linear variant. The
// bounds are the outermost tier thresholds of the discrete table.
const LINEAR_BOUNDS: [(&str, f64, f64); 9] = [
    (keys::PE, 15.0, 40.0),
    (keys::ROE, 15.0, 0.0),
    (keys::DE, 1.0, 2.0),
    (keys::PB, 1.5, 4.0),
    (keys::PEG, 1.0, 2.0),
    (keys::GROSS_MARGIN, 40.0, 20.0),
    (keys::NET_MARGIN, 15.0, 5.0),
    (keys::FCF_EV, 5.0, 1.0),
    (keys::EBITDA_EV, 10.0, 2.0),
];

/// Continuous alternative to the tier table: linear between each metric's
/// 10-point and 0-point bounds, clamped to [0, 10]. Covers both polarities
/// because the interpolation runs from the 0-bound toward the 10-bound.
pub fn linear_score(metric: &str, value: f64) -> f64 {
    match LINEAR_BOUNDS.iter().find(|(key, _, _)| *key == metric) {
        Some((_, best, worst)) => (((worst - value) / (worst - best)) * 10.0).clamp(0.0, 10.0),
        None => tier_score(metric, value),
    }
}

/// Composite liquidity/momentum score. Not a scalar threshold, so it stays
/// discrete in both score modes.
pub fn balance_score(snapshot: &MetricSnapshot) -> f64 {
    let cash = snapshot.metric(keys::TOTAL_CASH);
    let debt = snapshot.metric(keys::TOTAL_DEBT);
    let market_cap = snapshot.metric(keys::MARKET_CAP);
    let price = snapshot.metric(keys::PRICE);
    let high = snapshot.metric(keys::HIGH_52W);
    let low = snapshot.metric(keys::LOW_52W);

    if cash > 0.2 * market_cap || price > 0.8 * high {
        10.0
    } else if debt > market_cap || price < 1.1 * low {
        0.0
    } else {
        5.0
    }
}

/// Scores one selected metric against a snapshot under the configured mode.
pub fn metric_score(snapshot: &MetricSnapshot, metric: &str, mode: ScoreMode) -> f64 {
    if metric == keys::BALANCE {
        return balance_score(snapshot);
    }
    let value = snapshot.metric(metric);
    match mode {
        ScoreMode::DiscreteTier => tier_score(metric, value),
        ScoreMode::LinearNormalize => linear_score(metric, value),
    }
}
