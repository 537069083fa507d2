use crate::types::config::ResolvedFlag;
use crate::types::snapshot::{keys, MetricSnapshot};

/// A named multi-metric rule with a signed percentage boost and narrative.
pub struct ConditionDef {
    pub name: &'static str,
    pub default_boost: i32,
    pub predicate: fn(&MetricSnapshot) -> bool,
    pub describe: fn(&MetricSnapshot) -> String,
}

/// Flags whose presence marks a result as risk-laden; the ranking pipeline
/// can exclude these wholesale.
pub const NEGATIVE_FLAGS: [&str; 3] = ["Value Trap", "High-Risk Growth", "Debt Burden"];

static REGISTRY: [ConditionDef; 8] = [
    ConditionDef {
        name: "Undervalued",
        default_boost: 15,
        predicate: |s| s.metric(keys::PE) < 15.0 && s.metric(keys::ROE) > 15.0,
        describe: |s| {
            format!(
                "Undervalued with P/E {:.1} and ROE {:.1}%",
                s.metric(keys::PE),
                s.metric(keys::ROE)
            )
        },
    },
    ConditionDef {
        name: "Strong Balance Sheet",
        default_boost: 10,
        predicate: |s| {
            s.metric(keys::DE) < 1.0 && s.metric(keys::TOTAL_CASH) > s.metric(keys::TOTAL_DEBT)
        },
        describe: |s| {
            format!(
                "Strong balance sheet with D/E {:.1} and cash above debt",
                s.metric(keys::DE)
            )
        },
    },
    ConditionDef {
        name: "Quality Moat",
        default_boost: 15,
        predicate: |s| {
            s.metric(keys::GROSS_MARGIN) > 40.0
                && s.metric(keys::NET_MARGIN) > 15.0
                && s.metric(keys::FCF_EV) > 5.0
        },
        describe: |s| {
            format!(
                "Quality moat with margins {:.1}%/{:.1}% and FCF/EV {:.1}%",
                s.metric(keys::GROSS_MARGIN),
                s.metric(keys::NET_MARGIN),
                s.metric(keys::FCF_EV)
            )
        },
    },
    ConditionDef {
        name: "GARP",
        default_boost: 10,
        predicate: |s| s.metric(keys::PEG) < 1.5 && s.metric(keys::PE) < 20.0,
        describe: |s| {
            format!(
                "Growth at reasonable price with PEG {:.1} and P/E {:.1}",
                s.metric(keys::PEG),
                s.metric(keys::PE)
            )
        },
    },
    ConditionDef {
        name: "High-Risk Growth",
        default_boost: -10,
        predicate: |s| s.metric(keys::PE) > 30.0 && s.metric(keys::PEG) < 1.0,
        describe: |s| {
            format!(
                "Speculative growth with P/E {:.1} and PEG {:.1}",
                s.metric(keys::PE),
                s.metric(keys::PEG)
            )
        },
    },
    ConditionDef {
        name: "Value Trap",
        default_boost: -10,
        predicate: |s| s.metric(keys::PB) < 1.5 && s.metric(keys::ROE) < 5.0,
        describe: |s| {
            format!(
                "Possible value trap with P/B {:.1} and ROE {:.1}%",
                s.metric(keys::PB),
                s.metric(keys::ROE)
            )
        },
    },
    ConditionDef {
        name: "Momentum Building",
        default_boost: 5,
        predicate: |s| {
            s.metric(keys::PRICE) > 0.9 * s.metric(keys::HIGH_52W)
                && s.metric(keys::EBITDA_EV) > 5.0
        },
        describe: |s| {
            format!(
                "Momentum building above 90% of 52-week high with EBITDA/EV {:.1}%",
                s.metric(keys::EBITDA_EV)
            )
        },
    },
    ConditionDef {
        name: "Debt Burden",
        default_boost: -15,
        predicate: |s| s.metric(keys::DE) > 2.0 && s.metric(keys::FCF_EV) < 1.0,
        describe: |s| {
            format!(
                "Debt burden with D/E {:.1} and FCF/EV {:.1}%",
                s.metric(keys::DE),
                s.metric(keys::FCF_EV)
            )
        },
    },
];

pub fn registry() -> &'static [ConditionDef] {
    &REGISTRY
}

pub fn is_known_flag(name: &str) -> bool {
    REGISTRY.iter().any(|def| def.name == name)
}

#[derive(Debug, Clone, Default)]
pub struct ConditionOutcome {
    /// Triggered flags in registry evaluation order.
    pub flags: Vec<String>,
    pub boost_total: i32,
    pub positives: Vec<String>,
    pub risks: Vec<String>,
}

const NEUTRAL_POSITIVE: &str = "Solid fundamentals based on available metrics.";
const NEUTRAL_RISK: &str = "Low risks based on available metrics.";

/// Evaluates the registry against a snapshot. Only flags enabled in the
/// resolved logic table can trigger or contribute their boost. Narrative for
/// a triggered flag lands in `positives` when its configured boost is
/// non-negative, otherwise in `risks`; either list falls back to neutral text
/// when no flag of that polarity fired.
pub fn evaluate(snapshot: &MetricSnapshot, logic: &[ResolvedFlag]) -> ConditionOutcome {
    let mut outcome = ConditionOutcome::default();

    for def in REGISTRY.iter() {
        let flag = logic.iter().find(|entry| entry.name == def.name);
        let (enabled, boost) = match flag {
            Some(entry) => (entry.enabled, entry.boost),
            None => (true, def.default_boost),
        };
        if !enabled || !(def.predicate)(snapshot) {
            continue;
        }
        outcome.flags.push(def.name.to_string());
        outcome.boost_total += boost;
        let narrative = (def.describe)(snapshot);
        if boost >= 0 {
            outcome.positives.push(narrative);
        } else {
            outcome.risks.push(narrative);
        }
    }

    if outcome.positives.is_empty() {
        outcome.positives.push(NEUTRAL_POSITIVE.to_string());
    }
    if outcome.risks.is_empty() {
        outcome.risks.push(NEUTRAL_RISK.to_string());
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::ScoringConfig;
    use crate::types::snapshot::MetricValue;

    fn snapshot_with(entries: &[(&str, f64)]) -> MetricSnapshot {
        MetricSnapshot {
            symbol: "TEST".to_string(),
            name: "Test Co".to_string(),
            sector: None,
            fetched_at: None,
            metrics: entries
                .iter()
                .map(|(key, value)| ((*key).to_string(), MetricValue::Value(*value)))
                .collect(),
        }
    }

    fn default_logic() -> Vec<crate::types::config::ResolvedFlag> {
        ScoringConfig::default().resolve().logic
    }

    #[test]
    fn strong_snapshot_triggers_positive_flags_in_registry_order() {
        let snapshot = snapshot_with(&[
            (keys::PE, 12.0),
            (keys::ROE, 18.0),
            (keys::DE, 0.5),
            (keys::PB, 1.2),
            (keys::PEG, 0.9),
            (keys::GROSS_MARGIN, 45.0),
            (keys::NET_MARGIN, 18.0),
            (keys::FCF_EV, 6.0),
            (keys::EBITDA_EV, 12.0),
            (keys::TOTAL_CASH, 2e9),
            (keys::TOTAL_DEBT, 1e9),
            (keys::MARKET_CAP, 5e9),
            (keys::PRICE, 100.0),
            (keys::HIGH_52W, 105.0),
            (keys::LOW_52W, 60.0),
        ]);

        let outcome = evaluate(&snapshot, &default_logic());
        assert_eq!(
            outcome.flags,
            vec![
                "Undervalued",
                "Strong Balance Sheet",
                "Quality Moat",
                "GARP",
                "Momentum Building",
            ]
        );
        assert_eq!(outcome.boost_total, 15 + 10 + 15 + 10 + 5);
        assert!(outcome
            .positives
            .iter()
            .any(|p| p == "Undervalued with P/E 12.0 and ROE 18.0%"));
        assert_eq!(outcome.risks, vec![NEUTRAL_RISK.to_string()]);
    }

    #[test]
    fn distressed_snapshot_triggers_negative_flags() {
        let snapshot = snapshot_with(&[
            (keys::PE, 50.0),
            (keys::PEG, 0.5),
            (keys::DE, 3.0),
            (keys::FCF_EV, 0.2),
            (keys::ROE, 4.0),
            (keys::PB, 1.0),
        ]);

        let outcome = evaluate(&snapshot, &default_logic());
        assert!(outcome.flags.contains(&"High-Risk Growth".to_string()));
        assert!(outcome.flags.contains(&"Value Trap".to_string()));
        assert!(outcome.flags.contains(&"Debt Burden".to_string()));
        assert_eq!(outcome.boost_total, -35);
        assert_eq!(outcome.risks.len(), 3);
        assert_eq!(outcome.positives, vec![NEUTRAL_POSITIVE.to_string()]);
    }

    #[test]
    fn disabling_every_flag_zeroes_the_boost() {
        let snapshot = snapshot_with(&[(keys::PE, 12.0), (keys::ROE, 18.0)]);
        let logic: Vec<_> = default_logic()
            .into_iter()
            .map(|mut flag| {
                flag.enabled = false;
                flag
            })
            .collect();

        let outcome = evaluate(&snapshot, &logic);
        assert!(outcome.flags.is_empty());
        assert_eq!(outcome.boost_total, 0);
        assert_eq!(outcome.positives, vec![NEUTRAL_POSITIVE.to_string()]);
        assert_eq!(outcome.risks, vec![NEUTRAL_RISK.to_string()]);
    }

    #[test]
    fn all_missing_snapshot_flags_follow_the_zero_default() {
        // Every comparison sees 0.0, so GARP (0 < 1.5, 0 < 20) and Value Trap
        // (0 < 1.5, 0 < 5) both fire and their boosts cancel.
        let outcome = evaluate(&snapshot_with(&[]), &default_logic());
        assert_eq!(outcome.flags, vec!["GARP", "Value Trap"]);
        assert_eq!(outcome.boost_total, 0);
    }

    #[test]
    fn configured_boost_overrides_the_default() {
        let snapshot = snapshot_with(&[(keys::PE, 12.0), (keys::ROE, 18.0)]);
        let logic: Vec<_> = default_logic()
            .into_iter()
            .map(|mut flag| {
                if flag.name == "Undervalued" {
                    flag.boost = 25;
                }
                flag
            })
            .collect();

        let outcome = evaluate(&snapshot, &logic);
        // Undervalued 25 + GARP 10 (PEG missing scores 0 < 1.5, P/E 12 < 20).
        assert_eq!(outcome.boost_total, 35);
    }

    #[test]
    fn registry_knows_exactly_the_fixed_flag_set() {
        assert_eq!(registry().len(), 8);
        assert!(is_known_flag("Undervalued"));
        assert!(is_known_flag("Debt Burden"));
        assert!(!is_known_flag("Moonshot"));
        for negative in NEGATIVE_FLAGS {
            assert!(is_known_flag(negative));
        }
    }
}
