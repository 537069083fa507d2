pub mod conditions;
pub mod factors;
pub mod metrics;

use crate::types::config::ResolvedConfig;
use crate::types::result::{CapCategory, ScoredResult};
use crate::types::snapshot::{keys, MetricSnapshot};

/// Scores one snapshot under one resolved configuration. Pure: identical
/// inputs always produce an identical result, so batches can be mapped in
/// any order or in parallel without coordination.
pub fn score_snapshot(snapshot: &MetricSnapshot, config: &ResolvedConfig) -> ScoredResult {
    let weights = config.normalized_weights(snapshot);
    let base_score: f64 = weights
        .iter()
        .map(|(metric, weight)| metrics::metric_score(snapshot, metric, config.score_mode) * weight)
        .sum::<f64>()
        * 10.0;

    let outcome = conditions::evaluate(snapshot, &config.logic);
    let factor_boosts = factors::evaluate(snapshot);

    // Unclamped on purpose: heavy penalties may push this negative, and no
    // ceiling is applied when boosts stack.
    let final_score = base_score + base_score * f64::from(outcome.boost_total) / 100.0
        + f64::from(factor_boosts.total());

    ScoredResult {
        base_score,
        boost_total: outcome.boost_total,
        factor_boosts,
        final_score,
        flags: outcome.flags,
        positives: outcome.positives,
        risks: outcome.risks,
        cap_category: CapCategory::from_market_cap(snapshot.raw_metric(keys::MARKET_CAP)),
        metrics: snapshot.clone(),
    }
}

/// Scores a batch. The only synchronization point downstream is the ranking
/// sort, which needs the complete collection.
pub fn score_batch(snapshots: &[MetricSnapshot], config: &ResolvedConfig) -> Vec<ScoredResult> {
    tracing::debug!(count = snapshots.len(), "scoring snapshot batch");
    snapshots
        .iter()
        .map(|snapshot| score_snapshot(snapshot, config))
        .collect()
}
