use super::{format_large_metric, format_metric};
use crate::types::result::ScoredResult;
use crate::types::snapshot::keys;

/// Ranked screen as a markdown document: the results table, the per-factor
/// sub-lists, and the review warnings.
pub fn to_markdown(results: &[ScoredResult]) -> String {
    let mut output = String::new();
    output.push_str("#### Ranked Top Stocks\n\n");

    if results.is_empty() {
        output.push_str("No stocks matched the selected filters.\n");
        return output;
    }

    if let Some(newest) = results.iter().filter_map(|r| r.metrics.fetched_at).max() {
        output.push_str(&format!(
            "_Data as of {}_\n\n",
            newest.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    output.push_str(
        "| # | Company (Ticker) | Score | Cap | Price | 52W High/Low | MC | EV | P/E | ROE % | P/B | PEG | D/E | Flags | Positives | Risks |\n",
    );
    output.push_str(
        "|---|------------------|-------|-----|-------|--------------|----|----|-----|-------|-----|-----|-----|-------|-----------|-------|\n",
    );
    for (rank, result) in results.iter().enumerate() {
        let m = &result.metrics;
        output.push_str(&format!(
            "| {} | {} ({}) | {:.2} | {} | {} | {} / {} | {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
            rank + 1,
            m.name,
            m.symbol,
            result.final_score,
            result.cap_category,
            format_metric(m, keys::PRICE),
            format_metric(m, keys::HIGH_52W),
            format_metric(m, keys::LOW_52W),
            format_large_metric(m, keys::MARKET_CAP),
            format_large_metric(m, keys::ENTERPRISE_VALUE),
            format_metric(m, keys::PE),
            format_metric(m, keys::ROE),
            format_metric(m, keys::PB),
            format_metric(m, keys::PEG),
            format_metric(m, keys::DE),
            result.flags.join(", "),
            result.positives.join("; "),
            result.risks.join("; "),
        ));
    }
    output.push('\n');

    output.push_str(&factor_sublists(results, 5));
    output.push_str(&warnings(results));
    output
}

/// Top entities per factor lens, skipping zero-point entries.
pub fn factor_sublists(results: &[ScoredResult], top: usize) -> String {
    let mut output = String::new();
    output.push_str("#### Factor Sub-Lists\n\n");
    let lenses: [(&str, fn(&crate::types::result::FactorBoosts) -> i32); 4] = [
        ("Value", |b| b.value),
        ("Momentum", |b| b.momentum),
        ("Quality", |b| b.quality),
        ("Growth", |b| b.growth),
    ];
    for (factor, points_of) in lenses {
        output.push_str(&format!("**{factor}**:\n"));
        let mut by_factor: Vec<&ScoredResult> = results.iter().collect();
        by_factor.sort_by_key(|result| std::cmp::Reverse(points_of(&result.factor_boosts)));
        let mut any = false;
        for result in by_factor.into_iter().take(top) {
            let points = points_of(&result.factor_boosts);
            if points == 0 {
                break;
            }
            any = true;
            output.push_str(&format!(
                "- {} ({}): {} points\n",
                result.metrics.name, result.metrics.symbol, points
            ));
        }
        if !any {
            output.push_str("- none\n");
        }
        output.push('\n');
    }
    output
}

fn warnings(results: &[ScoredResult]) -> String {
    let high_pe: Vec<&str> = results
        .iter()
        .filter(|result| result.metrics.metric(keys::PE) > 30.0)
        .map(|result| result.metrics.symbol.as_str())
        .collect();

    let mut output = String::new();
    output.push_str("**Warnings**:\n");
    output.push_str(&format!(
        "- High P/E stocks needing review: {}.\n",
        if high_pe.is_empty() {
            "None".to_string()
        } else {
            high_pe.join(", ")
        }
    ));
    output.push_str("- Monitor debt burdens and market volatility.\n");
    output
}

/// Single-symbol detail view.
pub fn to_detail(result: &ScoredResult) -> String {
    let m = &result.metrics;
    let mut output = String::new();
    output.push_str(&format!("# {} ({})\n\n", m.name, m.symbol));
    output.push_str(&format!("- Sector: {}\n", m.sector_name()));
    output.push_str(&format!("- Cap category: {}\n", result.cap_category));
    output.push_str(&format!("- Base score: {:.2}\n", result.base_score));
    output.push_str(&format!("- Flag boost: {}%\n", result.boost_total));
    output.push_str(&format!(
        "- Factor points: {}\n",
        result.factor_boosts.total()
    ));
    output.push_str(&format!("- Final score: {:.2}\n\n", result.final_score));

    output.push_str("## Flags\n\n");
    if result.flags.is_empty() {
        output.push_str("- none\n");
    } else {
        for flag in &result.flags {
            output.push_str(&format!("- {flag}\n"));
        }
    }
    output.push('\n');

    output.push_str("## Factor Alignment\n\n");
    for (name, points) in result.factor_boosts.entries() {
        output.push_str(&format!("- {name}: {points}\n"));
    }
    output.push('\n');

    output.push_str("## Positives\n\n");
    for positive in &result.positives {
        output.push_str(&format!("- {positive}\n"));
    }
    output.push('\n');

    output.push_str("## Risks\n\n");
    for risk in &result.risks {
        output.push_str(&format!("- {risk}\n"));
    }
    output
}
