use super::{format_large_metric, format_metric};
use crate::error::Result;
use crate::types::result::ScoredResult;
use crate::types::snapshot::keys;

const HEADERS: [&str; 17] = [
    "Symbol",
    "Company",
    "Score",
    "Base Score",
    "Cap",
    "Price",
    "52W High",
    "52W Low",
    "Market Cap",
    "Enterprise Value",
    "P/E",
    "ROE %",
    "P/B",
    "PEG",
    "D/E",
    "Flags",
    "Positives",
];

pub fn to_csv(results: &[ScoredResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(HEADERS)?;
    for result in results {
        let m = &result.metrics;
        writer.write_record([
            m.symbol.clone(),
            m.name.clone(),
            format!("{:.2}", result.final_score),
            format!("{:.2}", result.base_score),
            result.cap_category.to_string(),
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
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
