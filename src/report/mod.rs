pub mod csv;
pub mod json;
pub mod md;

use crate::error::Result;
use crate::types::result::ScoredResult;
use crate::types::snapshot::MetricSnapshot;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Csv,
}

pub fn render(results: &[ScoredResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(results).map_err(Into::into),
        OutputFormat::Md => Ok(md::to_markdown(results)),
        OutputFormat::Csv => csv::to_csv(results),
    }
}

pub fn render_single(result: &ScoredResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json_single(result).map_err(Into::into),
        OutputFormat::Md => Ok(md::to_detail(result)),
        OutputFormat::Csv => csv::to_csv(std::slice::from_ref(result)),
    }
}

/// "2.50B" / "3.20M" style rendering for monetary magnitudes.
pub(crate) fn format_large(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn format_metric(snapshot: &MetricSnapshot, key: &str) -> String {
    match snapshot.raw_metric(key) {
        Some(value) => format!("{value:.2}"),
        None => "N/A".to_string(),
    }
}

pub(crate) fn format_large_metric(snapshot: &MetricSnapshot, key: &str) -> String {
    match snapshot.raw_metric(key) {
        Some(value) => format_large(value),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_numbers_abbreviate_to_billions_and_millions() {
        assert_eq!(format_large(2.5e9), "2.50B");
        assert_eq!(format_large(3.2e6), "3.20M");
        assert_eq!(format_large(1234.5), "1234.50");
    }
}
