use crate::engine::conditions::NEGATIVE_FLAGS;
use crate::types::result::ScoredResult;
use crate::types::snapshot::keys;

/// Named membership sets a screen can be restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Universe {
    #[default]
    All,
    LargeCap,
    MidCap,
    SmallCap,
    Value,
    Growth,
    Sector(String),
    Custom(Vec<String>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlagMode {
    #[default]
    Any,
    All,
}

#[derive(Debug, Clone)]
pub struct RankParams {
    pub universe: Universe,
    pub search: Option<String>,
    pub required_flags: Vec<String>,
    pub flag_mode: FlagMode,
    pub exclude_negative: bool,
    pub top_n: usize,
    pub show_all: bool,
}

impl Default for RankParams {
    fn default() -> Self {
        Self {
            universe: Universe::All,
            search: None,
            required_flags: Vec::new(),
            flag_mode: FlagMode::Any,
            exclude_negative: false,
            top_n: 100,
            show_all: false,
        }
    }
}

fn in_universe(result: &ScoredResult, universe: &Universe) -> bool {
    let market_cap = result.metrics.metric(keys::MARKET_CAP);
    match universe {
        Universe::All => true,
        Universe::LargeCap => market_cap > 10e9,
        Universe::MidCap => (2e9..=10e9).contains(&market_cap),
        Universe::SmallCap => market_cap < 2e9,
        Universe::Value => result.has_flag("Undervalued") || result.metrics.metric(keys::PB) < 2.0,
        Universe::Growth => result.has_flag("GARP") || result.metrics.metric(keys::PEG) < 1.0,
        Universe::Sector(sector) => result.metrics.sector_name() == sector,
        Universe::Custom(symbols) => symbols
            .iter()
            .any(|symbol| symbol.eq_ignore_ascii_case(&result.metrics.symbol)),
    }
}

fn matches_search(result: &ScoredResult, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    result.metrics.symbol.to_lowercase().contains(&needle)
        || result.metrics.name.to_lowercase().contains(&needle)
}

fn matches_flags(result: &ScoredResult, required: &[String], mode: FlagMode) -> bool {
    match mode {
        FlagMode::Any => required.iter().any(|flag| result.has_flag(flag)),
        FlagMode::All => required.iter().all(|flag| result.has_flag(flag)),
    }
}

/// Filters, sorts and truncates a scored batch. Every step is a pure
/// transformation; the sort is stable, so equal final scores keep their
/// input order.
pub fn rank(mut results: Vec<ScoredResult>, params: &RankParams) -> Vec<ScoredResult> {
    results.retain(|result| in_universe(result, &params.universe));

    if let Some(search) = params.search.as_deref() {
        if !search.is_empty() {
            results.retain(|result| matches_search(result, search));
        }
    }

    if !params.required_flags.is_empty() {
        results.retain(|result| matches_flags(result, &params.required_flags, params.flag_mode));
    }

    if params.exclude_negative {
        results.retain(|result| {
            !NEGATIVE_FLAGS
                .iter()
                .any(|negative| result.has_flag(negative))
        });
    }

    results.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

    if !params.show_all {
        results.truncate(params.top_n);
    }
    results
}
