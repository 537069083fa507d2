use crate::types::result::ScoredResult;

pub fn to_json(results: &[ScoredResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(results)
}

pub fn to_json_single(result: &ScoredResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
