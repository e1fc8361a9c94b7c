use llm_interface::ChatResponse;
use psyche_core::LlmError;

/// Splits a comma-separated interest list.
///
/// All whitespace is removed before splitting. Empty tokens are kept, so a
/// trailing comma yields a trailing `""`.
pub fn parse_interests(raw: &str) -> Vec<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    compact.split(',').map(str::to_string).collect()
}

pub fn parse_summary(raw: &str) -> String {
    raw.trim().to_string()
}

pub fn interests_from(response: &ChatResponse) -> Result<Vec<String>, LlmError> {
    response.first_content().map(parse_interests)
}

pub fn summary_from(response: &ChatResponse) -> Result<String, LlmError> {
    response.first_content().map(parse_summary)
}
