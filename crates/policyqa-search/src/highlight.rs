//! Markdown emphasis for the parts of a section readers look for first.

use std::sync::LazyLock;

use regex::Regex;

use crate::SearchError;

// One alternation so a single pass never wraps the same text twice.
static RE_IMPORTANT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)",
        r"\d+(?:,\d{3})*\s?(?:원|won\b|krw\b)",
        r"|\btier\s*\d*",
        r"|\d+\s?(?:일|days?\b)",
        r"|\b(?:required|prohibited|exceptions?|approval|apply)\b",
        r"|필수|금지|예외|승인|신청",
    ))
    .ok()
});

/// Wrap currency amounts, tier labels, day counts and key policy words in `**`.
pub fn highlight(content: &str) -> Result<String, SearchError> {
    let re = RE_IMPORTANT
        .as_ref()
        .ok_or(SearchError::PatternUnavailable("highlight"))?;
    Ok(re.replace_all(content, "**$0**").into_owned())
}
