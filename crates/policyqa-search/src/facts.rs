//! Key-fact extraction: amounts, tier thresholds and procedure for the top section.

use std::sync::LazyLock;

use policyqa_core::Section;
use policyqa_core::format::{format_currency, format_thousands, is_currency, is_day_count, join_steps};
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::SearchError;
use crate::config::AnswerConfig;

static RE_TIER_MENTION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)tier\s*(\d+)").ok());

// "Tier2: up to 1,000,000 won" → ("2", "1,000,000")
static RE_TIER_AMOUNT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)tier\s*(\d+)[^0-9]*(\d{1,3}(?:,\d{3})*)").ok());

/// Ordered label → value mapping. Re-inserting a label replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFacts(Vec<(String, String)>);

impl KeyFacts {
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.0.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }
}

impl Serialize for KeyFacts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in &self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Collect the facts a reader needs from `section`.
///
/// Returns `None` when the section yields nothing worth listing.
pub fn extract(
    section: &Section,
    query: &str,
    config: &AnswerConfig,
) -> Result<Option<KeyFacts>, SearchError> {
    let mut facts = KeyFacts::default();

    if !section.amounts.is_empty() {
        for tier in mentioned_tiers(query)? {
            if let Some(amount) = tier_amount(&section.content, &tier)? {
                facts.insert(
                    format!("Tier{tier} threshold"),
                    format!("{amount} {}", config.currency_unit),
                );
            }
        }

        for (i, &amount) in section.amounts.iter().enumerate() {
            if is_currency(amount) {
                facts.insert(
                    format!("Amount {}", i + 1),
                    format_currency(amount, &config.currency_unit),
                );
            } else if is_day_count(amount) {
                facts.insert(
                    "Days/Count",
                    format!("{} {}", format_thousands(amount), config.day_unit),
                );
            }
        }
    }

    if section.has_procedures() {
        facts.insert("Procedure", join_steps(&section.procedures));
    }

    Ok((!facts.is_empty()).then_some(facts))
}

/// Tier numbers named in the question, deduplicated, in order of mention.
fn mentioned_tiers(query: &str) -> Result<Vec<String>, SearchError> {
    let re = RE_TIER_MENTION
        .as_ref()
        .ok_or(SearchError::PatternUnavailable("tier mention"))?;
    let mut tiers: Vec<String> = Vec::new();
    for cap in re.captures_iter(query) {
        let n = normalize_tier(&cap[1]);
        if !tiers.contains(&n) {
            tiers.push(n);
        }
    }
    Ok(tiers)
}

/// First amount the content states for the given tier.
fn tier_amount(content: &str, tier: &str) -> Result<Option<String>, SearchError> {
    let re = RE_TIER_AMOUNT
        .as_ref()
        .ok_or(SearchError::PatternUnavailable("tier amount"))?;
    Ok(re
        .captures_iter(content)
        .find(|cap| normalize_tier(&cap[1]) == tier)
        .map(|cap| cap[2].to_string()))
}

fn normalize_tier(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let n = if trimmed.is_empty() { "0" } else { trimmed };
    n.to_string()
}
