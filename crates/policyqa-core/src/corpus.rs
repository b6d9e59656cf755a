//! The validated policy corpus.
//!
//! The payload is a JSON object with a `policies` array and an optional
//! `commonQuestions` array. Parsing is all-or-nothing: a payload that fails
//! any check yields an error and no corpus.

use serde::{Deserialize, Serialize};

use crate::category::CategoryFilter;
use crate::error::CorpusError;
use crate::model::PolicyDocument;

/// Frequently asked question shipped alongside the policies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonQuestion {
    pub question: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corpus {
    pub policies: Vec<PolicyDocument>,
    #[serde(default)]
    pub common_questions: Vec<CommonQuestion>,
}

impl Corpus {
    pub fn new(policies: Vec<PolicyDocument>) -> Self {
        Self {
            policies,
            common_questions: Vec::new(),
        }
    }

    /// Parse and validate a corpus payload.
    pub fn from_json(raw: &str) -> Result<Self, CorpusError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.get("policies").is_some_and(|p| p.is_array()) {
            return Err(CorpusError::MissingPolicies);
        }

        let corpus: Corpus = serde_json::from_value(value)?;
        corpus.validate()?;
        Ok(corpus)
    }

    fn validate(&self) -> Result<(), CorpusError> {
        for (index, policy) in self.policies.iter().enumerate() {
            if policy.title.trim().is_empty() {
                return Err(CorpusError::EmptyTitle { index });
            }
            if policy.sections.iter().any(|s| s.id.is_empty()) {
                return Err(CorpusError::EmptySectionId {
                    policy: policy.title.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.policies.iter().map(|p| p.sections.len()).sum()
    }

    /// Documents admitted by `filter`, in corpus order.
    pub fn documents<'a, 'f>(
        &'a self,
        filter: &'f CategoryFilter,
    ) -> impl Iterator<Item = &'a PolicyDocument> + use<'a, 'f> {
        self.policies.iter().filter(|p| filter.matches(&p.category))
    }

    /// Distinct category labels in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for policy in &self.policies {
            if !out.contains(&policy.category.as_str()) {
                out.push(&policy.category);
            }
        }
        out
    }
}
