//! Structured answers built from ranked results.
//!
//! The serialized shape of [`StructuredAnswer`] is what rendering layers
//! consume; field names are camelCase and absent parts serialize as `null`.

use policyqa_core::format::{format_currency_list, join_steps};
use policyqa_core::{PolicyDocument, Section, SectionId};
use serde::Serialize;

use crate::SearchError;
use crate::config::AnswerConfig;
use crate::confidence::ConfidenceEstimator;
use crate::facts::{self, KeyFacts};
use crate::highlight::highlight;
use crate::intent::{AnswerTemplate, classify};
use crate::ranker::SearchResult;

/// Citation metadata of the document an answer is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCitation {
    pub title: String,
    pub version: String,
    pub effective_date: String,
    /// Section reference as displayed, e.g. `§3`.
    pub section: String,
    pub owner: String,
}

impl SourceCitation {
    pub fn of(document: &PolicyDocument, section: &Section) -> Self {
        Self {
            title: document.title.clone(),
            version: document.version.clone(),
            effective_date: document.effective_date.clone(),
            section: format!("§{}", section.id),
            owner: document.owner.clone(),
        }
    }
}

/// A runner-up match attached to an answer for context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementaryResult {
    pub document_title: String,
    pub section: SectionId,
    pub section_title: String,
    pub score: u32,
}

impl From<&SearchResult<'_>> for SupplementaryResult {
    fn from(r: &SearchResult<'_>) -> Self {
        Self {
            document_title: r.document.title.clone(),
            section: r.section.id.clone(),
            section_title: r.section.title.clone(),
            score: r.total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAnswer {
    pub conclusion: String,
    pub key_facts: Option<KeyFacts>,
    pub source: Option<SourceCitation>,
    pub next_steps: String,
    pub warnings: Option<Vec<String>>,
    /// 0–100. Zero only when no regulation matched.
    pub confidence: u8,
    pub additional_results: Vec<SupplementaryResult>,
    /// A human should pick this question up.
    pub escalation_advised: bool,
}

impl StructuredAnswer {
    /// The answer given when no section clears the score cutoff.
    pub fn no_result(query: &str, config: &AnswerConfig) -> Self {
        let contact = &config.escalation_contact;
        Self {
            conclusion: format!(
                "No regulation matching **\"{}\"** could be found. Please consult the {contact}.",
                query.trim()
            ),
            key_facts: None,
            source: None,
            next_steps: format!("Open a consultation ticket with the {contact} or contact them directly."),
            warnings: Some(vec![format!(
                "For an accurate answer, please contact the {contact}."
            )]),
            confidence: 0,
            additional_results: Vec::new(),
            escalation_advised: true,
        }
    }

    /// The answer given when the pipeline itself failed.
    pub fn search_failed(query: &str, config: &AnswerConfig) -> Self {
        let contact = &config.escalation_contact;
        Self {
            conclusion: format!(
                "The search for **\"{}\"** failed. Please try again.",
                query.trim()
            ),
            key_facts: None,
            source: None,
            next_steps: format!("Try again, or contact the {contact} if the problem persists."),
            warnings: Some(vec!["An error occurred while searching.".to_string()]),
            confidence: 0,
            additional_results: Vec::new(),
            escalation_advised: true,
        }
    }
}

/// Builds a [`StructuredAnswer`] from ranked results.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    config: AnswerConfig,
    estimator: ConfidenceEstimator,
}

impl Synthesizer {
    pub fn new(config: AnswerConfig) -> Self {
        let estimator = ConfidenceEstimator::from_config(&config);
        Self { config, estimator }
    }

    pub fn config(&self) -> &AnswerConfig {
        &self.config
    }

    /// `results` must be ranked best first, as [`crate::Ranker::rank`] returns them.
    pub fn synthesize(
        &self,
        results: &[SearchResult<'_>],
        query: &str,
    ) -> Result<StructuredAnswer, SearchError> {
        let Some(top) = results.first() else {
            return Ok(StructuredAnswer::no_result(query, &self.config));
        };
        let (document, section) = (top.document, top.section);

        let conclusion = self.conclusion(document, section, classify(query))?;
        let key_facts = facts::extract(section, query, &self.config)?;

        let next_steps = if section.has_procedures() {
            join_steps(&section.procedures)
        } else {
            format!(
                "Contact the {} or fill in the relevant request form.",
                document.owner
            )
        };

        let mut warnings = section.exceptions.clone();
        if !document.status.is_active() {
            warnings.push(format!(
                "Caution: this regulation is not currently active (status: {}).",
                document.status.as_str()
            ));
        }

        let additional_results = results
            .iter()
            .skip(1)
            .take(self.config.supplementary_results)
            .map(SupplementaryResult::from)
            .collect();

        Ok(StructuredAnswer {
            conclusion,
            key_facts,
            source: Some(SourceCitation::of(document, section)),
            next_steps,
            warnings: (!warnings.is_empty()).then_some(warnings),
            confidence: self.estimator.estimate(top.total()),
            additional_results,
            escalation_advised: false,
        })
    }

    fn conclusion(
        &self,
        document: &PolicyDocument,
        section: &Section,
        template: AnswerTemplate,
    ) -> Result<String, SearchError> {
        let lead = format!("According to {} §{}, ", document.title, section.id);
        let amounts = format_currency_list(&section.amounts, &self.config.currency_unit);

        let body = match template {
            AnswerTemplate::Limit if !amounts.is_empty() => {
                format!("the limit for this item is **{amounts}**.")
            }
            AnswerTemplate::Amount if !amounts.is_empty() => {
                format!("the applicable amount is **{amounts}**.")
            }
            AnswerTemplate::Procedure => {
                let steps = if section.has_procedures() {
                    join_steps(&section.procedures)
                } else {
                    format!("ask the {}", document.owner)
                };
                format!("the procedure is **{steps}**.")
            }
            // Limit/amount questions against a section without currency
            // amounts fall back to quoting the section.
            AnswerTemplate::Limit | AnswerTemplate::Amount | AnswerTemplate::Highlight => {
                highlight(&section.content)?
            }
        };

        Ok(lead + &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranker::Ranker;
    use crate::query::Query;
    use policyqa_core::{CategoryFilter, Corpus, PolicyStatus};

    fn doc(title: &str, status: PolicyStatus, sections: Vec<Section>) -> PolicyDocument {
        PolicyDocument {
            title: title.into(),
            version: "2.0".into(),
            effective_date: "2025-01-01".into(),
            owner: "HR team".into(),
            category: "travel".into(),
            status,
            sections,
        }
    }

    fn travel_section() -> Section {
        Section::new("3", "Travel expense limits", "Domestic travel is capped at 50,000 won per day.")
            .with_amounts([50000])
            .with_procedures(["submit form", "manager approval"])
    }

    fn travel_corpus() -> Corpus {
        Corpus::new(vec![doc("Travel Policy", PolicyStatus::Active, vec![travel_section()])])
    }

    fn answer(corpus: &Corpus, q: &str) -> StructuredAnswer {
        let results = Ranker::default().rank(corpus, &Query::parse(q).unwrap(), &CategoryFilter::All);
        Synthesizer::default().synthesize(&results, q).unwrap()
    }

    #[test]
    fn travel_limit_scenario() {
        let a = answer(&travel_corpus(), "what is the travel limit");
        assert!(a.conclusion.starts_with("According to Travel Policy §3, "));
        assert!(a.conclusion.contains("**50,000 won**"), "{}", a.conclusion);
        assert!(a.confidence >= 30);
        assert!(!a.escalation_advised);
    }

    #[test]
    fn no_result_scenario() {
        let a = answer(&travel_corpus(), "zzz-nonexistent-term");
        assert_eq!(a.confidence, 0);
        assert!(a.escalation_advised);
        assert!(a.key_facts.is_none());
        assert!(a.source.is_none());
        assert!(a.conclusion.contains("zzz-nonexistent-term"));
        assert_eq!(a.warnings.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn citation_metadata() {
        let a = answer(&travel_corpus(), "travel limit");
        let source = a.source.unwrap();
        assert_eq!(source.title, "Travel Policy");
        assert_eq!(source.version, "2.0");
        assert_eq!(source.effective_date, "2025-01-01");
        assert_eq!(source.section, "§3");
        assert_eq!(source.owner, "HR team");
    }

    #[test]
    fn next_steps_from_procedures() {
        let a = answer(&travel_corpus(), "travel limit");
        assert_eq!(a.next_steps, "submit form → manager approval");
    }

    #[test]
    fn next_steps_default_to_owner() {
        let corpus = Corpus::new(vec![doc(
            "Travel Policy",
            PolicyStatus::Active,
            vec![Section::new("1", "Scope", "Applies to all business travel.")],
        )]);
        let a = answer(&corpus, "business travel");
        assert_eq!(
            a.next_steps,
            "Contact the HR team or fill in the relevant request form."
        );
    }

    #[test]
    fn procedure_template_lists_steps() {
        let a = answer(&travel_corpus(), "travel procedure");
        assert!(
            a.conclusion.ends_with("the procedure is **submit form → manager approval**."),
            "{}",
            a.conclusion
        );
    }

    #[test]
    fn amount_template_lists_currency() {
        let a = answer(&travel_corpus(), "how much travel allowance");
        assert!(a.conclusion.ends_with("the applicable amount is **50,000 won**."));
    }

    #[test]
    fn limit_without_currency_falls_back_to_highlight() {
        let corpus = Corpus::new(vec![doc(
            "Leave Policy",
            PolicyStatus::Active,
            vec![Section::new("2", "Annual leave limit", "Employees receive 15 days per year.")
                .with_amounts([15])],
        )]);
        let a = answer(&corpus, "annual leave limit");
        assert!(a.conclusion.contains("**15 days**"), "{}", a.conclusion);
    }

    #[test]
    fn warnings_collect_exceptions_and_stale_status() {
        let section = travel_section().with_exceptions(["Overseas travel is excluded."]);
        let corpus = Corpus::new(vec![doc(
            "Travel Policy",
            PolicyStatus::Other("archived".into()),
            vec![section],
        )]);
        let a = answer(&corpus, "travel limit");
        let warnings = a.warnings.unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0], "Overseas travel is excluded.");
        assert!(warnings[1].contains("archived"));
    }

    #[test]
    fn no_warnings_for_clean_active_section() {
        let a = answer(&travel_corpus(), "travel limit");
        assert!(a.warnings.is_none());
    }

    #[test]
    fn at_most_two_additional_results() {
        let sections = (1..=5)
            .map(|i| Section::new(i.to_string(), "Travel rules", "travel rules apply"))
            .collect();
        let corpus = Corpus::new(vec![doc("Travel Policy", PolicyStatus::Active, sections)]);
        let a = answer(&corpus, "travel rules");
        assert_eq!(a.additional_results.len(), 2);
        assert_eq!(a.additional_results[0].section.as_str(), "2");
        assert_eq!(a.additional_results[1].section.as_str(), "3");
    }

    #[test]
    fn single_result_has_no_additional_results() {
        let a = answer(&travel_corpus(), "travel limit");
        assert!(a.additional_results.is_empty());
    }

    #[test]
    fn serialized_shape_is_camel_case() {
        let a = answer(&travel_corpus(), "travel limit");
        let v = serde_json::to_value(&a).unwrap();
        for field in [
            "conclusion",
            "keyFacts",
            "source",
            "nextSteps",
            "warnings",
            "confidence",
            "additionalResults",
            "escalationAdvised",
        ] {
            assert!(v.get(field).is_some(), "missing {field}");
        }
        assert_eq!(v["source"]["effectiveDate"], "2025-01-01");
        assert_eq!(v["keyFacts"]["Amount 1"], "50,000 won");
    }

    #[test]
    fn search_failed_answer() {
        let a = StructuredAnswer::search_failed("travel", &AnswerConfig::default());
        assert_eq!(a.confidence, 0);
        assert!(a.escalation_advised);
        assert!(a.conclusion.contains("failed"));
    }
}
