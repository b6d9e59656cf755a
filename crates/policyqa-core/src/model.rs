//! Policy document types shared between the loader and the search pipeline.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle status of a policy document.
///
/// Anything other than `active` (case-insensitive) is kept verbatim so the
/// original label survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PolicyStatus {
    Active,
    Other(String),
}

impl PolicyStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for PolicyStatus {
    fn from(s: String) -> Self {
        if s.trim().eq_ignore_ascii_case("active") {
            Self::Active
        } else {
            Self::Other(s)
        }
    }
}

impl From<PolicyStatus> for String {
    fn from(status: PolicyStatus) -> Self {
        match status {
            PolicyStatus::Active => "active".to_string(),
            PolicyStatus::Other(s) => s,
        }
    }
}

/// Section identifier ("3", "4A", ...).
///
/// Corpus files write ids both as JSON strings and as bare numbers; both
/// deserialize to the same textual id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SectionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self::new(s),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

/// A single internal regulation with versioned metadata and ordered sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDocument {
    pub title: String,
    pub version: String,
    pub effective_date: String,
    /// Owning party, e.g. "HR team". Named in next-step guidance.
    pub owner: String,
    pub category: String,
    pub status: PolicyStatus,
    pub sections: Vec<Section>,
}

/// An addressable clause of a policy document.
///
/// The optional lists accept `null` or absence in the payload and are empty
/// when not provided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "section")]
    pub id: SectionId,
    pub title: String,
    pub content: String,
    #[serde(default, deserialize_with = "nullable_list")]
    pub keywords: Vec<String>,
    /// Currency or day-count values cited by the section.
    #[serde(default, deserialize_with = "nullable_list")]
    pub amounts: Vec<u64>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub procedures: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub exceptions: Vec<String>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: SectionId::new(id),
            title: title.into(),
            content: content.into(),
            keywords: Vec::new(),
            amounts: Vec::new(),
            procedures: Vec::new(),
            exceptions: Vec::new(),
        }
    }

    pub fn with_keywords<S: Into<String>>(mut self, keywords: impl IntoIterator<Item = S>) -> Self {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_amounts(mut self, amounts: impl IntoIterator<Item = u64>) -> Self {
        self.amounts = amounts.into_iter().collect();
        self
    }

    pub fn with_procedures<S: Into<String>>(mut self, steps: impl IntoIterator<Item = S>) -> Self {
        self.procedures = steps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exceptions<S: Into<String>>(mut self, notes: impl IntoIterator<Item = S>) -> Self {
        self.exceptions = notes.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_procedures(&self) -> bool {
        !self.procedures.is_empty()
    }
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_active_is_case_insensitive() {
        assert!(PolicyStatus::from("Active".to_string()).is_active());
        assert!(PolicyStatus::from(" active ".to_string()).is_active());
        assert!(!PolicyStatus::from("archived".to_string()).is_active());
    }

    #[test]
    fn status_keeps_other_label() {
        let status: PolicyStatus = serde_json::from_str("\"draft\"").unwrap();
        assert_eq!(status, PolicyStatus::Other("draft".into()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"draft\"");
    }

    #[test]
    fn section_id_accepts_string_and_number() {
        let a: SectionId = serde_json::from_str("\"3\"").unwrap();
        let b: SectionId = serde_json::from_str("3").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "3");
    }

    #[test]
    fn section_optional_lists_default_to_empty() {
        let json = r#"{
            "section": "4A",
            "title": "Meals",
            "content": "Meal expenses are reimbursed.",
            "amounts": null
        }"#;
        let section: Section = serde_json::from_str(json).unwrap();
        assert_eq!(section.id.as_str(), "4A");
        assert!(section.keywords.is_empty());
        assert!(section.amounts.is_empty());
        assert!(!section.has_procedures());
    }

    #[test]
    fn fractional_amount_is_rejected() {
        let json = r#"{"section": "1", "title": "t", "content": "c", "amounts": [0.5]}"#;
        assert!(serde_json::from_str::<Section>(json).is_err());
    }

    #[test]
    fn document_uses_camel_case_fields() {
        let json = r#"{
            "title": "Travel Policy",
            "version": "2.1",
            "effectiveDate": "2025-01-01",
            "owner": "HR team",
            "category": "travel",
            "status": "active",
            "sections": []
        }"#;
        let doc: PolicyDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.effective_date, "2025-01-01");
        assert!(doc.status.is_active());
    }
}
