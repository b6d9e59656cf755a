use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corpus payload has no `policies` collection")]
    MissingPolicies,

    #[error("policy #{index} has an empty title")]
    EmptyTitle { index: usize },

    #[error("policy `{policy}` has a section with an empty id")]
    EmptySectionId { policy: String },
}
