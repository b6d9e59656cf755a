use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("query is empty")]
    EmptyQuery,

    /// A built-in regular expression failed to compile.
    #[error("text pattern unavailable: {0}")]
    PatternUnavailable(&'static str),
}
