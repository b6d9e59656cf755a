use policyqa_core::CorpusError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("corpus file not found: {0}")]
    CorpusNotFound(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid corpus: {0}")]
    Corpus(#[from] CorpusError),

    #[error("corpus is still loading")]
    NotReady,

    #[error("corpus failed to load: {0}")]
    LoadFailed(String),
}
