//! Corpus loading (readiness-gated) and per-user session context.

mod error;
pub use error::StoreError;

mod corpus_store;
pub use corpus_store::{CorpusStore, LoadState};

mod session;
pub use session::{ChatLogEntry, Session};
