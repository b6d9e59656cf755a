//! Query pipeline: scorer → ranker → intent classifier + answer synthesizer.
//!
//! Every stage is a pure function of the corpus, the query, and the
//! configuration passed in; nothing is cached between queries.

pub mod answer;
pub mod assistant;
pub mod config;
pub mod confidence;
mod error;
pub mod facts;
pub mod highlight;
pub mod intent;
pub mod query;
pub mod ranker;
pub mod scorer;
pub mod table;

pub use answer::{SourceCitation, StructuredAnswer, SupplementaryResult, Synthesizer};
pub use assistant::{Assistant, QueryOutcome};
pub use config::{AnswerConfig, ScoringWeights, SearchConfig};
pub use confidence::{ConfidenceEstimator, ConfidenceLevel};
pub use error::SearchError;
pub use facts::KeyFacts;
pub use intent::{AnswerTemplate, classify};
pub use query::Query;
pub use ranker::{Ranker, SearchResult};
pub use scorer::{ScoreBreakdown, Scorer};
