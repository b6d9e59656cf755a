pub mod category;
pub mod corpus;
pub mod error;
pub mod format;
pub mod model;
pub mod schema;

pub use category::CategoryFilter;
pub use corpus::{CommonQuestion, Corpus};
pub use error::CorpusError;
pub use model::{PolicyDocument, PolicyStatus, Section, SectionId};
pub use schema::results;
