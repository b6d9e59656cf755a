//! Corpus store: the single load boundary in front of the query pipeline.
//!
//! Queries may only run once a load has succeeded. Until then [`CorpusStore::corpus`]
//! reports [`StoreError::NotReady`]; after a failed load it keeps reporting the
//! failure until a later load succeeds.

use std::path::Path;
use std::sync::Arc;

use policyqa_core::Corpus;
use tracing::{info, warn};

use crate::error::StoreError;

#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Ready(Arc<Corpus>),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct CorpusStore {
    state: LoadState,
}

impl CorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    /// Read and validate a corpus JSON file.
    pub async fn load_file(&mut self, path: &Path) -> Result<Arc<Corpus>, StoreError> {
        if !path.exists() {
            let err = StoreError::CorpusNotFound(path.to_path_buf());
            return Err(self.reject(err));
        }
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) => return Err(self.reject(e.into())),
        };
        self.load_json(&raw)
    }

    /// Validate an in-memory corpus payload.
    pub fn load_json(&mut self, raw: &str) -> Result<Arc<Corpus>, StoreError> {
        match Corpus::from_json(raw) {
            Ok(corpus) => {
                let corpus = Arc::new(corpus);
                info!(
                    policies = corpus.policies.len(),
                    sections = corpus.section_count(),
                    "corpus ready"
                );
                self.state = LoadState::Ready(Arc::clone(&corpus));
                Ok(corpus)
            }
            Err(e) => Err(self.reject(e.into())),
        }
    }

    /// The loaded corpus, or why queries cannot run yet.
    pub fn corpus(&self) -> Result<Arc<Corpus>, StoreError> {
        match &self.state {
            LoadState::Ready(corpus) => Ok(Arc::clone(corpus)),
            LoadState::Pending => {
                warn!("query rejected: corpus not loaded");
                Err(StoreError::NotReady)
            }
            LoadState::Failed(reason) => {
                warn!(reason = %reason, "query rejected: corpus failed to load");
                Err(StoreError::LoadFailed(reason.clone()))
            }
        }
    }

    fn reject(&mut self, err: StoreError) -> StoreError {
        warn!(error = %err, "corpus load rejected");
        self.state = LoadState::Failed(err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAVEL: &str = r#"{
        "policies": [{
            "title": "Travel Policy",
            "version": "1.0",
            "effectiveDate": "2025-01-01",
            "owner": "HR team",
            "category": "travel",
            "status": "active",
            "sections": [{
                "section": "3",
                "title": "Travel expense limits",
                "content": "Travel is capped at 50,000 won.",
                "amounts": [50000],
                "procedures": ["submit form", "manager approval"]
            }]
        }]
    }"#;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn not_ready_before_load() {
        let store = CorpusStore::new();
        assert!(!store.is_ready());
        assert!(matches!(store.corpus(), Err(StoreError::NotReady)));
    }

    #[tokio::test]
    async fn load_file_makes_corpus_available() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "policies.json", TRAVEL);

        let mut store = CorpusStore::new();
        let loaded = store.load_file(&path).await.unwrap();
        assert_eq!(loaded.policies.len(), 1);
        assert!(store.is_ready());
        assert_eq!(store.corpus().unwrap().section_count(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let mut store = CorpusStore::new();
        let err = store.load_file(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::CorpusNotFound(p) if p == path));
        assert!(matches!(store.corpus(), Err(StoreError::LoadFailed(_))));
    }

    #[tokio::test]
    async fn payload_without_policies_leaves_no_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "bad.json", r#"{"documents": []}"#);

        let mut store = CorpusStore::new();
        let err = store.load_file(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Corpus(_)));
        assert!(!store.is_ready());
        assert!(matches!(store.state(), LoadState::Failed(_)));
    }

    #[test]
    fn failed_reload_drops_previous_corpus() {
        let mut store = CorpusStore::new();
        store.load_json(TRAVEL).unwrap();
        assert!(store.is_ready());

        assert!(store.load_json("not json").is_err());
        assert!(matches!(store.corpus(), Err(StoreError::LoadFailed(_))));
    }

    #[test]
    fn successful_load_recovers_from_failure() {
        let mut store = CorpusStore::new();
        assert!(store.load_json("[]").is_err());
        store.load_json(TRAVEL).unwrap();
        assert!(store.corpus().is_ok());
    }
}
