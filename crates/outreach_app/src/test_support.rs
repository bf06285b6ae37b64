use async_trait::async_trait;
use outreach_core::Target;
use outreach_engine::{
    BlogFinder, CommentGenerator, GenAiError, GenerationError, SearchError, SettingsStore,
};
use tempfile::TempDir;

pub const COMMENT: &str = "Great tips! <a href=\"https://shop.example.com\">compost</a>";

pub fn init_logging() {
    outreach_logging::initialize_for_tests();
}

pub fn targets(n: usize) -> Vec<Target> {
    (0..n)
        .map(|i| Target::new(format!("Post {i}"), format!("https://blog{i}.example.com/{i}")))
        .collect()
}

pub fn temp_store() -> (TempDir, SettingsStore) {
    let dir = TempDir::new().expect("temp dir");
    let store = SettingsStore::new(dir.path().join("settings.json"));
    (dir, store)
}

/// Generator that answers with a fixed comment, or fails when empty.
pub struct FixedGenerator(pub &'static str);

#[async_trait]
impl CommentGenerator for FixedGenerator {
    async fn generate(
        &self,
        _keywords: &str,
        _link_target: &str,
        _tone: Option<&str>,
    ) -> Result<String, GenerationError> {
        if self.0.is_empty() {
            Err(GenerationError::Empty)
        } else {
            Ok(self.0.to_string())
        }
    }
}

/// Finder that returns the given targets, or times out when `None`.
pub struct FixedFinder(pub Option<Vec<Target>>);

#[async_trait]
impl BlogFinder for FixedFinder {
    async fn find_candidates(
        &self,
        _keyword: &str,
        count: usize,
    ) -> Result<Vec<Target>, SearchError> {
        match &self.0 {
            Some(found) => Ok(found.iter().take(count).cloned().collect()),
            None => Err(SearchError::Failed(GenAiError::Timeout)),
        }
    }
}
