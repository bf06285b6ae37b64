//! Outreach engine: simulated bulk runner, AI collaborators and persistence.
mod comment;
mod finder;
mod genai;
mod persist;
mod runner;
mod sampler;
mod settings_store;
mod targets_file;

pub use comment::{CommentGenerator, GeminiCommentGenerator, GenerationError};
pub use finder::{
    collect_candidates, looks_like_article, BlogFinder, FinderSettings, GeminiBlogFinder,
    SearchError,
};
pub use genai::{
    Candidate, Content, GenAiClient, GenAiError, GenAiSettings, GenerateResponse,
    GroundingChunk, GroundingMetadata, Part, WebSource,
};
pub use persist::{ensure_dir, write_atomically, PersistError};
pub use runner::{
    BulkRunner, RunEvent, RunHandle, RunStream, RunnerSettings, FAIL_MESSAGE, SUCCESS_MESSAGE,
};
pub use sampler::{OutcomeSampler, RandomSampler, SUCCESS_PROBABILITY};
pub use settings_store::{SettingsStore, SETTINGS_FILENAME};
pub use targets_file::{read_targets_file, write_targets_file, TargetFileError};
