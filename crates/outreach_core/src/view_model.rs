use std::fmt;

use crate::{LogEntry, RunError, Target};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub target_url: String,
    pub keywords: String,
    pub comment: String,
    pub targets: Vec<Target>,
    pub search_results: Vec<Target>,
    pub log_newest_first: Vec<LogEntry>,
    pub run: RunView,
    pub searching: bool,
    pub generating: bool,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunView {
    pub running: bool,
    pub progress: u8,
    pub completed: usize,
    pub total: usize,
}

/// One-shot, user-visible message produced by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    RunRejected(RunError),
    RunStopped { completed: usize, total: usize },
    MissingGenerationInput,
    GenerationFailed(String),
    SearchFailed(String),
    SearchReturned(usize),
    TargetsImported(usize),
    SettingsSaved,
    SettingsSaveFailed(String),
}

impl Notice {
    /// Whether the notice reports something the user asked for not happening.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::RunRejected(_)
                | Notice::MissingGenerationInput
                | Notice::GenerationFailed(_)
                | Notice::SearchFailed(_)
                | Notice::SettingsSaveFailed(_)
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::RunRejected(err) => write!(f, "run not started: {err}"),
            Notice::RunStopped { completed, total } => {
                write!(f, "run stopped after {completed} of {total} targets")
            }
            Notice::MissingGenerationInput => {
                write!(f, "enter keywords and a target link before generating")
            }
            Notice::GenerationFailed(message) => write!(f, "comment generation failed: {message}"),
            Notice::SearchFailed(message) => write!(f, "search failed: {message}"),
            Notice::SearchReturned(count) => write!(f, "found {count} candidate posts"),
            Notice::TargetsImported(count) => write!(f, "loaded {count} targets"),
            Notice::SettingsSaved => write!(f, "settings saved"),
            Notice::SettingsSaveFailed(message) => write!(f, "could not save settings: {message}"),
        }
    }
}
