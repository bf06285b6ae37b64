#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the destination link.
    TargetUrlChanged(String),
    /// User edited the comma-separated keyword list.
    KeywordsChanged(String),
    /// User edited the comment text by hand.
    CommentChanged(String),
    /// Restore the persisted settings blob.
    RestoreSettings(crate::Settings),
    /// User asked to persist the current settings.
    SaveSettingsClicked,
    /// Settings blob was written.
    SettingsSaved,
    /// Writing the settings blob failed; carries the user-visible message.
    SettingsSaveFailed(String),
    /// User asked the blog finder for candidates.
    SearchClicked { keyword: String, count: usize },
    /// Blog finder returned candidates.
    SearchCompleted(Vec<crate::Target>),
    /// Blog finder failed; carries the user-visible message.
    SearchFailed(String),
    /// User copied the search results into the target list.
    UseSearchResultsClicked,
    /// Targets were loaded from an already parsed source.
    TargetsLoaded(Vec<crate::Target>),
    /// Raw `title|url` text was imported.
    TargetsTextImported(String),
    /// User asked for a comment to be generated.
    GenerateClicked { tone: Option<String> },
    /// Comment generator returned text.
    CommentGenerated(String),
    /// Comment generator failed; carries the user-visible message.
    CommentFailed(String),
    /// User started a bulk run.
    StartRunClicked,
    /// Runner finished one target.
    RunStep {
        entry: crate::LogEntry,
        progress: u8,
    },
    /// Runner ended, either after the last target or after a stop.
    RunFinished { stopped: bool },
    /// User asked the running bulk run to stop.
    StopClicked,
}
