use crate::activity_log::ActivityLog;
use crate::model::{LogEntry, Settings, Target};
use crate::targets::TargetList;
use crate::view_model::{AppViewModel, Notice, RunView};

/// Progress of the current (or last) bulk run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunState {
    pub running: bool,
    pub progress: u8,
    pub completed: usize,
    pub total: usize,
    pub stop_requested: bool,
}

/// The single owner of application state. Mutated only through `update`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: Settings,
    targets: TargetList,
    search_results: Vec<Target>,
    log: ActivityLog,
    run: RunState,
    searching: bool,
    generating: bool,
    notices: Vec<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            target_url: self.settings.target_url.clone(),
            keywords: self.settings.keywords.clone(),
            comment: self.settings.generated_comment.clone(),
            targets: self.targets.as_slice().to_vec(),
            search_results: self.search_results.clone(),
            log_newest_first: self.log.entries_newest_first(),
            run: RunView {
                running: self.run.running,
                progress: self.run.progress,
                completed: self.run.completed,
                total: self.run.total,
            },
            searching: self.searching,
            generating: self.generating,
            notices: self.notices.clone(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn targets(&self) -> &[Target] {
        self.targets.as_slice()
    }

    pub fn log_entries(&self) -> &[LogEntry] {
        self.log.entries()
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn is_running(&self) -> bool {
        self.run.running
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Hands pending notices to the caller exactly once.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
        self.mark_dirty();
    }

    pub(crate) fn set_target_url(&mut self, url: String) {
        self.settings.target_url = url;
        self.mark_dirty();
    }

    pub(crate) fn set_keywords(&mut self, keywords: String) {
        self.settings.keywords = keywords;
        self.mark_dirty();
    }

    pub(crate) fn set_comment(&mut self, comment: String) {
        self.settings.generated_comment = comment;
        self.mark_dirty();
    }

    pub(crate) fn restore_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.mark_dirty();
    }

    pub(crate) fn set_targets(&mut self, targets: Vec<Target>) {
        self.targets.set_targets(targets);
        self.mark_dirty();
    }

    pub(crate) fn import_search_results(&mut self) {
        self.targets.import_from_source(&self.search_results);
        self.mark_dirty();
    }

    pub(crate) fn import_targets_text(&mut self, raw: &str) {
        self.targets.import_from_text(raw);
        self.mark_dirty();
    }

    pub(crate) fn set_searching(&mut self, searching: bool) {
        self.searching = searching;
        self.mark_dirty();
    }

    pub(crate) fn set_search_results(&mut self, results: Vec<Target>) {
        self.search_results = results;
        self.searching = false;
        self.mark_dirty();
    }

    pub(crate) fn set_generating(&mut self, generating: bool) {
        self.generating = generating;
        self.mark_dirty();
    }

    /// Clears the log and resets progress for a run over the current targets.
    pub(crate) fn begin_run(&mut self) {
        self.log.clear();
        self.run = RunState {
            running: true,
            progress: 0,
            completed: 0,
            total: self.targets.len(),
            stop_requested: false,
        };
        self.mark_dirty();
    }

    pub(crate) fn append_log(&mut self, entry: LogEntry) {
        self.log.append(entry);
        self.run.completed += 1;
        self.mark_dirty();
    }

    /// Progress never moves backwards within a run.
    pub(crate) fn set_progress(&mut self, progress: u8) {
        self.run.progress = self.run.progress.max(progress.min(100));
        self.mark_dirty();
    }

    pub(crate) fn request_stop(&mut self) {
        self.run.stop_requested = true;
        self.mark_dirty();
    }

    pub(crate) fn finish_run(&mut self) {
        self.run.running = false;
        self.run.stop_requested = false;
        self.mark_dirty();
    }
}
