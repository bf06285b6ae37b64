use crate::error::check_run_preconditions;
use crate::{AppState, Effect, Msg, Notice};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TargetUrlChanged(url) => {
            state.set_target_url(url.trim().to_string());
            Vec::new()
        }
        Msg::KeywordsChanged(keywords) => {
            state.set_keywords(keywords.trim().to_string());
            Vec::new()
        }
        Msg::CommentChanged(comment) => {
            state.set_comment(comment);
            Vec::new()
        }
        Msg::RestoreSettings(settings) => {
            state.restore_settings(settings);
            Vec::new()
        }
        Msg::SaveSettingsClicked => vec![Effect::SaveSettings(state.settings().clone())],
        Msg::SettingsSaved => {
            state.push_notice(Notice::SettingsSaved);
            Vec::new()
        }
        Msg::SettingsSaveFailed(message) => {
            state.push_notice(Notice::SettingsSaveFailed(message));
            Vec::new()
        }
        Msg::SearchClicked { keyword, count } => {
            if state.is_searching() {
                return (state, Vec::new());
            }
            state.set_searching(true);
            vec![Effect::SearchBlogs {
                keyword: keyword.trim().to_string(),
                count,
            }]
        }
        Msg::SearchCompleted(results) => {
            state.push_notice(Notice::SearchReturned(results.len()));
            state.set_search_results(results);
            Vec::new()
        }
        Msg::SearchFailed(message) => {
            state.set_searching(false);
            state.push_notice(Notice::SearchFailed(message));
            Vec::new()
        }
        Msg::UseSearchResultsClicked => {
            // The target list belongs to the runner while a run is live.
            if state.is_running() {
                return (state, Vec::new());
            }
            state.import_search_results();
            state.push_notice(Notice::TargetsImported(state.targets().len()));
            Vec::new()
        }
        Msg::TargetsLoaded(targets) => {
            if state.is_running() {
                return (state, Vec::new());
            }
            state.set_targets(targets);
            state.push_notice(Notice::TargetsImported(state.targets().len()));
            Vec::new()
        }
        Msg::TargetsTextImported(raw) => {
            if state.is_running() {
                return (state, Vec::new());
            }
            state.import_targets_text(&raw);
            state.push_notice(Notice::TargetsImported(state.targets().len()));
            Vec::new()
        }
        Msg::GenerateClicked { tone } => {
            if state.is_generating() {
                return (state, Vec::new());
            }
            let settings = state.settings();
            if settings.keywords.is_empty() || settings.target_url.is_empty() {
                state.push_notice(Notice::MissingGenerationInput);
                return (state, Vec::new());
            }
            let effect = Effect::GenerateComment {
                keywords: settings.keywords.clone(),
                link_target: settings.target_url.clone(),
                tone: tone.filter(|t| !t.trim().is_empty()),
            };
            state.set_generating(true);
            vec![effect]
        }
        Msg::CommentGenerated(comment) => {
            state.set_generating(false);
            let comment = comment.trim().to_string();
            if comment.is_empty() {
                state.push_notice(Notice::GenerationFailed(
                    "generator returned no text".to_string(),
                ));
            } else {
                state.set_comment(comment);
            }
            Vec::new()
        }
        Msg::CommentFailed(message) => {
            state.set_generating(false);
            state.push_notice(Notice::GenerationFailed(message));
            Vec::new()
        }
        Msg::StartRunClicked => {
            let comment = state.settings().generated_comment.clone();
            if let Err(err) = check_run_preconditions(state.is_running(), state.targets(), &comment)
            {
                state.push_notice(Notice::RunRejected(err));
                return (state, Vec::new());
            }
            state.begin_run();
            vec![Effect::StartRun {
                targets: state.targets().to_vec(),
                comment,
            }]
        }
        Msg::RunStep { entry, progress } => {
            if !state.is_running() {
                return (state, Vec::new());
            }
            state.append_log(entry);
            state.set_progress(progress);
            Vec::new()
        }
        Msg::RunFinished { stopped } => {
            if !state.is_running() {
                return (state, Vec::new());
            }
            let run = state.run_state();
            if stopped {
                state.push_notice(Notice::RunStopped {
                    completed: run.completed,
                    total: run.total,
                });
            }
            state.finish_run();
            Vec::new()
        }
        Msg::StopClicked => {
            let run = state.run_state();
            if run.running && !run.stop_requested {
                state.request_stop();
                vec![Effect::StopRun]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}
