//! Outreach core: pure application state, data model and view-model helpers.
mod activity_log;
mod effect;
mod error;
mod model;
mod msg;
mod state;
mod targets;
mod update;
mod view_model;

pub use activity_log::ActivityLog;
pub use effect::Effect;
pub use error::{check_run_preconditions, RunError};
pub use model::{progress_percent, LogEntry, Outcome, Settings, Target, DEFAULT_TARGET_TITLE};
pub use msg::Msg;
pub use state::{AppState, RunState};
pub use targets::{format_target_lines, parse_target_lines, TargetList, TARGET_DELIMITER};
pub use update::update;
pub use view_model::{AppViewModel, Notice, RunView};
