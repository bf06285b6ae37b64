use thiserror::Error;

use crate::model::Target;

/// Reasons a bulk run is refused before any work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("no targets to process")]
    EmptyTargetList,
    #[error("no comment text; generate or enter one first")]
    MissingComment,
    #[error("a run is already in progress")]
    RunAlreadyInProgress,
}

/// Checks the preconditions shared by the store and the runner.
pub fn check_run_preconditions(
    running: bool,
    targets: &[Target],
    comment: &str,
) -> Result<(), RunError> {
    if running {
        return Err(RunError::RunAlreadyInProgress);
    }
    if targets.is_empty() {
        return Err(RunError::EmptyTargetList);
    }
    if comment.trim().is_empty() {
        return Err(RunError::MissingComment);
    }
    Ok(())
}
