use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use outreach_core::{format_target_lines, parse_target_lines, Target};
use outreach_logging::outreach_info;
use thiserror::Error;

use crate::persist::{write_atomically, PersistError};

#[derive(Debug, Error)]
pub enum TargetFileError {
    #[error("failed to read target file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write target file: {0}")]
    Write(#[from] PersistError),
}

/// Reads a `title|url` line file.
pub fn read_targets_file(path: &Path) -> Result<Vec<Target>, TargetFileError> {
    let raw = fs::read_to_string(path).map_err(|source| TargetFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let targets = parse_target_lines(&raw);
    outreach_info!("Read {} targets from {:?}", targets.len(), path);
    Ok(targets)
}

/// Writes targets as `title|url` lines, replacing any existing file.
pub fn write_targets_file(path: &Path, targets: &[Target]) -> Result<(), TargetFileError> {
    write_atomically(path, &format_target_lines(targets))?;
    outreach_info!("Wrote {} targets to {:?}", targets.len(), path);
    Ok(())
}
