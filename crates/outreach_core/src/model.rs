use std::fmt;

use chrono::{DateTime, Utc};

/// Title used when an imported or discovered target carries none.
pub const DEFAULT_TARGET_TITLE: &str = "Untitled Blog";

/// One destination queued for simulated comment processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub title: String,
    pub url: String,
}

impl Target {
    /// Builds a target, substituting the placeholder for a blank title.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            DEFAULT_TARGET_TITLE.to_string()
        } else {
            title
        };
        Self {
            title,
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Fail,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Fail => write!(f, "fail"),
        }
    }
}

/// Immutable record of one processing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Display key; collision-unlikely, not globally unique.
    pub id: String,
    pub url: String,
    pub status: Outcome,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// The three persisted user fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub target_url: String,
    pub keywords: String,
    pub generated_comment: String,
}

/// `round(completed / total * 100)`, halves rounded up. Zero when `total` is zero.
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    ((completed * 200 + total) / (total * 2)) as u8
}

#[cfg(test)]
mod tests {
    use super::{progress_percent, Target, DEFAULT_TARGET_TITLE};

    #[test]
    fn progress_rounds_half_up() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(1, 8), 13);
        assert_eq!(progress_percent(3, 3), 100);
    }

    #[test]
    fn progress_is_zero_for_empty_total() {
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn blank_title_falls_back_to_placeholder() {
        let target = Target::new("   ", "https://a.example.com");
        assert_eq!(target.title, DEFAULT_TARGET_TITLE);
    }
}
