use chrono::Local;
use outreach_core::{AppViewModel, LogEntry, Outcome};

/// Turns successive view models into terminal lines, printing each log
/// entry once as it arrives.
#[derive(Debug, Default)]
pub struct Renderer {
    shown_entries: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();
        let run = &view.run;
        let recorded = view.log_newest_first.len();
        if recorded < self.shown_entries {
            // A new run cleared the log.
            self.shown_entries = 0;
        }
        if recorded > self.shown_entries {
            // Newest-first: the unseen entries are at the front, oldest of them last.
            let fresh = recorded - self.shown_entries;
            for (offset, entry) in view.log_newest_first[..fresh].iter().rev().enumerate() {
                let position = self.shown_entries + offset + 1;
                lines.push(format!(
                    "[{:>3}%] {}/{} {}",
                    progress_at(position, run.total, run.progress, position == recorded),
                    position,
                    run.total,
                    format_entry(entry)
                ));
            }
            self.shown_entries = recorded;
        }
        lines
    }
}

fn progress_at(position: usize, total: usize, current: u8, is_latest: bool) -> u8 {
    if is_latest {
        current
    } else {
        outreach_core::progress_percent(position, total)
    }
}

pub fn format_entry(entry: &LogEntry) -> String {
    let status = match entry.status {
        Outcome::Success => "OK  ",
        Outcome::Fail => "FAIL",
    };
    format!("{status} {} - {}", entry.url, entry.message)
}

/// The activity log as shown after a run, newest first.
pub fn render_activity_log(entries_newest_first: &[LogEntry]) -> String {
    let mut out = String::new();
    for entry in entries_newest_first {
        let local = entry.timestamp.with_timezone(&Local);
        out.push_str(&format!(
            "{} {}\n",
            local.format("%Y-%m-%d %H:%M:%S"),
            format_entry(entry)
        ));
    }
    out
}

pub fn summarize(entries: &[LogEntry]) -> String {
    let succeeded = entries
        .iter()
        .filter(|e| e.status == Outcome::Success)
        .count();
    let failed = entries.len() - succeeded;
    format!("{succeeded} prepared, {failed} failed (simulated; nothing was posted)")
}
