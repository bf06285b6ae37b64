use crate::model::Target;

/// Delimiter between title and url in the line format.
pub const TARGET_DELIMITER: char = '|';

/// Ordered list of destinations. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetList {
    targets: Vec<Target>,
}

impl TargetList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list.
    pub fn set_targets(&mut self, targets: Vec<Target>) {
        self.targets = targets;
    }

    /// Copies results produced by the blog finder.
    pub fn import_from_source(&mut self, targets: &[Target]) {
        self.set_targets(targets.to_vec());
    }

    /// Replaces the list with the records parsed from `raw`.
    pub fn import_from_text(&mut self, raw: &str) {
        self.set_targets(parse_target_lines(raw));
    }

    pub fn as_slice(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Parses `title|url` lines. Blank lines are skipped; a line without the
/// delimiter becomes a target whose url is the whole line.
pub fn parse_target_lines(raw: &str) -> Vec<Target> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_target_line)
        .collect()
}

fn parse_target_line(line: &str) -> Target {
    match line.split_once(TARGET_DELIMITER) {
        Some((title, url)) => Target::new(title.trim(), url.trim()),
        None => Target::new(String::new(), line),
    }
}

/// Formats targets as one `title|url` record per line.
pub fn format_target_lines(targets: &[Target]) -> String {
    let mut out = String::new();
    for target in targets {
        out.push_str(&target.title);
        out.push(TARGET_DELIMITER);
        out.push_str(&target.url);
        out.push('\n');
    }
    out
}
