use crate::{Settings, Target};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SearchBlogs {
        keyword: String,
        count: usize,
    },
    GenerateComment {
        keywords: String,
        link_target: String,
        tone: Option<String>,
    },
    StartRun {
        targets: Vec<Target>,
        comment: String,
    },
    StopRun,
    SaveSettings(Settings),
}
