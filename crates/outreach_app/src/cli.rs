use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Finds blog posts, drafts backlink comments and simulates bulk posting.
///
/// Bulk runs never contact the target sites: every outcome is simulated and
/// the comment text is meant to be pasted by hand.
#[derive(Parser, Debug)]
#[command(name = "outreach", version, about, long_about = None)]
pub struct CliArgs {
    /// API key for the generative-AI service.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Model used for search and comment generation.
    #[arg(long, default_value = "gemini-2.5-flash", global = true)]
    pub model: String,

    /// Base URL of the generative-AI service.
    #[arg(
        long,
        default_value = "https://generativelanguage.googleapis.com",
        global = true
    )]
    pub api_base: String,

    /// Settings file; defaults to the user config directory.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::File, global = true)]
    pub log: LogDestination,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for candidate blog posts.
    Search(SearchArgs),
    /// Generate a comment that links to the target URL.
    Generate(GenerateArgs),
    /// Simulate posting the saved comment to every target in a file.
    Run(RunArgs),
    /// Show or change saved settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Topic keyword; empty searches any topic.
    #[arg(long, default_value = "")]
    pub keyword: String,

    /// Number of posts to ask for.
    #[arg(long, default_value_t = 10)]
    pub count: usize,

    /// Keep only URLs that look like individual posts.
    #[arg(long, default_value_t = false)]
    pub articles_only: bool,

    /// Write results to this target file.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Comma-separated keywords; defaults to the saved ones.
    #[arg(long)]
    pub keywords: Option<String>,

    /// URL the comment should link to; defaults to the saved one.
    #[arg(long)]
    pub link: Option<String>,

    /// Tone of the comment, e.g. "casual" or "professional".
    #[arg(long)]
    pub tone: Option<String>,

    /// Save keywords, link and the generated comment.
    #[arg(long, default_value_t = false)]
    pub save: bool,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// File with one `title|url` target per line.
    #[arg(long)]
    pub targets: PathBuf,

    /// Comment text; defaults to the saved comment.
    #[arg(long)]
    pub comment: Option<String>,

    /// Simulated submission time per target, in milliseconds.
    #[arg(long, default_value_t = 1500)]
    pub latency_ms: u64,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the saved settings.
    Show,
    /// Change saved settings; omitted fields keep their value.
    Set {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        keywords: Option<String>,
        #[arg(long)]
        comment: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to ./outreach.log in the current directory.
    File,
    /// Write to the terminal.
    Terminal,
    /// Write to both file and terminal.
    Both,
}

pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
