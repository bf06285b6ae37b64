use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use outreach_core::{format_target_lines, update, AppState, Msg, Notice};
use outreach_engine::{
    read_targets_file, write_targets_file, BlogFinder, BulkRunner, CommentGenerator,
    FinderSettings, GeminiBlogFinder, GeminiCommentGenerator, GenAiClient, GenAiSettings,
    RunnerSettings, SettingsStore, SETTINGS_FILENAME,
};
use outreach_logging::{outreach_info, outreach_warn};
use tokio::sync::mpsc;

use crate::cli::{CliArgs, Command, GenerateArgs, RunArgs, SearchArgs, SettingsCommand};
use crate::effects::EffectRunner;
use crate::render::{render_activity_log, summarize, Renderer};

pub async fn run_app(args: CliArgs) -> Result<()> {
    let store = SettingsStore::new(settings_path(args.settings.clone()));
    let genai = GenAiSettings {
        api_key: args.api_key.clone(),
        model: args.model.clone(),
        base_url: args.api_base.clone(),
        ..GenAiSettings::default()
    };

    match args.command {
        Command::Search(search) => run_search(genai, store, search).await,
        Command::Generate(generate) => run_generate(genai, store, generate).await,
        Command::Run(run) => run_bulk(genai, store, run).await,
        Command::Settings(SettingsCommand::Show) => {
            let settings = store.load();
            println!("file:     {}", store.path().display());
            println!("url:      {}", settings.target_url);
            println!("keywords: {}", settings.keywords);
            println!("comment:  {}", settings.generated_comment);
            Ok(())
        }
        Command::Settings(SettingsCommand::Set {
            url,
            keywords,
            comment,
        }) => {
            let mut session = Session::new(genai, store, SessionOptions::default())?;
            session.restore_settings();
            if let Some(url) = url {
                session.send(Msg::TargetUrlChanged(url));
            }
            if let Some(keywords) = keywords {
                session.send(Msg::KeywordsChanged(keywords));
            }
            if let Some(comment) = comment {
                session.send(Msg::CommentChanged(comment));
            }
            session.send(Msg::SaveSettingsClicked);
            session.settle().await
        }
    }
}

async fn run_search(genai: GenAiSettings, store: SettingsStore, args: SearchArgs) -> Result<()> {
    let options = SessionOptions {
        finder: FinderSettings {
            article_only: args.articles_only,
        },
        ..SessionOptions::default()
    };
    let mut session = Session::new(genai, store, options)?;
    session.send(Msg::SearchClicked {
        keyword: args.keyword,
        count: args.count,
    });
    session.settle().await?;

    let found = session.state.view().search_results;
    print!("{}", format_target_lines(&found));

    if let Some(out) = args.out {
        session.send(Msg::UseSearchResultsClicked);
        session.settle().await?;
        write_targets_file(&out, session.state.targets())
            .with_context(|| format!("exporting targets to {}", out.display()))?;
    }
    Ok(())
}

async fn run_generate(
    genai: GenAiSettings,
    store: SettingsStore,
    args: GenerateArgs,
) -> Result<()> {
    let mut session = Session::new(genai, store, SessionOptions::default())?;
    session.restore_settings();
    if let Some(keywords) = args.keywords {
        session.send(Msg::KeywordsChanged(keywords));
    }
    if let Some(link) = args.link {
        session.send(Msg::TargetUrlChanged(link));
    }
    session.send(Msg::GenerateClicked { tone: args.tone });
    session.settle().await?;

    println!("{}", session.state.settings().generated_comment);

    if args.save {
        session.send(Msg::SaveSettingsClicked);
        session.settle().await?;
    }
    Ok(())
}

async fn run_bulk(genai: GenAiSettings, store: SettingsStore, args: RunArgs) -> Result<()> {
    let targets = read_targets_file(&args.targets)
        .with_context(|| format!("importing targets from {}", args.targets.display()))?;

    let options = SessionOptions {
        runner: RunnerSettings {
            simulated_latency: Duration::from_millis(args.latency_ms),
        },
        ..SessionOptions::default()
    };
    let mut session = Session::new(genai, store, options)?;
    session.restore_settings();
    session.send(Msg::TargetsLoaded(targets));
    if let Some(comment) = args.comment {
        session.send(Msg::CommentChanged(comment));
    }
    session.send(Msg::StartRunClicked);
    session.settle().await?;

    let view = session.state.view();
    println!();
    println!("Activity log (newest first):");
    print!("{}", render_activity_log(&view.log_newest_first));
    println!("{}", summarize(session.state.log_entries()));
    println!();
    println!("Comment to paste:");
    println!("{}", view.comment);
    Ok(())
}

fn settings_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join("outreach"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SETTINGS_FILENAME)
    })
}

#[derive(Debug, Clone, Default)]
struct SessionOptions {
    runner: RunnerSettings,
    finder: FinderSettings,
}

/// Owns the application state and feeds it messages, one at a time.
struct Session {
    state: AppState,
    effects: EffectRunner,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
    renderer: Renderer,
    store: SettingsStore,
    errors: Vec<Notice>,
}

impl Session {
    fn new(genai: GenAiSettings, store: SettingsStore, options: SessionOptions) -> Result<Self> {
        let client = GenAiClient::new(genai).context("building HTTP client")?;
        Ok(Self::with_collaborators(
            Arc::new(GeminiCommentGenerator::new(client.clone())),
            Arc::new(GeminiBlogFinder::new(client, options.finder.clone())),
            store,
            options,
        ))
    }

    fn with_collaborators(
        generator: Arc<dyn CommentGenerator>,
        finder: Arc<dyn BlogFinder>,
        store: SettingsStore,
        options: SessionOptions,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let effects = EffectRunner::new(
            BulkRunner::new(options.runner),
            generator,
            finder,
            store.clone(),
            msg_tx,
        );
        Self {
            state: AppState::new(),
            effects,
            msg_rx,
            renderer: Renderer::new(),
            store,
            errors: Vec::new(),
        }
    }

    fn restore_settings(&mut self) {
        let settings = self.store.load();
        self.send(Msg::RestoreSettings(settings));
    }

    fn send(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            for line in self.renderer.render(&state.view()) {
                println!("{line}");
            }
            for notice in state.drain_notices() {
                if notice.is_error() {
                    outreach_warn!("{}", notice);
                    self.errors.push(notice);
                } else {
                    eprintln!("{notice}");
                }
            }
        }
        self.state = state;
        self.effects.enqueue(effects);
    }

    /// Processes messages until no effect is pending. Fails if any step
    /// produced an error notice.
    async fn settle(&mut self) -> Result<()> {
        loop {
            // Tasks send before they leave the in-flight count, so reading it
            // first means an empty inbox below really is the end.
            let idle = self.effects.in_flight() == 0;
            match self.msg_rx.try_recv() {
                Ok(msg) => {
                    self.send(msg);
                    continue;
                }
                Err(_) if idle => break,
                Err(_) => {}
            }

            tokio::select! {
                msg = self.msg_rx.recv() => match msg {
                    Some(msg) => self.send(msg),
                    None => break,
                },
                signal = tokio::signal::ctrl_c() => {
                    signal.context("listening for Ctrl-C")?;
                    if !self.state.is_running() {
                        bail!("interrupted");
                    }
                    outreach_info!("Ctrl-C received; stopping before the next target");
                    eprintln!("stopping before the next target...");
                    self.send(Msg::StopClicked);
                }
            }
        }

        match self.errors.drain(..).next() {
            Some(notice) => Err(anyhow!("{notice}")),
            None => Ok(()),
        }
    }
}
