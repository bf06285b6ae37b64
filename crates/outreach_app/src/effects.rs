use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::StreamExt;
use outreach_core::{Effect, Msg};
use outreach_engine::{BlogFinder, BulkRunner, CommentGenerator, RunHandle, SettingsStore};
use outreach_logging::{outreach_error, outreach_info, outreach_warn};
use tokio::sync::mpsc::UnboundedSender;

/// Executes core effects with the engine and reports back as messages.
///
/// Every spawned task sends at least one message before it ends, so a zero
/// in-flight count with an empty inbox means the session is settled.
pub struct EffectRunner {
    runner: BulkRunner,
    generator: Arc<dyn CommentGenerator>,
    finder: Arc<dyn BlogFinder>,
    store: SettingsStore,
    msg_tx: UnboundedSender<Msg>,
    in_flight: Arc<AtomicUsize>,
    active_run: Option<RunHandle>,
}

impl EffectRunner {
    pub fn new(
        runner: BulkRunner,
        generator: Arc<dyn CommentGenerator>,
        finder: Arc<dyn BlogFinder>,
        store: SettingsStore,
        msg_tx: UnboundedSender<Msg>,
    ) -> Self {
        Self {
            runner,
            generator,
            finder,
            store,
            msg_tx,
            in_flight: Arc::new(AtomicUsize::new(0)),
            active_run: None,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SearchBlogs { keyword, count } => self.search(keyword, count),
                Effect::GenerateComment {
                    keywords,
                    link_target,
                    tone,
                } => self.generate(keywords, link_target, tone),
                Effect::StartRun { targets, comment } => self.start_run(targets, comment),
                Effect::StopRun => {
                    if let Some(handle) = &self.active_run {
                        outreach_info!("Stop requested");
                        handle.stop();
                    }
                }
                Effect::SaveSettings(settings) => {
                    let msg = match self.store.save(&settings) {
                        Ok(()) => Msg::SettingsSaved,
                        Err(err) => {
                            outreach_error!("Failed to save settings: {}", err);
                            Msg::SettingsSaveFailed(err.to_string())
                        }
                    };
                    let _ = self.msg_tx.send(msg);
                }
            }
        }
    }

    fn search(&self, keyword: String, count: usize) {
        let finder = self.finder.clone();
        let tx = self.msg_tx.clone();
        let guard = InFlight::enter(&self.in_flight);
        tokio::spawn(async move {
            let msg = match finder.find_candidates(&keyword, count).await {
                Ok(found) => Msg::SearchCompleted(found),
                Err(err) => {
                    outreach_warn!("Search failed: {}", err);
                    Msg::SearchFailed(err.to_string())
                }
            };
            let _ = tx.send(msg);
            drop(guard);
        });
    }

    fn generate(&self, keywords: String, link_target: String, tone: Option<String>) {
        let generator = self.generator.clone();
        let tx = self.msg_tx.clone();
        let guard = InFlight::enter(&self.in_flight);
        tokio::spawn(async move {
            let msg = match generator
                .generate(&keywords, &link_target, tone.as_deref())
                .await
            {
                Ok(comment) => Msg::CommentGenerated(comment),
                Err(err) => {
                    outreach_warn!("Comment generation failed: {}", err);
                    Msg::CommentFailed(err.to_string())
                }
            };
            let _ = tx.send(msg);
            drop(guard);
        });
    }

    fn start_run(&mut self, targets: Vec<outreach_core::Target>, comment: String) {
        let total = targets.len();
        let mut stream = match self.runner.run(targets, &comment) {
            Ok(stream) => stream,
            Err(err) => {
                outreach_error!("Runner refused to start: {}", err);
                let _ = self.msg_tx.send(Msg::RunFinished { stopped: true });
                return;
            }
        };
        self.active_run = Some(stream.handle());

        let tx = self.msg_tx.clone();
        let guard = InFlight::enter(&self.in_flight);
        tokio::spawn(async move {
            let mut completed = 0usize;
            while let Some(event) = stream.next().await {
                completed += 1;
                let _ = tx.send(Msg::RunStep {
                    entry: event.entry,
                    progress: event.progress,
                });
            }
            let _ = tx.send(Msg::RunFinished {
                stopped: completed < total,
            });
            drop(guard);
        });
    }
}

/// Counts a spawned task from creation until it is dropped.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
