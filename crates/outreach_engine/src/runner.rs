//! Sequential, simulated bulk processing of targets.
//!
//! The runner never contacts the targets. Each step waits for a fixed
//! latency, draws an outcome and reports it; "success" means the comment is
//! ready to be pasted by hand.

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use chrono::Utc;
use futures_util::stream::{self, BoxStream, Stream};
use outreach_core::{check_run_preconditions, progress_percent, LogEntry, Outcome, RunError, Target};
use outreach_logging::{outreach_debug, outreach_info};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::sampler::{OutcomeSampler, RandomSampler};

pub const SUCCESS_MESSAGE: &str =
    "Comment prepared for manual posting (simulated; no request was sent)";
pub const FAIL_MESSAGE: &str =
    "Simulated failure: target treated as unreachable (no request was sent)";

const MIN_LATENCY: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct RunnerSettings {
    /// Stand-in for network submission time, applied before every outcome.
    pub simulated_latency: Duration,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            simulated_latency: Duration::from_millis(1500),
        }
    }
}

/// One processed target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEvent {
    /// Zero-based position of the target in the run.
    pub index: usize,
    pub total: usize,
    pub target: Target,
    pub entry: LogEntry,
    pub progress: u8,
}

/// Cooperative stop control for a live run.
#[derive(Debug, Clone)]
pub struct RunHandle {
    cancel: CancellationToken,
}

impl RunHandle {
    /// Halts the run before the next unprocessed target.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Lazy stream of `RunEvent`s, one per target, in list order.
pub struct RunStream {
    inner: BoxStream<'static, RunEvent>,
    handle: RunHandle,
}

impl RunStream {
    pub fn handle(&self) -> RunHandle {
        self.handle.clone()
    }
}

impl Stream for RunStream {
    type Item = RunEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Starts runs and enforces that only one is live at a time.
#[derive(Debug, Clone, Default)]
pub struct BulkRunner {
    settings: RunnerSettings,
    running: Arc<AtomicBool>,
}

impl BulkRunner {
    pub fn new(settings: RunnerSettings) -> Self {
        Self {
            settings,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Runs with the default weighted random sampler.
    pub fn run(&self, targets: Vec<Target>, comment: &str) -> Result<RunStream, RunError> {
        self.run_with(targets, comment, RandomSampler::new())
    }

    /// Runs with an injected outcome sampler.
    ///
    /// Preconditions are checked before anything is scheduled; a rejected call
    /// changes nothing.
    pub fn run_with<S>(
        &self,
        targets: Vec<Target>,
        comment: &str,
        sampler: S,
    ) -> Result<RunStream, RunError>
    where
        S: OutcomeSampler + 'static,
    {
        check_run_preconditions(self.is_running(), &targets, comment)?;
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| RunError::RunAlreadyInProgress)?;

        let cancel = CancellationToken::new();
        let total = targets.len();
        outreach_info!(
            "Bulk run started: targets={} comment_len={}",
            total,
            comment.len()
        );

        let state = RunLoop {
            targets,
            next: 0,
            latency: self.settings.simulated_latency.max(MIN_LATENCY),
            sampler: Box::new(sampler),
            cancel: cancel.clone(),
            guard: Some(RunningGuard(self.running.clone())),
        };

        Ok(RunStream {
            inner: Box::pin(stream::unfold(state, step)),
            handle: RunHandle { cancel },
        })
    }
}

struct RunLoop {
    targets: Vec<Target>,
    next: usize,
    latency: Duration,
    sampler: Box<dyn OutcomeSampler>,
    cancel: CancellationToken,
    /// Taken before the last event is yielded; otherwise dropped with the loop.
    guard: Option<RunningGuard>,
}

/// Releases the runner when the stream ends or is dropped.
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

async fn step(mut state: RunLoop) -> Option<(RunEvent, RunLoop)> {
    let total = state.targets.len();
    let Some(target) = state.targets.get(state.next).cloned() else {
        outreach_info!("Bulk run finished: targets={}", total);
        return None;
    };
    if state.cancel.is_cancelled() {
        outreach_info!("Bulk run stopped after {} of {} targets", state.next, total);
        return None;
    }

    tokio::select! {
        _ = state.cancel.cancelled() => {
            outreach_info!("Bulk run stopped after {} of {} targets", state.next, total);
            return None;
        }
        _ = tokio::time::sleep(state.latency) => {}
    }

    let status = state.sampler.sample();
    let index = state.next;
    state.next += 1;
    let progress = progress_percent(state.next, total);
    if state.next == total {
        state.guard.take();
    }
    outreach_debug!(
        "Target {}/{} url={} outcome={} progress={}",
        state.next,
        total,
        target.url,
        status,
        progress
    );

    let entry = LogEntry {
        id: Uuid::new_v4().to_string(),
        url: target.url.clone(),
        status,
        message: message_for(status).to_string(),
        timestamp: Utc::now(),
    };
    let event = RunEvent {
        index,
        total,
        target,
        entry,
        progress,
    };
    Some((event, state))
}

fn message_for(status: Outcome) -> &'static str {
    match status {
        Outcome::Success => SUCCESS_MESSAGE,
        Outcome::Fail => FAIL_MESSAGE,
    }
}
