use crate::error::PlaybackError;
use crate::graph::edge::EdgeKey;
use crate::state::result::SolverResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTiming {
    pub hold: Duration,
    pub pause: Duration,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            hold: Duration::from_millis(800),
            pause: Duration::from_millis(200),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    Highlight {
        run: RunId,
        step: usize,
        path: Vec<EdgeKey>,
    },
    Unhighlight {
        run: RunId,
        step: usize,
        path: Vec<EdgeKey>,
    },
    Finished {
        run: RunId,
        cancelled: bool,
    },
}

impl PlaybackEvent {
    pub fn run(&self) -> RunId {
        match self {
            PlaybackEvent::Highlight { run, .. }
            | PlaybackEvent::Unhighlight { run, .. }
            | PlaybackEvent::Finished { run, .. } => *run,
        }
    }
}

struct ActiveRun {
    id: RunId,
    cancel: Arc<AtomicBool>,
}

/// Replays augmenting paths one at a time. At most one run is live.
pub struct PlaybackController {
    timing: PlaybackTiming,
    active: Option<ActiveRun>,
    last_run: u64,
}

impl PlaybackController {
    pub fn new(timing: PlaybackTiming) -> Self {
        Self {
            timing,
            active: None,
            last_run: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Whether events from `run` should still be applied.
    pub fn is_current(&self, run: RunId) -> bool {
        self.active.as_ref().is_some_and(|a| a.id == run)
    }

    /// Spawns the timed sequence. Must be called from within a tokio runtime.
    pub fn start(
        &mut self,
        result: Option<&Arc<SolverResult>>,
        events: UnboundedSender<PlaybackEvent>,
    ) -> Result<RunId, PlaybackError> {
        if self.is_running() {
            return Err(PlaybackError::AlreadyRunning);
        }
        let result = match result {
            Some(r) if !r.steps().is_empty() => Arc::clone(r),
            _ => return Err(PlaybackError::NothingToAnimate),
        };

        self.last_run += 1;
        let id = RunId(self.last_run);
        let cancel = Arc::new(AtomicBool::new(false));
        self.active = Some(ActiveRun {
            id,
            cancel: Arc::clone(&cancel),
        });
        info!(?id, steps = result.steps().len(), "playback started");
        tokio::spawn(run(id, result, self.timing, cancel, events));
        Ok(id)
    }

    /// Stops issuing highlights. The caller clears whatever is still lit.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                active.cancel.store(true, Ordering::SeqCst);
                info!(id = ?active.id, "playback cancelled");
                true
            }
            None => false,
        }
    }

    /// Marks `run` as done once its `Finished` event has been received.
    pub fn finish(&mut self, run: RunId) {
        if self.is_current(run) {
            self.active = None;
        }
    }
}

async fn run(
    id: RunId,
    result: Arc<SolverResult>,
    timing: PlaybackTiming,
    cancel: Arc<AtomicBool>,
    events: UnboundedSender<PlaybackEvent>,
) {
    let mut cancelled = false;
    for (step, s) in result.steps().iter().enumerate() {
        if cancel.load(Ordering::SeqCst) {
            cancelled = true;
            break;
        }
        let path = s.path().to_vec();
        debug!(?id, step, "highlighting step");
        if events
            .send(PlaybackEvent::Highlight {
                run: id,
                step,
                path: path.clone(),
            })
            .is_err()
        {
            return;
        }
        tokio::time::sleep(timing.hold).await;
        if events
            .send(PlaybackEvent::Unhighlight { run: id, step, path })
            .is_err()
        {
            return;
        }
        tokio::time::sleep(timing.pause).await;
    }
    let _ = events.send(PlaybackEvent::Finished { run: id, cancelled });
}
