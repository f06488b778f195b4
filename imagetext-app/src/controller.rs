use std::sync::Arc;

use imagetext_core::stage::StagePlan;
use imagetext_core::text::preview_text;
use imagetext_core::types::ImageSource;
use imagetext_engine::engine::ImagetextEngine;
use imagetext_engine::session::{SessionOutcome, SessionStatus as ResultStatus};
use imagetext_engine::traits::StageUpdate;
use tokio::sync::{Mutex, broadcast};

/// Where the surface currently is in its lifecycle.
///
/// `Complete`, `Cancelled` and `Failed` are all ready states: a new start is
/// allowed from any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Running,
    Complete,
    Cancelled,
    Failed,
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionStatusPayload {
    pub status: SessionStatus,
    pub stage_label: Option<String>,
    pub progress: u8,
    pub is_running: bool,
    pub error: Option<String>,
    pub last_result_preview: Option<String>,
    pub last_result_available: bool,
}

/// Notifications pushed to the presentation layer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Stage { label: String, progress: u8 },
    Completed(SessionOutcome),
    Failed(String),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A session is already running; the request was ignored.
    Busy,
    /// The input was unusable (empty selection or blank prompt).
    Rejected,
}

#[derive(Default)]
struct Inner {
    status: SessionStatus,
    stage_label: Option<String>,
    progress: u8,
    status_message: Option<String>,
    last_outcome: Option<SessionOutcome>,
    session_id: u64,

    // The in-flight engine run. Held so cancel/reset can abort it, which
    // clears every pending stage timer at once.
    processing_task: Option<tokio::task::JoinHandle<()>>,
}

/// The staged processing simulator's state machine.
///
/// Owns the single-session invariant: at most one session is Running at a
/// time, starting while Running is a no-op, and cancellation both aborts the
/// background task and bumps the session id so results or stage updates from
/// a dead session can never leak into the next one.
#[derive(Clone)]
pub struct SessionController {
    engine: Arc<ImagetextEngine>,
    inner: Arc<Mutex<Inner>>,
    events: broadcast::Sender<SessionEvent>,
}

enum SessionRequest {
    Extraction(ImageSource),
    Generation(String),
}

impl SessionController {
    const EVENT_CAPACITY: usize = 64;

    pub fn new(engine: Arc<ImagetextEngine>) -> Self {
        let (events, _) = broadcast::channel(Self::EVENT_CAPACITY);
        Self {
            engine,
            inner: Arc::new(Mutex::new(Inner::default())),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn status(&self) -> SessionStatusPayload {
        let inner = self.inner.lock().await;

        let last_result_preview = inner
            .last_outcome
            .as_ref()
            .map(|o| preview_text(o.summary()));

        SessionStatusPayload {
            status: inner.status,
            stage_label: inner.stage_label.clone(),
            progress: inner.progress,
            is_running: inner.status == SessionStatus::Running,
            error: inner.status_message.clone(),
            last_result_available: last_result_preview
                .as_ref()
                .map(|p| !p.is_empty())
                .unwrap_or(false),
            last_result_preview,
        }
    }

    /// Starts an extraction session. A no-op while another session runs.
    pub async fn start_extraction(&self, source: ImageSource, plan: StagePlan) -> StartOutcome {
        if source.is_empty() {
            return self.reject("No image selected.").await;
        }
        self.start(SessionRequest::Extraction(source), plan).await
    }

    /// Starts a generation session. A no-op while another session runs.
    pub async fn start_generation(&self, prompt: impl Into<String>, plan: StagePlan) -> StartOutcome {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return self.reject("Please enter a prompt first.").await;
        }
        self.start(SessionRequest::Generation(prompt), plan).await
    }

    async fn start(&self, request: SessionRequest, plan: StagePlan) -> StartOutcome {
        let session_id = {
            let mut inner = self.inner.lock().await;

            if inner.status == SessionStatus::Running {
                log::info!("start ignored: session already running");
                return StartOutcome::Busy;
            }

            inner.session_id = inner.session_id.wrapping_add(1);
            inner.status = SessionStatus::Running;
            inner.stage_label = None;
            inner.progress = 0;
            inner.status_message = None;
            inner.last_outcome = None;
            inner.session_id
        };

        let controller = self.clone();
        let controller_for_hook = self.clone();

        let handle = tokio::spawn(async move {
            let hook = move |stage: StageUpdate| {
                let controller = controller_for_hook.clone();
                async move {
                    controller.note_stage(session_id, stage).await;
                }
            };

            let res = match &request {
                SessionRequest::Extraction(source) => {
                    controller
                        .engine
                        .run_extraction_with_hook(source.clone(), &plan, hook)
                        .await
                }
                SessionRequest::Generation(prompt) => {
                    controller
                        .engine
                        .run_generation_with_hook(prompt, &plan, hook)
                        .await
                }
            };

            controller.finish(session_id, res).await;
        });

        {
            let mut inner = self.inner.lock().await;
            if let Some(prev) = inner.processing_task.take() {
                prev.abort();
            }
            inner.processing_task = Some(handle);
        }

        StartOutcome::Started
    }

    /// Cancels the running session, discarding all pending stage timers.
    /// Safe to call when nothing is running.
    pub async fn cancel(&self) {
        let task = {
            let mut inner = self.inner.lock().await;

            if inner.status != SessionStatus::Running {
                return;
            }

            // Bump the session id so any in-flight update from the aborted
            // task can't win.
            inner.session_id = inner.session_id.wrapping_add(1);
            inner.status = SessionStatus::Cancelled;
            inner.stage_label = None;
            inner.progress = 0;
            inner.processing_task.take()
        };

        if let Some(task) = task {
            task.abort();
        }

        log::info!("session cancelled");
        let _ = self.events.send(SessionEvent::Cancelled);
    }

    /// Cancels any running session and returns the surface to Idle, clearing
    /// the stored result.
    pub async fn reset(&self) {
        self.cancel().await;

        let mut inner = self.inner.lock().await;
        inner.status = SessionStatus::Idle;
        inner.stage_label = None;
        inner.progress = 0;
        inner.status_message = None;
        inner.last_outcome = None;
    }

    async fn reject(&self, message: &str) -> StartOutcome {
        {
            let mut inner = self.inner.lock().await;
            if inner.status == SessionStatus::Running {
                log::info!("start ignored: session already running");
                return StartOutcome::Busy;
            }
            inner.status_message = Some(message.to_string());
        }

        log::warn!("session rejected: {message}");
        let _ = self.events.send(SessionEvent::Failed(message.to_string()));
        StartOutcome::Rejected
    }

    async fn note_stage(&self, session_id: u64, stage: StageUpdate) {
        {
            let mut inner = self.inner.lock().await;
            // Don't let stale updates leak into a cancelled/new session.
            if inner.session_id != session_id || inner.status != SessionStatus::Running {
                return;
            }
            inner.stage_label = Some(stage.label.clone());
            inner.progress = stage.progress;
        }

        log::info!("session stage: {} ({}%)", stage.label, stage.progress);
        let _ = self.events.send(SessionEvent::Stage {
            label: stage.label,
            progress: stage.progress,
        });
    }

    async fn finish(
        &self,
        session_id: u64,
        res: anyhow::Result<imagetext_engine::session::SessionResult>,
    ) {
        let event = {
            let mut inner = self.inner.lock().await;
            if inner.session_id != session_id {
                // Cancelled or replaced while we were finishing.
                return;
            }
            inner.processing_task = None;

            match res {
                Ok(result) if result.status == ResultStatus::Complete => {
                    match result.outcome {
                        Some(outcome) => {
                            inner.status = SessionStatus::Complete;
                            inner.last_outcome = Some(outcome.clone());
                            SessionEvent::Completed(outcome)
                        }
                        None => {
                            // A complete result always carries an outcome;
                            // treat anything else as a failure.
                            let msg = "session completed without a result".to_string();
                            inner.status = SessionStatus::Failed;
                            inner.status_message = Some(msg.clone());
                            SessionEvent::Failed(msg)
                        }
                    }
                }
                Ok(result) => {
                    let msg = result
                        .error
                        .unwrap_or_else(|| "session failed".to_string());
                    inner.status = SessionStatus::Failed;
                    inner.status_message = Some(msg.clone());
                    SessionEvent::Failed(msg)
                }
                Err(e) => {
                    let msg = e.to_string();
                    inner.status = SessionStatus::Failed;
                    inner.status_message = Some(msg.clone());
                    SessionEvent::Failed(msg)
                }
            }
        };

        match &event {
            SessionEvent::Completed(_) => log::info!("session complete"),
            SessionEvent::Failed(msg) => log::error!("session failed: {msg}"),
            _ => {}
        }
        let _ = self.events.send(event);
    }
}
