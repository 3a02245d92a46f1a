//! View-state controller for the document list page.
//!
//! Owns the document collection, the loading flag and the list error, and
//! mediates between the rendered view and a [`DocumentApi`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared::domain::{DocumentId, DocumentMeta};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::DocumentApi;

pub const LIST_FALLBACK_MESSAGE: &str = "failed to load documents";
pub const ANALYZE_FALLBACK_MESSAGE: &str = "analysis failed";

const VIEW_EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub documents: Vec<DocumentMeta>,
    pub loading: bool,
    /// Empty when no error is active.
    pub error: String,
}

/// Outcome of an analyze request. Exactly one is emitted per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    AnalysisStarted { id: DocumentId },
    AnalysisFailed { id: DocumentId, message: String },
}

impl Notification {
    pub fn id(&self) -> DocumentId {
        match self {
            Self::AnalysisStarted { id } | Self::AnalysisFailed { id, .. } => *id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::AnalysisStarted { .. })
    }

    pub fn text(&self) -> String {
        match self {
            Self::AnalysisStarted { .. } => "analysis started".to_string(),
            Self::AnalysisFailed { message, .. } => format!("analysis failed: {message}"),
        }
    }
}

/// Synchronous user-facing notification channel (modal, toast, log line).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        if notification.is_success() {
            info!(document_id = notification.id().0, "{}", notification.text());
        } else {
            warn!(document_id = notification.id().0, "{}", notification.text());
        }
    }
}

#[derive(Debug, Clone)]
pub enum ViewEvent {
    StateChanged(ViewState),
}

/// Never held across an `.await`.
struct ControllerInner {
    state: ViewState,
    /// Tag of the most recently started list fetch.
    generation: u64,
    mounted: bool,
}

pub struct ViewStateController {
    api: Arc<dyn DocumentApi>,
    notifier: Arc<dyn Notifier>,
    inner: Mutex<ControllerInner>,
    events: broadcast::Sender<ViewEvent>,
}

impl ViewStateController {
    /// Creates a mounted controller with empty state. Call [`Self::mount`] to
    /// run the initial fetch.
    pub fn new(api: Arc<dyn DocumentApi>, notifier: Arc<dyn Notifier>) -> Arc<Self> {
        let (events, _) = broadcast::channel(VIEW_EVENT_CAPACITY);
        Arc::new(Self {
            api,
            notifier,
            inner: Mutex::new(ControllerInner {
                state: ViewState::default(),
                generation: 0,
                mounted: true,
            }),
            events,
        })
    }

    pub async fn mount(&self) {
        self.fetch_documents().await;
    }

    /// Stops all further list-state mutation. In-flight fetches complete on
    /// the wire but their results are dropped; analyze outcomes are still
    /// delivered to the notifier.
    pub async fn unmount(&self) {
        let mut inner = self.lock_inner();
        inner.mounted = false;
        debug!(generation = inner.generation, "view unmounted");
    }

    pub async fn is_mounted(&self) -> bool {
        self.lock_inner().mounted
    }

    pub async fn snapshot(&self) -> ViewState {
        self.lock_inner().state.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.events.subscribe()
    }

    fn lock_inner(&self) -> MutexGuard<'_, ControllerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &ViewState) {
        let _ = self.events.send(ViewEvent::StateChanged(state.clone()));
    }

    /// Reloads the document list.
    ///
    /// Overlapping calls are allowed; only the most recently started fetch may
    /// apply its result and clear `loading`. Older responses are discarded.
    /// Dropping the future of the newest fetch before it completes clears
    /// `loading` without touching documents or error.
    pub async fn fetch_documents(&self) {
        let generation = {
            let mut inner = self.lock_inner();
            if !inner.mounted {
                debug!("fetch requested after unmount; ignoring");
                return;
            }
            inner.generation += 1;
            inner.state.loading = true;
            inner.state.error.clear();
            self.publish(&inner.state);
            inner.generation
        };

        let mut pending = PendingFetch {
            controller: self,
            generation,
            settled: false,
        };
        let result = self.api.list_documents().await;
        pending.settled = true;

        let mut inner = self.lock_inner();
        if !inner.mounted {
            debug!(generation, "dropping document list response after unmount");
            return;
        }
        if inner.generation != generation {
            debug!(
                generation,
                current = inner.generation,
                "dropping stale document list response"
            );
            return;
        }

        match result {
            Ok(documents) => {
                info!(generation, count = documents.len(), "document list loaded");
                inner.state.documents = documents;
            }
            Err(err) => {
                warn!(generation, error = %err, "document list fetch failed");
                inner.state.error = err.user_message(LIST_FALLBACK_MESSAGE);
            }
        }
        inner.state.loading = false;
        self.publish(&inner.state);
    }

    /// Asks the backend to start analysis of `id` and reports the outcome
    /// through the notifier. List state is never touched.
    pub async fn analyze_document(&self, id: DocumentId) -> Notification {
        let notification = match self.api.analyze_document(id).await {
            Ok(()) => Notification::AnalysisStarted { id },
            Err(err) => {
                warn!(document_id = id.0, error = %err, "analyze request failed");
                Notification::AnalysisFailed {
                    id,
                    message: err.user_message(ANALYZE_FALLBACK_MESSAGE),
                }
            }
        };

        self.notifier.notify(notification.clone());
        notification
    }
}

/// Clears `loading` when the newest fetch is cancelled mid-request.
struct PendingFetch<'a> {
    controller: &'a ViewStateController,
    generation: u64,
    settled: bool,
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut inner = self.controller.lock_inner();
        if !inner.mounted || inner.generation != self.generation {
            return;
        }
        debug!(generation = self.generation, "document list fetch cancelled");
        inner.state.loading = false;
        self.controller.publish(&inner.state);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
