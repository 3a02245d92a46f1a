//! Runtime bridge between UI command queue and backend event intake.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::{
    ClientSettings, HttpDocumentClient, Notification, Notifier, TracingNotifier, ViewEvent,
    ViewStateController,
};
use crossbeam_channel::{Receiver, SendError, Sender};
use tokio::{sync::broadcast::error::RecvError, task::JoinSet};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Forwards analyze outcomes to the UI, which shows them as a modal. Once the
/// window is gone the outcome is logged instead.
pub(crate) struct ChannelNotifier {
    ui_tx: Sender<UiEvent>,
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(SendError(UiEvent::Notification(notification))) =
            self.ui_tx.send(UiEvent::Notification(notification))
        {
            TracingNotifier.notify(notification);
        }
    }
}

/// Starts the backend thread. The thread exits after `Unmount` (or once every
/// command sender is gone) and any in-flight analyze requests have finished.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: ClientSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.send(UiEvent::Error(UiError::new(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let api = match HttpDocumentClient::from_settings(&settings) {
                Ok(api) => api,
                Err(err) => {
                    let _ = ui_tx.send(UiEvent::Error(UiError::new(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )));
                    tracing::error!("failed to build document api client: {err}");
                    return;
                }
            };
            let notifier = Arc::new(ChannelNotifier {
                ui_tx: ui_tx.clone(),
            });
            let controller = ViewStateController::new(Arc::new(api), notifier);
            tracing::info!(api = %settings.api_base_url, "backend worker ready");
            serve_commands(cmd_rx, ui_tx, controller).await;
        });
    })
}

/// Runs commands against `controller` until unmounted, then waits for
/// outstanding analyze requests so each still produces its notification.
pub(crate) async fn serve_commands(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    controller: Arc<ViewStateController>,
) {
    let mut events = controller.subscribe();
    let events_tx = ui_tx.clone();
    let event_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ViewEvent::StateChanged(state)) => {
                    if events_tx.send(UiEvent::StateChanged(state)).is_err() {
                        tracing::debug!("ui closed; stopping view state forwarding");
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "ui lagged behind view state events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let _ = ui_tx.send(UiEvent::BackendReady);

    let mut analyses = JoinSet::new();
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::FetchDocuments => {
                let controller = controller.clone();
                tokio::spawn(async move { controller.fetch_documents().await });
            }
            BackendCommand::AnalyzeDocument { id } => {
                let controller = controller.clone();
                analyses.spawn(async move {
                    controller.analyze_document(id).await;
                });
            }
            BackendCommand::Unmount => {
                controller.unmount().await;
                break;
            }
        }
    }

    if !analyses.is_empty() {
        tracing::info!(pending = analyses.len(), "waiting for in-flight analyze requests");
    }
    while let Some(joined) = analyses.join_next().await {
        if let Err(err) = joined {
            tracing::warn!("analyze task failed: {err}");
        }
    }
    event_task.abort();
}
