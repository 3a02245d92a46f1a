//! UI/backend events and error modeling for the document list window.

use client_core::{Notification, ViewState};

pub enum UiEvent {
    BackendReady,
    StateChanged(ViewState),
    Notification(Notification),
    Error(UiError),
}

/// Where a window-level error came from. List and analyze failures never
/// reach here; they travel inside `ViewState` and `Notification`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Settings,
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn headline(&self) -> &'static str {
        match self.context {
            UiErrorContext::Settings => {
                "Settings are invalid; fix doclist.toml or the DOCLIST_* variables and relaunch."
            }
            UiErrorContext::BackendStartup => "Backend worker failed to start.",
        }
    }
}
