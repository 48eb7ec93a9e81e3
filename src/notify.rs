//! User-facing feedback raised by the navigation guard.
//!
//! The guard only says *what* to tell the user and whether it should block;
//! the notifier decides how. In the browser an alert is `window.alert` and a
//! notice goes to the notice bar; natively both are log lines.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use leptos::prelude::{RwSignal, Update};

use crate::state::notices::{NoticeLevel, NoticeState};

/// A message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// Blocking: the user must acknowledge it before anything continues.
    Alert(String),
    /// Non-blocking notification.
    Notice(String),
}

impl Feedback {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Alert(m) | Self::Notice(m) => m,
        }
    }

    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Alert(_))
    }
}

pub trait Notifier {
    fn notify(&self, feedback: Feedback);
}

/// Writes feedback to the log. Used by the CLI and as the native fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, feedback: Feedback) {
        match feedback {
            Feedback::Alert(message) => tracing::warn!(%message, "alert"),
            Feedback::Notice(message) => tracing::info!(%message, "notice"),
        }
    }
}

/// Browser notifier: alerts block via `window.alert`, notices are queued in
/// the shared [`NoticeState`] signal.
#[derive(Clone, Copy, Debug)]
pub struct BrowserNotifier {
    notices: RwSignal<NoticeState>,
}

impl BrowserNotifier {
    #[must_use]
    pub fn new(notices: RwSignal<NoticeState>) -> Self {
        Self { notices }
    }
}

impl Notifier for BrowserNotifier {
    fn notify(&self, feedback: Feedback) {
        match feedback {
            Feedback::Alert(message) => alert(&message),
            Feedback::Notice(message) => {
                self.notices.update(|n| {
                    n.push(NoticeLevel::Warning, message);
                });
            }
        }
    }
}

fn alert(message: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
            return;
        }
    }
    LogNotifier.notify(Feedback::Alert(message.to_owned()));
}
