//! Notifier
//!
//! Cloneable sender of [`UiEvent`]s. The receiving side decides how toasts are shown;
//! a dropped receiver silently discards them.

use crossbeam_channel::{Receiver, Sender};

use crate::eventing::{NotificationSeverity, UiEvent};

#[derive(Clone, Debug)]
pub struct Notifier {
    tx: Sender<UiEvent>,
}

impl Notifier {
    pub fn new(tx: Sender<UiEvent>) -> Self {
        Self { tx }
    }

    /// Create a notifier and the receiver its events arrive on
    pub fn channel() -> (Self, Receiver<UiEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }

    pub fn send(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("UI event dropped, no receiver");
        }
    }

    pub fn toast(&self, severity: NotificationSeverity, message: impl Into<std::sync::Arc<str>>) {
        self.send(UiEvent::Toast {
            message: message.into(),
            severity,
        });
    }

    pub fn error(&self, message: impl Into<std::sync::Arc<str>>) {
        self.toast(NotificationSeverity::Error, message);
    }
}
