use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Sink for user-visible, transient messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: String);
}

/// Reactive toast state: holds the latest notification only and clears it
/// after `duration_ms`. Rendering is left to the UI layer.
#[derive(Clone, Copy)]
pub struct NotificationCenter {
    current: RwSignal<Option<Notification>>,
    next_id: RwSignal<u64>,
    duration_ms: u32,
}

impl NotificationCenter {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: RwSignal::new(1),
            duration_ms,
        }
    }

    pub fn current(&self) -> Option<Notification> {
        self.current.get()
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, kind: NotificationKind, message: String) {
        log::debug!("notification [{:?}]: {}", kind, message);

        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        // Новое уведомление вытесняет предыдущее
        self.current.set(Some(Notification { id, kind, message }));

        let current = self.current;
        let duration_ms = self.duration_ms;
        spawn_local(async move {
            TimeoutFuture::new(duration_ms).await;
            let still_shown = current.with_untracked(|n| n.as_ref().map(|n| n.id) == Some(id));
            if still_shown {
                current.set(None);
            }
        });
    }
}

/// Collects notifications in memory; used by tests of the session.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub received: std::sync::Mutex<Vec<(NotificationKind, String)>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(NotificationKind, String)> {
        self.received.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<(NotificationKind, String)> {
        self.messages().pop()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, message: String) {
        if let Ok(mut received) = self.received.lock() {
            received.push((kind, message));
        }
    }
}
