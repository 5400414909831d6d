//! Process-wide publish/subscribe channel for transient user notices.
//!
//! A component subscribes when it mounts and keeps the returned
//! [`Subscription`]; dropping it unsubscribes.

use std::sync::{mpsc, Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};

use newsfeed_core::NoticeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Default)]
struct Listeners {
    next_id: u64,
    senders: Vec<(u64, mpsc::Sender<Notice>)>,
}

#[derive(Debug, Clone, Default)]
pub struct Notifier {
    inner: Arc<Mutex<Listeners>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared notifier used by the application.
    pub fn global() -> &'static Notifier {
        static GLOBAL: OnceLock<Notifier> = OnceLock::new();
        GLOBAL.get_or_init(Notifier::new)
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let mut listeners = lock(&self.inner);
        listeners.next_id += 1;
        let id = listeners.next_id;
        listeners.senders.push((id, tx));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.inner),
            rx,
        }
    }

    /// Delivers a notice to every live subscriber; returns how many got it.
    pub fn show(&self, kind: NoticeKind, message: impl Into<String>) -> usize {
        let notice = Notice {
            kind,
            message: message.into(),
        };
        let mut listeners = lock(&self.inner);
        listeners
            .senders
            .retain(|(_, tx)| tx.send(notice.clone()).is_ok());
        listeners.senders.len()
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).senders.len()
    }
}

#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
    rx: mpsc::Receiver<Notice>,
}

impl Subscription {
    pub fn try_recv(&self) -> Option<Notice> {
        self.rx.try_recv().ok()
    }

    pub fn drain(&self) -> Vec<Notice> {
        self.rx.try_iter().collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).senders.retain(|(id, _)| *id != self.id);
        }
    }
}

fn lock(listeners: &Mutex<Listeners>) -> MutexGuard<'_, Listeners> {
    listeners.lock().unwrap_or_else(PoisonError::into_inner)
}
