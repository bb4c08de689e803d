//! Editable text region capability.
//!
//! The session only needs four things from the text surface: set its text,
//! read it, set its CSS font-family, and hear about raw-text changes. Change
//! notifications arrive over an unbounded channel; the returned
//! [`Subscription`] detaches the listener when dropped.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::mpsc;

/// A focusable text surface the editor drives.
pub trait EditableRegion: Send {
    /// Replace the text content. Does not emit a change event.
    fn set_text(&mut self, text: &str);

    /// Current text content.
    fn text(&self) -> String;

    /// Set (or with `None`, remove) the CSS `font-family` property.
    fn set_font_family(&mut self, family: Option<&str>);

    /// Current CSS `font-family` property.
    fn font_family(&self) -> Option<String>;

    /// Start listening for raw-text change events.
    fn subscribe(&mut self) -> (Subscription, mpsc::UnboundedReceiver<String>);
}

/// Scoped change-event subscription.
///
/// The listener is released exactly once, on [`Subscription::release`] or drop.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Detach now instead of at drop.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[derive(Default)]
struct BufferState {
    text: String,
    font_family: Option<String>,
    listeners: Vec<(u64, mpsc::UnboundedSender<String>)>,
    next_listener_id: u64,
}

/// In-memory editable region.
///
/// Clones share the same underlying buffer, so one handle can be given to
/// the session while another plays the part of the user typing.
#[derive(Clone, Default)]
pub struct TextBuffer {
    inner: Arc<Mutex<BufferState>>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate user input: replace the text and emit a change event.
    pub fn input(&self, text: &str) {
        let mut state = self.inner.lock();
        state.text = text.to_string();
        // Listeners whose receiver is gone are pruned on the way.
        state
            .listeners
            .retain(|(_, tx)| tx.send(text.to_string()).is_ok());
    }

    /// Number of attached change listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

impl EditableRegion for TextBuffer {
    fn set_text(&mut self, text: &str) {
        self.inner.lock().text = text.to_string();
    }

    fn text(&self) -> String {
        self.inner.lock().text.clone()
    }

    fn set_font_family(&mut self, family: Option<&str>) {
        self.inner.lock().font_family = family.map(str::to_string);
    }

    fn font_family(&self) -> Option<String> {
        self.inner.lock().font_family.clone()
    }

    fn subscribe(&mut self) -> (Subscription, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = {
            let mut state = self.inner.lock();
            let id = state.next_listener_id;
            state.next_listener_id += 1;
            state.listeners.push((id, tx));
            id
        };

        let weak: Weak<Mutex<BufferState>> = Arc::downgrade(&self.inner);
        let subscription = Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.lock().listeners.retain(|(lid, _)| *lid != id);
            }
        });
        (subscription, rx)
    }
}
