//! The browser capabilities the page routines consume.

use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use kuchiki::NodeRef;

use crate::dom;
use crate::highlighter::ClassHighlighter;
use crate::storage::{KeyValueStore, MemoryStore};

pub trait Host {
    /// Black-box syntax highlighter; mutates `code` in place.
    fn highlight(&self, code: &NodeRef);

    fn write_clipboard(&self, text: String) -> impl Future<Output = anyhow::Result<()>>;

    fn storage(&self) -> &dyn KeyValueStore;

    /// Smoothly scrolls `target` into view.
    fn scroll_into_view(&self, target: &NodeRef);

    /// Runs `callback` once after `delay`. No cancellation.
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>);

    fn console_error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// `Host::schedule` for hosts driven from a `tokio::task::LocalSet`.
///
/// Panics outside a `LocalSet`, like `spawn_local`.
pub fn spawn_local_timer(delay: Duration, callback: Box<dyn FnOnce()>) {
    tokio::task::spawn_local(async move {
        tokio::time::sleep(delay).await;
        callback();
    });
}

/// Host for offline rendering: no clipboard, no viewport.
pub struct HeadlessHost {
    highlighter: ClassHighlighter,
    storage: Rc<dyn KeyValueStore>,
}

impl HeadlessHost {
    /// `storage` may be shared by several pages of the same site.
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self {
            highlighter: ClassHighlighter,
            storage,
        }
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(Rc::new(MemoryStore::new()))
    }
}

impl Host for HeadlessHost {
    fn highlight(&self, code: &NodeRef) {
        self.highlighter.highlight(code);
    }

    async fn write_clipboard(&self, _text: String) -> anyhow::Result<()> {
        anyhow::bail!("clipboard is not available in headless rendering")
    }

    fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    fn scroll_into_view(&self, target: &NodeRef) {
        tracing::debug!(
            tag = dom::tag_name(target).unwrap_or_default(),
            id = dom::attr(target, "id").unwrap_or_default(),
            "scroll into view"
        );
    }

    /// The rendered snapshot is written right away, so pending callbacks are
    /// discarded like timers on a page the user navigated away from.
    fn schedule(&self, delay: Duration, _callback: Box<dyn FnOnce()>) {
        tracing::debug!(delay_ms = delay.as_millis() as u64, "discarding timer");
    }
}
