use std::cell::{Cell, RefCell};

use kuchiki::NodeRef;

use crate::config::EnhanceConfig;
use crate::dom;
use crate::enhance::{copy_button, highlight, smooth_scroll, theme, toc};
use crate::host::Host;

/// What a registered click listener does.
#[derive(Debug, Clone)]
pub enum ClickAction {
    CopyCode { block: NodeRef, button: NodeRef },
    ScrollToFragment { href: String },
    ToggleTheme,
    NavigateToSection { id: String },
}

#[derive(Debug, Clone)]
struct Listener {
    target: NodeRef,
    action: ClickAction,
}

/// Counts from the `ready` routines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadyReport {
    pub highlighted: usize,
    pub copy_buttons: usize,
    pub anchors: usize,
    pub theme_toggle: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    pub default_prevented: bool,
    pub handled: usize,
}

/// A parsed page plus the host it runs against.
///
/// `Page` is `!Send`; drive it from a single thread. Delayed work such as
/// the copy button revert goes through `Host::schedule`.
pub struct Page<H: Host> {
    document: NodeRef,
    host: H,
    config: EnhanceConfig,
    listeners: RefCell<Vec<Listener>>,
    ready_fired: Cell<bool>,
    loaded_fired: Cell<bool>,
}

impl<H: Host> Page<H> {
    pub fn parse(html: &str, host: H, config: EnhanceConfig) -> Self {
        Self::from_document(dom::parse_document(html), host, config)
    }

    pub fn from_document(document: NodeRef, host: H, config: EnhanceConfig) -> Self {
        Self {
            document,
            host,
            config,
            listeners: RefCell::new(Vec::new()),
            ready_fired: Cell::new(false),
            loaded_fired: Cell::new(false),
        }
    }

    pub fn document(&self) -> &NodeRef {
        &self.document
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &EnhanceConfig {
        &self.config
    }

    pub fn to_html(&self) -> anyhow::Result<String> {
        dom::serialize(&self.document)
    }

    /// The "content ready" signal: highlight, copy buttons, anchors, theme,
    /// in that order. Fires once; later calls return `None`.
    pub fn ready(&self) -> Option<ReadyReport> {
        if self.ready_fired.replace(true) {
            tracing::debug!("ready already fired");
            return None;
        }
        let report = ReadyReport {
            highlighted: highlight::activate(self),
            copy_buttons: copy_button::inject(self),
            anchors: smooth_scroll::install(self),
            theme_toggle: theme::install(self),
        };
        tracing::debug!(?report, "ready routines done");
        Some(report)
    }

    /// The "fully loaded" signal: builds the table of contents. Returns the
    /// number of TOC entries, or `None` when the signal already fired.
    pub fn loaded(&self) -> Option<usize> {
        if self.loaded_fired.replace(true) {
            tracing::debug!("load already fired");
            return None;
        }
        Some(toc::generate(self))
    }

    pub(crate) fn on_click(&self, target: &NodeRef, action: ClickAction) {
        self.listeners.borrow_mut().push(Listener {
            target: target.clone(),
            action,
        });
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Dispatches a click on `target`, bubbling through its ancestors.
    pub async fn click(&self, target: &NodeRef) -> ClickOutcome {
        let actions: Vec<ClickAction> = {
            let listeners = self.listeners.borrow();
            target
                .inclusive_ancestors()
                .flat_map(|node| {
                    listeners
                        .iter()
                        .filter(move |l| l.target == node)
                        .map(|l| l.action.clone())
                        .collect::<Vec<_>>()
                })
                .collect()
        };

        let mut outcome = ClickOutcome::default();
        for action in actions {
            outcome.handled += 1;
            match action {
                ClickAction::CopyCode { block, button } => {
                    copy_button::copy(self, &block, &button).await;
                }
                ClickAction::ScrollToFragment { href } => {
                    outcome.default_prevented = true;
                    smooth_scroll::scroll_to_fragment(self, &href);
                }
                ClickAction::ToggleTheme => theme::toggle(self),
                ClickAction::NavigateToSection { id } => {
                    outcome.default_prevented = true;
                    self.navigate_to_section(&id);
                }
            }
        }
        outcome
    }

    /// Scrolls the element with `id` into view; no-op when it is absent.
    pub fn navigate_to_section(&self, id: &str) -> bool {
        match dom::element_by_id(&self.document, id) {
            Some(section) => {
                self.host.scroll_into_view(&section);
                true
            }
            None => false,
        }
    }
}
