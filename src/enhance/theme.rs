//! Dark/light theme toggle.
//!
//! The preference lives in the host's key-value store as the literal string
//! `"true"` or `"false"`. Only `"true"` turns the dark class on at startup.

use crate::dom;
use crate::host::Host;
use crate::page::{ClickAction, Page};

/// Hooks the toggle control and restores the saved theme. Returns `false`
/// when the page has no toggle control.
pub fn install<H: Host>(page: &Page<H>) -> bool {
    let cfg = page.config();
    let Some(toggle) = dom::element_by_id(page.document(), &cfg.theme_toggle_id) else {
        return false;
    };
    page.on_click(&toggle, ClickAction::ToggleTheme);

    if read_preference(page) {
        if let Some(body) = dom::body(page.document()) {
            dom::add_class(&body, &cfg.dark_theme_class);
        }
    }
    true
}

pub fn read_preference<H: Host>(page: &Page<H>) -> bool {
    page.host().storage().get(&page.config().storage_key).as_deref() == Some("true")
}

/// Flips the dark class on `<body>` and persists the result.
pub fn toggle<H: Host>(page: &Page<H>) {
    let cfg = page.config();
    let Some(body) = dom::body(page.document()) else {
        return;
    };
    let dark = dom::toggle_class(&body, &cfg.dark_theme_class);
    let value = if dark { "true" } else { "false" };
    if let Err(err) = page.host().storage().set(&cfg.storage_key, value) {
        page.host()
            .console_error(&format!("Failed to save theme preference: {err:#}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnhanceConfig;
    use crate::host::HeadlessHost;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    const PAGE: &str = r#"<body><button id="theme-toggle">Theme</button></body>"#;

    fn page_with(store: MemoryStore) -> Page<HeadlessHost> {
        Page::parse(
            PAGE,
            HeadlessHost::new(Rc::new(store)),
            EnhanceConfig::default(),
        )
    }

    fn is_dark(page: &Page<HeadlessHost>) -> bool {
        dom::has_class(&dom::body(page.document()).unwrap(), "dark-theme")
    }

    #[test]
    fn only_literal_true_restores_dark() {
        for (stored, dark) in [("true", true), ("false", false), ("1", false), ("TRUE", false)] {
            let page = page_with(MemoryStore::with_entry("darkTheme", stored));
            assert!(install(&page));
            assert_eq!(is_dark(&page), dark, "stored {stored:?}");
        }
    }

    #[test]
    fn toggle_persists_resulting_state() {
        let page = page_with(MemoryStore::new());
        install(&page);
        assert!(!is_dark(&page));

        toggle(&page);
        assert!(is_dark(&page));
        assert_eq!(page.host().storage().get("darkTheme").as_deref(), Some("true"));

        toggle(&page);
        assert!(!is_dark(&page));
        assert_eq!(page.host().storage().get("darkTheme").as_deref(), Some("false"));
    }

    #[test]
    fn missing_toggle_leaves_body_alone() {
        let page = Page::parse(
            "<body></body>",
            HeadlessHost::new(Rc::new(MemoryStore::with_entry("darkTheme", "true"))),
            EnhanceConfig::default(),
        );
        assert!(!install(&page));
        assert!(!is_dark(&page));
        assert_eq!(page.listener_count(), 0);
    }
}
