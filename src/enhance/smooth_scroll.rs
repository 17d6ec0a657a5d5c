use crate::dom;
use crate::host::Host;
use crate::page::{ClickAction, Page};

/// Registers a smooth-scroll listener on every in-page fragment link.
pub fn install<H: Host>(page: &Page<H>) -> usize {
    let anchors = dom::select_all(page.document(), &page.config().anchor_selector);
    for anchor in &anchors {
        let href = dom::attr(anchor, "href").unwrap_or_default();
        page.on_click(anchor, ClickAction::ScrollToFragment { href });
    }
    anchors.len()
}

/// Resolves `href` (`#section`) as a selector and scrolls the match into
/// view. Unresolvable fragments do nothing.
pub fn scroll_to_fragment<H: Host>(page: &Page<H>, href: &str) -> bool {
    match dom::select_first(page.document(), href) {
        Some(target) => {
            page.host().scroll_into_view(&target);
            true
        }
        None => {
            tracing::debug!(href, "fragment target not found");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnhanceConfig;
    use crate::host::HeadlessHost;

    #[test]
    fn only_fragment_links_are_hooked() {
        let html = r##"<a href="#intro">in</a><a href="/other">out</a><a href="#">top</a><h2 id="intro">Intro</h2>"##;
        let page = Page::parse(html, HeadlessHost::default(), EnhanceConfig::default());
        assert_eq!(install(&page), 2);
        assert!(scroll_to_fragment(&page, "#intro"));
        assert!(!scroll_to_fragment(&page, "#"));
        assert!(!scroll_to_fragment(&page, "#missing"));
    }
}
