use kuchiki::NodeRef;
use maud::{PreEscaped, html};

use crate::builtin::{
    CHECK_ICON, CLIPBOARD_ICON, COPY_BUTTON_STYLE, COPY_BUTTON_TITLE, COPY_IDLE_BACKGROUND,
    COPY_MARKER_ATTR, COPY_MARKER_EXISTING, COPY_MARKER_INJECTED, COPY_SUCCESS_BACKGROUND,
};
use crate::dom;
use crate::host::Host;
use crate::page::{ClickAction, Page};

fn build_button(class: &str) -> Option<NodeRef> {
    let markup = html! {
        button type="button" class=(class) title=(COPY_BUTTON_TITLE) style=(COPY_BUTTON_STYLE) {
            (PreEscaped(CLIPBOARD_ICON))
        }
    };
    dom::parse_element(&markup.into_string())
}

/// Appends a copy button to the container of every code block that does not
/// have one yet. Returns the number of buttons created by this call.
pub fn inject<H: Host>(page: &Page<H>) -> usize {
    let cfg = page.config();
    let class_selector = format!(".{}", cfg.copy_button_class);
    let mut created = 0;

    for block in dom::select_all(page.document(), &cfg.copy_target_selector) {
        if dom::attr(&block, COPY_MARKER_ATTR).is_some() {
            continue;
        }
        let Some(container) = block.parent() else {
            continue;
        };
        // One button per container, including buttons the page shipped with.
        if dom::select_first(&container, &class_selector).is_some() {
            dom::set_attr(&block, COPY_MARKER_ATTR, COPY_MARKER_EXISTING);
            continue;
        }
        let Some(button) = build_button(&cfg.copy_button_class) else {
            continue;
        };

        container.append(button.clone());
        dom::set_attr(&block, COPY_MARKER_ATTR, COPY_MARKER_INJECTED);
        page.on_click(
            &button,
            ClickAction::CopyCode {
                block: block.clone(),
                button: button.clone(),
            },
        );
        created += 1;
    }

    if created > 0 {
        tracing::debug!(created, "copy buttons injected");
    }
    created
}

pub fn show_success(button: &NodeRef) {
    dom::set_inner_html(button, CHECK_ICON);
    dom::set_style_property(button, "background-color", COPY_SUCCESS_BACKGROUND);
}

pub fn show_idle(button: &NodeRef) {
    dom::set_inner_html(button, CLIPBOARD_ICON);
    dom::set_style_property(button, "background-color", COPY_IDLE_BACKGROUND);
}

/// Click handler: copies the block's text, then flashes the success state
/// for the configured delay. The revert goes through `Host::schedule`;
/// overlapping reverts are not coalesced.
pub async fn copy<H: Host>(page: &Page<H>, block: &NodeRef, button: &NodeRef) {
    let text = block.text_contents();
    match page.host().write_clipboard(text).await {
        Ok(()) => {
            show_success(button);
            let button = button.clone();
            let delay = page.config().copy_feedback();
            page.host().schedule(delay, Box::new(move || show_idle(&button)));
        }
        Err(err) => {
            page.host()
                .console_error(&format!("Failed to copy code: {err:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnhanceConfig;
    use crate::host::HeadlessHost;

    const NOTEBOOK: &str = r#"<div class="input_area"><pre><code>x = 1
y = 2</code></pre></div>
<div class="input_area"><pre>print(x)</pre></div>
<pre>outside</pre>"#;

    #[test]
    fn one_button_per_block_and_idempotent() {
        let page = Page::parse(NOTEBOOK, HeadlessHost::default(), EnhanceConfig::default());
        assert_eq!(inject(&page), 2);
        assert_eq!(inject(&page), 0);

        let buttons = dom::select_all(page.document(), ".copy-btn");
        assert_eq!(buttons.len(), 2);
        for button in &buttons {
            let container = button.parent().unwrap();
            assert!(dom::has_class(&container, "input_area"));
            assert_eq!(container.last_child().as_ref(), Some(button));
            assert_eq!(dom::attr(button, "title").as_deref(), Some("Copy code"));
        }
        assert_eq!(page.listener_count(), 2);
    }

    #[test]
    fn existing_button_is_kept() {
        let html = r#"<div class="input_area"><pre>a</pre><button class="copy-btn">c</button></div>"#;
        let page = Page::parse(html, HeadlessHost::default(), EnhanceConfig::default());
        assert_eq!(inject(&page), 0);
        assert_eq!(dom::select_all(page.document(), ".copy-btn").len(), 1);
        let block = dom::select_first(page.document(), "pre").unwrap();
        assert_eq!(
            dom::attr(&block, COPY_MARKER_ATTR).as_deref(),
            Some(COPY_MARKER_EXISTING)
        );
        assert_eq!(page.listener_count(), 0);
    }

    #[test]
    fn success_and_idle_states_swap_icon_and_color() {
        let button = build_button("copy-btn").unwrap();
        assert_eq!(
            dom::style_property(&button, "background-color").as_deref(),
            Some(COPY_IDLE_BACKGROUND)
        );

        show_success(&button);
        assert!(dom::select_first(&button, "svg.bi-check").is_some());
        assert_eq!(
            dom::style_property(&button, "background-color").as_deref(),
            Some(COPY_SUCCESS_BACKGROUND)
        );

        show_idle(&button);
        assert!(dom::select_first(&button, "svg.bi-clipboard").is_some());
        assert!(dom::select_first(&button, "svg.bi-check").is_none());
    }
}
