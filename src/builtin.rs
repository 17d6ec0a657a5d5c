pub const CLIPBOARD_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" fill="currentColor" class="bi bi-clipboard" viewBox="0 0 16 16"><path d="M4 1.5H3a2 2 0 0 0-2 2V14a2 2 0 0 0 2 2h10a2 2 0 0 0 2-2V3.5a2 2 0 0 0-2-2h-1v1h1a1 1 0 0 1 1 1V14a1 1 0 0 1-1 1H3a1 1 0 0 1-1-1V3.5a1 1 0 0 1 1-1h1v-1z"/><path d="M9.5 1a.5.5 0 0 1 .5.5v1a.5.5 0 0 1-.5.5h-3a.5.5 0 0 1-.5-.5v-1a.5.5 0 0 1 .5-.5h3zm-3-1A1.5 1.5 0 0 0 5 1.5v1A1.5 1.5 0 0 0 6.5 4h3A1.5 1.5 0 0 0 11 2.5v-1A1.5 1.5 0 0 0 9.5 0h-3z"/></svg>"#;

pub const CHECK_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" fill="currentColor" class="bi bi-check" viewBox="0 0 16 16"><path d="M10.97 4.97a.75.75 0 0 1 1.07 1.05l-3.99 4.99a.75.75 0 0 1-1.08.02L4.324 8.384a.75.75 0 1 1 1.06-1.06l2.094 2.093 3.473-4.425a.267.267 0 0 1 .02-.022z"/></svg>"#;

pub const COPY_IDLE_BACKGROUND: &str = "#6c757d";
pub const COPY_SUCCESS_BACKGROUND: &str = "#28a745";

pub const COPY_BUTTON_TITLE: &str = "Copy code";

/// Inline styling of a freshly injected copy button. `right: 60px` leaves
/// room for the notebook's run button.
pub const COPY_BUTTON_STYLE: &str = "position: absolute; top: 5px; right: 60px; padding: 2px 8px; font-size: 12px; background-color: #6c757d; color: white; border: none; border-radius: 3px; cursor: pointer";

/// Marker set on a code block once it owns a copy button.
pub const COPY_MARKER_ATTR: &str = "data-copy-button";
/// Marker values: the button was created here, or the container shipped one.
pub const COPY_MARKER_INJECTED: &str = "injected";
pub const COPY_MARKER_EXISTING: &str = "existing";

pub const TOC_LIST_CLASS: &str = "toc-list";
/// Set on lists built by the TOC generator, as opposed to authored ones.
pub const TOC_GENERATED_ATTR: &str = "data-toc-generated";
