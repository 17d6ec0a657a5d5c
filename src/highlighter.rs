use std::sync::LazyLock;

use kuchiki::NodeRef;
use regex::Regex;

use crate::dom;

static LANGUAGE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:lang|language)-([A-Za-z0-9_+#-]+)$").expect("language regex"));

/// Marks code elements the way highlight.js does, without tokenizing.
///
/// Used by the headless host; stylesheets keyed on `.hljs` and
/// `language-*` then apply to pre-rendered pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassHighlighter;

impl ClassHighlighter {
    pub fn highlight(&self, code: &NodeRef) {
        if dom::attr(code, "data-highlighted").is_some() {
            tracing::debug!("element previously highlighted, skipping");
            return;
        }

        if let Some(language) = detect_language(code) {
            dom::add_class(code, &format!("language-{language}"));
        }
        dom::add_class(code, "hljs");
        dom::set_attr(code, "data-highlighted", "yes");
    }
}

/// Language named by a `lang-*`/`language-*` class on the element or its
/// parent `<pre>`.
pub fn detect_language(code: &NodeRef) -> Option<String> {
    let from = |node: &NodeRef| {
        dom::attr(node, "class").and_then(|classes| {
            classes.split_ascii_whitespace().find_map(|c| {
                LANGUAGE_CLASS
                    .captures(c)
                    .map(|caps| caps[1].to_ascii_lowercase())
            })
        })
    };
    from(code).or_else(|| code.parent().as_ref().and_then(from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_and_normalizes_language() {
        let doc = dom::parse_document(r#"<pre class="lang-Python"><code>print(1)</code></pre>"#);
        let code = dom::select_first(&doc, "code").unwrap();
        ClassHighlighter.highlight(&code);
        assert!(dom::has_class(&code, "hljs"));
        assert!(dom::has_class(&code, "language-python"));
        assert_eq!(dom::attr(&code, "data-highlighted").as_deref(), Some("yes"));
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let doc = dom::parse_document(r#"<pre><code class="language-rust">fn x() {}</code></pre>"#);
        let code = dom::select_first(&doc, "code").unwrap();
        ClassHighlighter.highlight(&code);
        let once = dom::attr(&code, "class");
        ClassHighlighter.highlight(&code);
        assert_eq!(dom::attr(&code, "class"), once);
        assert_eq!(once.as_deref(), Some("language-rust hljs"));
    }
}
