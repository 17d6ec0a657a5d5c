use kuchiki::traits::TendrilSink as _;

use crate::builtin::{COPY_MARKER_ATTR, COPY_MARKER_INJECTED, TOC_GENERATED_ATTR, TOC_LIST_CLASS};
use crate::config::EnhanceConfig;
use crate::dom;

/// Checks what the routines added to a rendered page: one button per
/// container that got one injected, no button inside a code block, and a
/// generated TOC that is complete and points at real headings.
///
/// Markup the page shipped with is left unchecked; the routines skip it.
pub fn assert_enhanced(html: &str, cfg: &EnhanceConfig) -> anyhow::Result<()> {
    let doc = kuchiki::parse_html().one(html);
    assert_copy_buttons(&doc, cfg)?;
    assert_toc(&doc, cfg)?;
    Ok(())
}

fn assert_copy_buttons(doc: &kuchiki::NodeRef, cfg: &EnhanceConfig) -> anyhow::Result<()> {
    let button_selector = format!(".{}", cfg.copy_button_class);
    let injected = format!("[{COPY_MARKER_ATTR}=\"{COPY_MARKER_INJECTED}\"]");

    for block in dom::select_all(doc, &injected) {
        if dom::select_first(&block, &button_selector).is_some() {
            anyhow::bail!("copy button injected inside a code block");
        }
        let Some(container) = block.parent() else {
            continue;
        };
        let buttons = container
            .children()
            .filter(|c| dom::has_class(c, &cfg.copy_button_class))
            .count();
        if buttons != 1 {
            anyhow::bail!("code block container holds {buttons} copy buttons, expected one");
        }
    }
    Ok(())
}

fn assert_toc(doc: &kuchiki::NodeRef, cfg: &EnhanceConfig) -> anyhow::Result<()> {
    let Some(container) = dom::element_by_id(doc, &cfg.toc_container_id) else {
        return Ok(());
    };
    let lists = dom::select_all(
        &container,
        &format!("ul.{TOC_LIST_CLASS}[{TOC_GENERATED_ATTR}]"),
    );
    match lists.as_slice() {
        [] => Ok(()),
        [list] => {
            let entries = dom::select_all(list, "li").len();
            if entries < cfg.toc_min_headings {
                anyhow::bail!(
                    "table of contents has {entries} entries, below the minimum of {}",
                    cfg.toc_min_headings
                );
            }
            for link in dom::select_all(list, "a[href]") {
                let href = dom::attr(&link, "href").unwrap_or_default();
                let id = href.strip_prefix('#').unwrap_or_default();
                if dom::element_by_id(doc, id).is_none() {
                    anyhow::bail!("table of contents links to missing heading {href}");
                }
            }
            Ok(())
        }
        _ => anyhow::bail!("table of contents generated {} times", lists.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_injected_buttons_are_rejected() {
        let html = r#"<div class="input_area"><pre data-copy-button="injected">a</pre><button class="copy-btn"></button><button class="copy-btn"></button></div>"#;
        let err = assert_enhanced(html, &EnhanceConfig::default()).unwrap_err();
        assert!(err.to_string().contains("2 copy buttons"));
    }

    #[test]
    fn authored_buttons_are_not_checked() {
        let html = r#"<div class="input_area"><pre data-copy-button="existing">a</pre><button class="copy-btn"></button><button class="copy-btn"></button></div>"#;
        assert!(assert_enhanced(html, &EnhanceConfig::default()).is_ok());
    }

    #[test]
    fn dangling_toc_link_is_rejected() {
        let html = r##"<div id="toc-container"><h3>Table of Contents</h3><ul class="toc-list" data-toc-generated=""><li><a href="#a">A</a></li><li><a href="#b">B</a></li><li><a href="#gone">C</a></li></ul></div><h2 id="a">A</h2><h2 id="b">B</h2>"##;
        let err = assert_enhanced(html, &EnhanceConfig::default()).unwrap_err();
        assert!(err.to_string().contains("#gone"));
    }

    #[test]
    fn authored_short_toc_is_not_checked() {
        let html = r##"<div id="toc-container"><ul class="toc-list"><li><a href="#x">X</a></li></ul></div>"##;
        assert!(assert_enhanced(html, &EnhanceConfig::default()).is_ok());
    }

    #[test]
    fn untouched_page_passes() {
        assert!(assert_enhanced("<p>hello</p>", &EnhanceConfig::default()).is_ok());
    }
}
