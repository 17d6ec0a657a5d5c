use kuchiki::NodeRef;
use maud::html;

use crate::builtin::{TOC_GENERATED_ATTR, TOC_LIST_CLASS};
use crate::dom;
use crate::host::Host;
use crate::page::{ClickAction, Page};

struct Entry {
    id: String,
    tag: String,
    label: String,
}

/// Headings that become TOC entries, ids assigned. A leading `h1` is the
/// page title and is skipped; the rest keep their position in the
/// unfiltered list for generated ids.
fn collect_entries<H: Host>(page: &Page<H>) -> Vec<Entry> {
    let headings = dom::select_all(page.document(), &page.config().heading_selector);
    let mut entries = Vec::with_capacity(headings.len());

    for (index, heading) in headings.iter().enumerate() {
        let tag = dom::tag_name(heading).unwrap_or_default();
        if index == 0 && tag == "h1" {
            continue;
        }
        entries.push((index, heading, tag));
    }

    if entries.len() < page.config().toc_min_headings {
        return Vec::new();
    }

    entries
        .into_iter()
        .map(|(index, heading, tag)| {
            let id = match dom::attr(heading, "id").filter(|id| !id.is_empty()) {
                Some(id) => id,
                None => {
                    let id = format!("heading-{index}");
                    dom::set_attr(heading, "id", id.clone());
                    id
                }
            };
            Entry {
                id,
                tag,
                label: heading.text_contents(),
            }
        })
        .collect()
}

fn build_list(entries: &[Entry]) -> Option<NodeRef> {
    let markup = html! {
        ul class=(TOC_LIST_CLASS) {
            @for e in entries {
                li class=(format!("toc-item toc-{}", e.tag)) {
                    a href=(format!("#{}", e.id)) { (e.label) }
                }
            }
        }
    };
    let list = dom::parse_element(&markup.into_string())?;
    dom::set_attr(&list, TOC_GENERATED_ATTR, "");
    Some(list)
}

/// Fills the TOC container from the page's headings. Returns the number of
/// entries appended; zero when the container is missing, the page is too
/// short, or the container already holds a generated list.
pub fn generate<H: Host>(page: &Page<H>) -> usize {
    let cfg = page.config();
    let Some(container) = dom::element_by_id(page.document(), &cfg.toc_container_id) else {
        return 0;
    };
    if dom::select_first(&container, &format!("ul.{TOC_LIST_CLASS}")).is_some() {
        tracing::debug!("table of contents already present");
        return 0;
    }

    let entries = collect_entries(page);
    if entries.is_empty() {
        return 0;
    }
    let Some(list) = build_list(&entries) else {
        return 0;
    };

    let links = dom::select_all(&list, "a");
    for (link, entry) in links.iter().zip(&entries) {
        page.on_click(
            link,
            ClickAction::NavigateToSection {
                id: entry.id.clone(),
            },
        );
    }

    if let Some(title) = dom::parse_element(&html! { h3 { (cfg.toc_title) } }.into_string()) {
        container.append(title);
    }
    container.append(list);
    tracing::debug!(entries = entries.len(), "table of contents generated");
    entries.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnhanceConfig;
    use crate::host::HeadlessHost;

    fn page(body: &str) -> Page<HeadlessHost> {
        let html = format!(
            r#"<div id="toc-container"></div><div class="notebook-container">{body}</div>"#
        );
        Page::parse(&html, HeadlessHost::default(), EnhanceConfig::default())
    }

    #[test]
    fn ids_use_unfiltered_positions() {
        let page = page("<h1>Title</h1><h2>A</h2><h2 id=\"b\">B</h2><h3>C</h3>");
        assert_eq!(generate(&page), 3);
        let hrefs: Vec<_> = dom::select_all(page.document(), ".toc-list a")
            .iter()
            .map(|a| dom::attr(a, "href").unwrap())
            .collect();
        assert_eq!(hrefs, ["#heading-1", "#b", "#heading-3"]);
        assert!(dom::element_by_id(page.document(), "heading-1").is_some());
        assert!(dom::attr(&dom::select_first(page.document(), "h1").unwrap(), "id").is_none());
    }

    #[test]
    fn leading_h2_is_not_skipped() {
        let page = page("<h2>A</h2><h3>B</h3><h2>C</h2>");
        assert_eq!(generate(&page), 3);
        let items: Vec<_> = dom::select_all(page.document(), ".toc-list li")
            .iter()
            .map(|li| dom::attr(li, "class").unwrap())
            .collect();
        assert_eq!(items, ["toc-item toc-h2", "toc-item toc-h3", "toc-item toc-h2"]);
    }

    #[test]
    fn labels_keep_heading_text_verbatim() {
        let page = page("<h2>  A  </h2><h2>B <code>x</code></h2><h2>C</h2>");
        assert_eq!(generate(&page), 3);
        let labels: Vec<_> = dom::select_all(page.document(), ".toc-list a")
            .iter()
            .map(|a| a.text_contents())
            .collect();
        assert_eq!(labels, ["  A  ", "B x", "C"]);
        assert!(dom::select_first(page.document(), "ul.toc-list[data-toc-generated]").is_some());
    }

    #[test]
    fn second_run_does_not_duplicate() {
        let page = page("<h2>A</h2><h2>B</h2><h2>C</h2>");
        assert_eq!(generate(&page), 3);
        assert_eq!(generate(&page), 0);
        assert_eq!(dom::select_all(page.document(), "#toc-container h3").len(), 1);
    }
}
