//! Thin helpers over `kuchiki` for the handful of DOM operations the page
//! routines need.
//!
//! Selector queries never fail: a selector kuchiki cannot parse matches
//! nothing, the same way a missing element does.

use anyhow::Context as _;
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink as _;

pub fn parse_document(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

/// Parses an HTML fragment and returns its top-level nodes, detached.
pub fn parse_fragment(markup: &str) -> Vec<NodeRef> {
    let doc = kuchiki::parse_html().one(markup);
    let Ok(body) = doc.select_first("body") else {
        return Vec::new();
    };
    let children: Vec<NodeRef> = body.as_node().children().collect();
    for child in &children {
        child.detach();
    }
    children
}

/// Parses a fragment expected to hold a single element.
pub fn parse_element(markup: &str) -> Option<NodeRef> {
    parse_fragment(markup)
        .into_iter()
        .find(|n| n.as_element().is_some())
}

pub fn select_all(root: &NodeRef, selector: &str) -> Vec<NodeRef> {
    match root.select(selector) {
        Ok(nodes) => nodes.map(|n| n.as_node().clone()).collect(),
        Err(()) => {
            tracing::debug!(selector, "unsupported selector, treating as no match");
            Vec::new()
        }
    }
}

pub fn select_first(root: &NodeRef, selector: &str) -> Option<NodeRef> {
    root.select_first(selector).ok().map(|n| n.as_node().clone())
}

/// `getElementById`: first element in document order carrying `id`.
pub fn element_by_id(root: &NodeRef, id: &str) -> Option<NodeRef> {
    if id.is_empty() {
        return None;
    }
    root.inclusive_descendants()
        .find(|n| attr(n, "id").as_deref() == Some(id))
}

pub fn body(document: &NodeRef) -> Option<NodeRef> {
    select_first(document, "body")
}

pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.as_element()
        .map(|el| el.name.local.as_ref().to_ascii_lowercase())
}

pub fn attr(node: &NodeRef, name: &str) -> Option<String> {
    let el = node.as_element()?;
    el.attributes.borrow().get(name).map(|s| s.to_string())
}

pub fn set_attr(node: &NodeRef, name: &str, value: impl Into<String>) {
    if let Some(el) = node.as_element() {
        el.attributes.borrow_mut().insert(name, value.into());
    }
}

fn classes(node: &NodeRef) -> Vec<String> {
    attr(node, "class")
        .unwrap_or_default()
        .split_ascii_whitespace()
        .map(str::to_string)
        .collect()
}

fn write_classes(node: &NodeRef, classes: &[String]) {
    set_attr(node, "class", classes.join(" "));
}

pub fn has_class(node: &NodeRef, class: &str) -> bool {
    classes(node).iter().any(|c| c == class)
}

pub fn add_class(node: &NodeRef, class: &str) {
    let mut list = classes(node);
    if !list.iter().any(|c| c == class) {
        list.push(class.to_string());
        write_classes(node, &list);
    }
}

pub fn remove_class(node: &NodeRef, class: &str) {
    let mut list = classes(node);
    let before = list.len();
    list.retain(|c| c != class);
    if list.len() != before {
        write_classes(node, &list);
    }
}

/// `classList.toggle`: returns whether the class is present afterwards.
pub fn toggle_class(node: &NodeRef, class: &str) -> bool {
    if has_class(node, class) {
        remove_class(node, class);
        false
    } else {
        add_class(node, class);
        true
    }
}

fn style_declarations(node: &NodeRef) -> Vec<(String, String)> {
    attr(node, "style")
        .unwrap_or_default()
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_ascii_lowercase(), value.trim().to_string()))
        })
        .collect()
}

pub fn style_property(node: &NodeRef, name: &str) -> Option<String> {
    style_declarations(node)
        .into_iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v)
}

pub fn set_style_property(node: &NodeRef, name: &str, value: &str) {
    let mut decls = style_declarations(node);
    match decls.iter_mut().find(|(n, _)| n == name) {
        Some(decl) => decl.1 = value.to_string(),
        None => decls.push((name.to_string(), value.to_string())),
    }
    let style = decls
        .iter()
        .map(|(n, v)| format!("{n}: {v}"))
        .collect::<Vec<_>>()
        .join("; ");
    set_attr(node, "style", style);
}

/// Replaces all children of `node` with the nodes parsed from `markup`.
pub fn set_inner_html(node: &NodeRef, markup: &str) {
    let old: Vec<NodeRef> = node.children().collect();
    for child in old {
        child.detach();
    }
    for child in parse_fragment(markup) {
        node.append(child);
    }
}

pub fn serialize(node: &NodeRef) -> anyhow::Result<String> {
    let mut out = Vec::new();
    node.serialize(&mut out).context("serialize document")?;
    String::from_utf8(out).context("document not utf-8")
}
