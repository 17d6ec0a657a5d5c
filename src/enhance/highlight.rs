use crate::dom;
use crate::host::Host;
use crate::page::Page;

/// Hands every code element to the host's highlighter. Returns how many
/// elements were passed along.
pub fn activate<H: Host>(page: &Page<H>) -> usize {
    let blocks = dom::select_all(page.document(), &page.config().code_selector);
    for block in &blocks {
        page.host().highlight(block);
    }
    blocks.len()
}
