use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use serde::Deserialize;

/// Selectors, class names and timings used by the page routines.
///
/// Every field has a default matching the notebook site's markup, so a JSON
/// config only needs the keys it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnhanceConfig {
    /// Elements handed to the syntax highlighter.
    pub code_selector: String,
    /// Code blocks that receive a copy button in their container.
    pub copy_target_selector: String,
    pub copy_button_class: String,
    pub copy_feedback_ms: u64,
    /// Links whose clicks become smooth scrolls.
    pub anchor_selector: String,
    pub theme_toggle_id: String,
    pub dark_theme_class: String,
    pub storage_key: String,
    pub toc_container_id: String,
    pub heading_selector: String,
    pub toc_min_headings: usize,
    pub toc_title: String,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            code_selector: "pre code".to_string(),
            copy_target_selector: ".input_area pre".to_string(),
            copy_button_class: "copy-btn".to_string(),
            copy_feedback_ms: 2000,
            anchor_selector: "a[href^=\"#\"]".to_string(),
            theme_toggle_id: "theme-toggle".to_string(),
            dark_theme_class: "dark-theme".to_string(),
            storage_key: "darkTheme".to_string(),
            toc_container_id: "toc-container".to_string(),
            heading_selector:
                ".notebook-container h1, .notebook-container h2, .notebook-container h3"
                    .to_string(),
            toc_min_headings: 3,
            toc_title: "Table of Contents".to_string(),
        }
    }
}

impl EnhanceConfig {
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: EnhanceConfig =
            serde_json::from_str(r#"{"storage_key": "nbTheme", "toc_min_headings": 5}"#).unwrap();
        assert_eq!(cfg.storage_key, "nbTheme");
        assert_eq!(cfg.toc_min_headings, 5);
        assert_eq!(cfg.copy_button_class, "copy-btn");
        assert_eq!(cfg.copy_feedback(), Duration::from_secs(2));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<EnhanceConfig>(r#"{"storage": "x"}"#).is_err());
    }
}
