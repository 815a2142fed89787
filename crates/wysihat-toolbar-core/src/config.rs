//! Toolbar configuration.
//!
//! Every field has a default, so an empty object (or `ToolbarConfig::default()`)
//! reproduces the classic WysiHat markup.

use serde::{Deserialize, Serialize};

/// Class names used by platforms when rendering the toolbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkupConfig {
    /// Class of the container element.
    pub toolbar_class: String,
    /// Base class shared by every button; the control name is added alongside.
    pub button_class: String,
    /// Class toggled on buttons whose command is active.
    pub selected_class: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            toolbar_class: "editor_toolbar".to_string(),
            button_class: "button".to_string(),
            selected_class: "selected".to_string(),
        }
    }
}

/// What a selectbox does when the editor reports a style no option matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnmatchedStylePolicy {
    /// Leave the current selection alone.
    #[default]
    Ignore,
    /// Deselect every option.
    ClearSelection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolbarConfig {
    pub markup: MarkupConfig,
    pub unmatched_style: UnmatchedStylePolicy,
    /// Button sets added by [`Toolbar::install_configured_sets`](crate::Toolbar::install_configured_sets).
    pub button_sets: Vec<String>,
}
