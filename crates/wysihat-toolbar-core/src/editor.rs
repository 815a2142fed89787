//! The editor collaborator the toolbar drives.
//!
//! The toolbar does not implement editing. It needs an editor that can run
//! named formatting commands, report command state and current styles, and
//! publish two notifications. [`RichTextEditor`] captures exactly that.

use std::collections::BTreeMap;

use crate::platform::PlatformError;

/// Current named style assignments, e.g. `fontname -> "Georgia"`.
pub type SelectedStyles = BTreeMap<String, String>;

/// Notifications exchanged between the toolbar and the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EditorEvent {
    /// Content was changed.
    Change,
    /// The cursor or selection moved; controls re-query their state.
    CursorMove,
}

impl EditorEvent {
    pub const CHANGE: &'static str = "wysihat:change";
    pub const CURSOR_MOVE: &'static str = "wysihat:cursormove";

    /// Event name as dispatched on the editor element.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Change => Self::CHANGE,
            Self::CursorMove => Self::CURSOR_MOVE,
        }
    }
}

impl std::fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A rich text editor the toolbar can be attached to.
///
/// Methods take `&self`; editors are shared between the toolbar and the
/// callbacks it registers, so implementations use interior mutability (or, in
/// the browser, the DOM itself) for their state.
pub trait RichTextEditor {
    /// Root element of the editing surface.
    type Element;

    /// Guard returned by [`observe`](Self::observe). Dropping it unsubscribes.
    type Subscription;

    /// The editor's root element, used as the toolbar's insertion anchor.
    fn element(&self) -> &Self::Element;

    /// Execute a named formatting command, optionally with a value.
    ///
    /// Returns whether the editor considered the command handled.
    fn exec_command(
        &self,
        command: &str,
        show_ui: bool,
        value: Option<&str>,
    ) -> Result<bool, PlatformError>;

    /// Current on/off state of a named command.
    fn query_command_state(&self, command: &str) -> bool;

    /// Current named style assignments at the selection.
    fn selected_styles(&self) -> SelectedStyles;

    /// Subscribe `callback` to `event`.
    fn observe(&self, event: EditorEvent, callback: Box<dyn Fn()>) -> Self::Subscription;

    /// Emit `event` to every subscriber.
    fn fire(&self, event: EditorEvent);
}
