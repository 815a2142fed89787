//! Platform abstraction for toolbar markup.
//!
//! The toolbar logic never touches a DOM directly. Creating the container,
//! creating each control, binding activation events and reflecting state all
//! go through [`ToolbarPlatform`], so an implementation can change markup or
//! styling without reimplementing the wiring. The browser implementation lives
//! in `wysihat-toolbar-browser`; [`crate::headless::HeadlessPlatform`] renders
//! into an in-memory tree.

use crate::controls::ControlSpec;
use crate::editor::RichTextEditor;

/// Error type for platform operations.
#[derive(Debug, Clone)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Element creation, event binding and visual state for toolbar controls.
///
/// All methods take `&self`: the toolbar shares the platform with the state
/// observers it registers on the editor, and those run while the toolbar is
/// not borrowed.
pub trait ToolbarPlatform<E: RichTextEditor> {
    /// Handle to an element owned by the toolbar.
    type Element: Clone + 'static;

    /// Guard for an event binding. Dropping it removes the binding.
    type Listener;

    /// Create the toolbar container and insert it directly before the
    /// editor's root element. Returns the inserted element.
    fn create_toolbar_element(&self, editor: &E) -> Result<Self::Element, PlatformError>;

    /// Create a button for `spec` and append it as the last child of
    /// `toolbar`.
    fn create_button_element(
        &self,
        toolbar: &Self::Element,
        spec: &ControlSpec,
    ) -> Result<Self::Element, PlatformError>;

    /// Create a selectbox with one option per entry of `options`, in order,
    /// and append it as the last child of `toolbar`.
    fn create_selectbox_element(
        &self,
        toolbar: &Self::Element,
        spec: &ControlSpec,
        options: &[String],
    ) -> Result<Self::Element, PlatformError>;

    /// Call `callback` whenever the button is activated. The default
    /// activation behaviour (navigation, propagation) must be suppressed.
    fn observe_button_click(
        &self,
        element: &Self::Element,
        callback: Box<dyn Fn()>,
    ) -> Result<Self::Listener, PlatformError>;

    /// Call `callback` with the selected value whenever the selectbox value
    /// changes.
    ///
    /// The value passed must be the control's value *after* the change has
    /// been applied; the toolbar never reads the control itself.
    fn observe_option_select(
        &self,
        element: &Self::Element,
        callback: Box<dyn Fn(&str)>,
    ) -> Result<Self::Listener, PlatformError>;

    /// Reflect a button's on/off state, by default through the `selected`
    /// class. Must have no other side effect.
    fn update_button_state(&self, element: &Self::Element, name: &str, state: bool);

    /// Mark the option whose value equals `state` as selected.
    ///
    /// Returns false when no option matches, leaving the control untouched.
    fn update_selectbox_state(&self, element: &Self::Element, name: &str, state: &str) -> bool;

    /// Deselect every option of a selectbox.
    fn clear_selectbox_state(&self, element: &Self::Element);

    /// Detach an element previously created by this platform.
    fn remove_element(&self, element: &Self::Element);
}
