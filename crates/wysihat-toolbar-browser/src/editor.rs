//! `contenteditable` editor collaborator.
//!
//! Commands go through `document.execCommand`, state through
//! `document.queryCommandState`, and notifications are DOM `CustomEvent`s
//! dispatched on the editor element, so page scripts can listen for
//! `wysihat:change` and `wysihat:cursormove` too.

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, Element, HtmlDocument, HtmlElement};
use wysihat_toolbar_core::{EditorEvent, PlatformError, RichTextEditor, SelectedStyles};

use crate::dom::js_error;

/// Style names reported by [`ContentEditableEditor::selected_styles`] and the
/// computed CSS property each one reads.
const STYLE_PROPERTIES: &[(&str, &str)] = &[
    ("fontname", "font-family"),
    ("fontsize", "font-size"),
    ("forecolor", "color"),
    ("hilitecolor", "background-color"),
    ("backcolor", "background-color"),
];

/// An editable element driven through the document's command API.
#[derive(Debug, Clone)]
pub struct ContentEditableEditor {
    element: HtmlElement,
    document: HtmlDocument,
}

impl ContentEditableEditor {
    /// Wrap an element that is already editable.
    pub fn new(element: HtmlElement) -> Result<Self, PlatformError> {
        let document = element
            .owner_document()
            .ok_or("editor element has no owner document")?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| PlatformError::from("owner document is not an HTML document"))?;
        Ok(Self { element, document })
    }

    /// Make `element` editable and wrap it.
    pub fn attach(element: HtmlElement) -> Result<Self, PlatformError> {
        element.set_content_editable("true");
        Self::new(element)
    }

    /// Element holding the selection anchor, if the selection is inside the
    /// editor.
    fn anchor_element(&self) -> Option<Element> {
        let window = self.document.default_view()?;
        let selection = window.get_selection().ok()??;
        let node = selection.anchor_node()?;
        if !self.element.contains(Some(&node)) {
            return None;
        }
        match node.dyn_into::<Element>() {
            Ok(element) => Some(element),
            Err(node) => node.parent_element(),
        }
    }
}

impl RichTextEditor for ContentEditableEditor {
    type Element = HtmlElement;
    type Subscription = EventListener;

    fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn exec_command(
        &self,
        command: &str,
        show_ui: bool,
        value: Option<&str>,
    ) -> Result<bool, PlatformError> {
        let result = match value {
            Some(value) => self
                .document
                .exec_command_with_show_ui_and_value(command, show_ui, value),
            None => self.document.exec_command_with_show_ui(command, show_ui),
        };
        result.map_err(js_error)
    }

    fn query_command_state(&self, command: &str) -> bool {
        self.document.query_command_state(command).unwrap_or(false)
    }

    fn selected_styles(&self) -> SelectedStyles {
        let mut styles = SelectedStyles::new();
        let Some(anchor) = self.anchor_element() else {
            return styles;
        };
        let Some(style) = self
            .document
            .default_view()
            .and_then(|window| window.get_computed_style(&anchor).ok().flatten())
        else {
            return styles;
        };

        for (name, property) in STYLE_PROPERTIES {
            match style.get_property_value(property) {
                Ok(value) if !value.is_empty() => {
                    styles.insert(name.to_string(), value);
                }
                _ => {}
            }
        }
        styles
    }

    fn observe(&self, event: EditorEvent, callback: Box<dyn Fn()>) -> EventListener {
        EventListener::new(&self.element, event.name(), move |_| callback())
    }

    fn fire(&self, event: EditorEvent) {
        let init = CustomEventInit::new();
        init.set_bubbles(true);
        let dispatched = CustomEvent::new_with_event_init_dict(event.name(), &init)
            .and_then(|custom| self.element.dispatch_event(&custom));
        if let Err(err) = dispatched {
            tracing::warn!(%event, err = %js_error(err), "failed to dispatch editor event");
        }
    }
}

