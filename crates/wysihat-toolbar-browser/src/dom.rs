//! Toolbar markup rendered with `web-sys`.
//!
//! Produces the classic WysiHat markup:
//!
//! ```html
//! <div class="editor_toolbar">
//!   <a href="#" class="button bold"><span>Bold</span></a>
//!   <select class="fontname"><option value="Georgia">Georgia</option></select>
//! </div>
//! ```
//!
//! Class names come from [`MarkupConfig`].

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlOptionElement, HtmlSelectElement, Node};
use wysihat_toolbar_core::{ControlSpec, MarkupConfig, PlatformError, RichTextEditor, ToolbarPlatform};

/// Convert a thrown JS value into a [`PlatformError`].
pub(crate) fn js_error(err: JsValue) -> PlatformError {
    match err.dyn_ref::<js_sys::Error>() {
        Some(err) => PlatformError(String::from(err.message())),
        None => PlatformError(format!("{err:?}")),
    }
}

/// [`ToolbarPlatform`] creating real DOM elements.
#[derive(Debug, Clone)]
pub struct DomPlatform {
    document: Document,
    markup: MarkupConfig,
}

impl DomPlatform {
    pub fn new(document: Document) -> Self {
        Self::with_markup(document, MarkupConfig::default())
    }

    pub fn with_markup(document: Document, markup: MarkupConfig) -> Self {
        Self { document, markup }
    }

    /// Platform over the current window's document.
    pub fn from_window(markup: MarkupConfig) -> Result<Self, PlatformError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or("no document available")?;
        Ok(Self::with_markup(document, markup))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn markup(&self) -> &MarkupConfig {
        &self.markup
    }

    fn create(&self, tag: &str) -> Result<Element, PlatformError> {
        self.document.create_element(tag).map_err(js_error)
    }

    fn as_select(element: &Element) -> Option<&HtmlSelectElement> {
        element.dyn_ref::<HtmlSelectElement>()
    }
}

/// Add each whitespace-separated part of `classes` to `element`.
///
/// `classList.add` rejects tokens containing whitespace, and a name derived
/// from a label such as "Align Left" has one.
fn add_classes(element: &Element, classes: &str) -> Result<(), PlatformError> {
    let class_list = element.class_list();
    for class in classes.split_whitespace() {
        class_list.add_1(class).map_err(js_error)?;
    }
    Ok(())
}

impl<E> ToolbarPlatform<E> for DomPlatform
where
    E: RichTextEditor,
    E::Element: AsRef<Node>,
{
    type Element = Element;
    type Listener = EventListener;

    fn create_toolbar_element(&self, editor: &E) -> Result<Element, PlatformError> {
        let anchor: &Node = editor.element().as_ref();
        let parent = anchor
            .parent_node()
            .ok_or("editor element is not attached to the document")?;

        let toolbar = self.create("div")?;
        toolbar.set_class_name(&self.markup.toolbar_class);
        parent
            .insert_before(&toolbar, Some(anchor))
            .map_err(js_error)?;
        Ok(toolbar)
    }

    fn create_button_element(
        &self,
        toolbar: &Element,
        spec: &ControlSpec,
    ) -> Result<Element, PlatformError> {
        let button = self.create("a")?;
        button.set_attribute("href", "#").map_err(js_error)?;
        add_classes(&button, &self.markup.button_class)?;
        add_classes(&button, &spec.name)?;

        let label = self.create("span")?;
        label.set_text_content(Some(&spec.label));
        button.append_child(&label).map_err(js_error)?;

        toolbar.append_child(&button).map_err(js_error)?;
        Ok(button)
    }

    fn create_selectbox_element(
        &self,
        toolbar: &Element,
        spec: &ControlSpec,
        options: &[String],
    ) -> Result<Element, PlatformError> {
        let select = self.create("select")?;
        add_classes(&select, &spec.name)?;
        for value in options {
            let option = self.create("option")?;
            option.set_attribute("value", value).map_err(js_error)?;
            option.set_text_content(Some(value));
            select.append_child(&option).map_err(js_error)?;
        }

        toolbar.append_child(&select).map_err(js_error)?;
        Ok(select)
    }

    fn observe_button_click(
        &self,
        element: &Element,
        callback: Box<dyn Fn()>,
    ) -> Result<EventListener, PlatformError> {
        let options = EventListenerOptions::enable_prevent_default();
        Ok(EventListener::new_with_options(
            element,
            "click",
            options,
            move |event| {
                // Keep the `#` link from navigating.
                event.prevent_default();
                event.stop_propagation();
                callback();
            },
        ))
    }

    fn observe_option_select(
        &self,
        element: &Element,
        callback: Box<dyn Fn(&str)>,
    ) -> Result<EventListener, PlatformError> {
        let select = Self::as_select(element)
            .ok_or("selectbox element is not a <select>")?
            .clone();
        let options = EventListenerOptions::enable_prevent_default();
        // `change` fires after the browser applied the new value.
        Ok(EventListener::new_with_options(
            element,
            "change",
            options,
            move |event| {
                event.prevent_default();
                event.stop_propagation();
                callback(&select.value());
            },
        ))
    }

    fn update_button_state(&self, element: &Element, _name: &str, state: bool) {
        let class_list = element.class_list();
        let result = if state {
            class_list.add_1(&self.markup.selected_class)
        } else {
            class_list.remove_1(&self.markup.selected_class)
        };
        if let Err(err) = result {
            tracing::warn!(err = %js_error(err), "failed to update button class");
        }
    }

    fn update_selectbox_state(&self, element: &Element, _name: &str, state: &str) -> bool {
        let Some(select) = Self::as_select(element) else {
            return false;
        };
        let options: Vec<HtmlOptionElement> = (0..select.length())
            .filter_map(|i| select.item(i))
            .filter_map(|option| option.dyn_into::<HtmlOptionElement>().ok())
            .collect();
        if !options.iter().any(|option| option.value() == state) {
            return false;
        }
        for option in &options {
            option.set_selected(option.value() == state);
        }
        true
    }

    fn clear_selectbox_state(&self, element: &Element) {
        if let Some(select) = Self::as_select(element) {
            select.set_selected_index(-1);
        }
    }

    fn remove_element(&self, element: &Element) {
        element.remove();
    }
}
