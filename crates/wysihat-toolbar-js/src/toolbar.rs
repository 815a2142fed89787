//! JsToolbar - toolbar attached to a contenteditable element.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};
use wysihat_toolbar_browser::{
    BrowserToolbar, ButtonSetRegistry, ContentEditableEditor, ControlId, DefaultHandlers,
    DomPlatform, Toolbar, ToolbarConfig,
};

use crate::types::{parse_button, parse_button_set, parse_selectbox};

/// Parse an optional toolbar config; `undefined`/`null` mean defaults.
fn parse_config(value: JsValue) -> Result<ToolbarConfig, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(ToolbarConfig::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid toolbar config: {}", e)))
}

/// Toolbar for a contenteditable element.
///
/// Carries its own button-set registry, seeded with the "Basic" set.
#[wasm_bindgen]
pub struct JsToolbar {
    toolbar: Option<BrowserToolbar>,
    registry: ButtonSetRegistry<ContentEditableEditor>,
}

#[wasm_bindgen]
impl JsToolbar {
    /// Attach a toolbar above `editor_element`, making it editable.
    ///
    /// Sets listed in `config.buttonSets` are added immediately.
    #[wasm_bindgen(constructor)]
    pub fn new(editor_element: HtmlElement, config: JsValue) -> Result<JsToolbar, JsError> {
        let config = parse_config(config)?;
        let editor = ContentEditableEditor::attach(editor_element)?;
        let platform = DomPlatform::from_window(config.markup.clone())?;

        let registry = ButtonSetRegistry::with_defaults();
        let toolbar = Toolbar::with_button_sets(
            Rc::new(editor),
            platform,
            DefaultHandlers,
            config,
            &registry,
        )?;

        Ok(Self {
            toolbar: Some(toolbar),
            registry,
        })
    }

    /// The toolbar container, or `undefined` once destroyed.
    #[wasm_bindgen(getter)]
    pub fn element(&self) -> Option<Element> {
        self.toolbar.as_ref().map(|t| t.element().clone())
    }

    /// Add a button. Returns its control id.
    #[wasm_bindgen(js_name = addButton)]
    pub fn add_button(&mut self, def: JsValue) -> Result<u32, JsError> {
        let def = parse_button(def)?.into_def()?;
        let id = self.toolbar_mut()?.add_button(def)?;
        Ok(id.get())
    }

    /// Add a selectbox. Returns its control id.
    #[wasm_bindgen(js_name = addSelectbox)]
    pub fn add_selectbox(&mut self, def: JsValue) -> Result<u32, JsError> {
        let def = parse_selectbox(def)?.into_def()?;
        let id = self.toolbar_mut()?.add_selectbox(def)?;
        Ok(id.get())
    }

    /// Add every button of a registered set. Returns their control ids.
    #[wasm_bindgen(js_name = addButtonSet)]
    pub fn add_button_set(&mut self, name: &str) -> Result<Vec<u32>, JsError> {
        let toolbar = self.toolbar.as_mut().ok_or_else(destroyed)?;
        let ids = toolbar.add_named_button_set(&self.registry, name)?;
        Ok(ids.into_iter().map(ControlId::get).collect())
    }

    /// Register (or replace) a named button set.
    #[wasm_bindgen(js_name = registerButtonSet)]
    pub fn register_button_set(&mut self, name: &str, defs: JsValue) -> Result<(), JsError> {
        let defs = parse_button_set(defs)?
            .into_iter()
            .map(|def| def.into_def())
            .collect::<Result<Vec<_>, _>>()?;
        self.registry.register(name, defs);
        Ok(())
    }

    #[wasm_bindgen(js_name = buttonSetNames)]
    pub fn button_set_names(&self) -> Vec<String> {
        self.registry.names().map(str::to_string).collect()
    }

    /// Names of the registered controls, in toolbar order.
    #[wasm_bindgen(js_name = controlNames)]
    pub fn control_names(&self) -> Vec<String> {
        self.toolbar
            .as_ref()
            .map(|t| t.control_names().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Remove a control. Returns false for an unknown id.
    #[wasm_bindgen(js_name = removeControl)]
    pub fn remove_control(&mut self, id: u32) -> bool {
        self.toolbar
            .as_mut()
            .is_some_and(|t| t.remove_control(ControlId::from_raw(id)))
    }

    /// Remove the toolbar and all its controls. Later calls are no-ops.
    pub fn destroy(&mut self) {
        if let Some(toolbar) = self.toolbar.take() {
            toolbar.destroy();
        }
    }
}

impl JsToolbar {
    fn toolbar_mut(&mut self) -> Result<&mut BrowserToolbar, JsError> {
        self.toolbar.as_mut().ok_or_else(destroyed)
    }
}

fn destroyed() -> JsError {
    JsError::new("toolbar has been destroyed")
}
