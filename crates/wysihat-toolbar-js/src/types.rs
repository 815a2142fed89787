//! Control definitions as received from JavaScript.

use js_sys::Function;
use serde::Deserialize;
use tsify_next::Tsify;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wysihat_toolbar_browser::{ButtonDef, ContentEditableEditor, RichTextEditor, SelectboxDef};

/// Button definition.
///
/// `handler` replaces `document.execCommand(name)`; `query` replaces
/// `document.queryCommandState(name)`.
#[derive(Debug, Clone, Default, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct JsButtonDef {
    #[tsify(optional)]
    #[serde(default)]
    pub name: Option<String>,
    #[tsify(optional)]
    #[serde(default)]
    pub label: Option<String>,
    #[tsify(optional, type = "(editor: HTMLElement) => void")]
    #[serde(default, with = "serde_wasm_bindgen::preserve")]
    pub handler: JsValue,
    #[tsify(optional, type = "(editor: HTMLElement) => boolean")]
    #[serde(default, with = "serde_wasm_bindgen::preserve")]
    pub query: JsValue,
}

/// Selectbox definition.
///
/// `handler` receives the chosen value; `query` returns the value to mark as
/// selected, or `undefined`.
#[derive(Debug, Clone, Default, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct JsSelectboxDef {
    #[tsify(optional)]
    #[serde(default)]
    pub name: Option<String>,
    #[tsify(optional)]
    #[serde(default)]
    pub label: Option<String>,
    #[tsify(optional)]
    #[serde(default)]
    pub options: Vec<String>,
    #[tsify(optional, type = "(editor: HTMLElement, value: string) => void")]
    #[serde(default, with = "serde_wasm_bindgen::preserve")]
    pub handler: JsValue,
    #[tsify(optional, type = "(editor: HTMLElement) => string | undefined")]
    #[serde(default, with = "serde_wasm_bindgen::preserve")]
    pub query: JsValue,
}

/// Parse a button definition from JavaScript.
pub fn parse_button(value: JsValue) -> Result<JsButtonDef, JsError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid button definition: {}", e)))
}

/// Parse a list of button definitions from JavaScript.
pub fn parse_button_set(value: JsValue) -> Result<Vec<JsButtonDef>, JsError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid button set: {}", e)))
}

/// Parse a selectbox definition from JavaScript.
pub fn parse_selectbox(value: JsValue) -> Result<JsSelectboxDef, JsError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid selectbox definition: {}", e)))
}

/// `undefined`/`null` become `None`; anything else must be a function.
fn function_field(value: JsValue, field: &str) -> Result<Option<Function>, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    value
        .dyn_into::<Function>()
        .map(Some)
        .map_err(|_| JsError::new(&format!("`{field}` must be a function")))
}

/// Hand a thrown exception to the page as an unhandled rejection, so it shows
/// up the way an exception thrown from an event listener would.
fn rethrow(err: JsValue) {
    let _ = js_sys::Promise::reject(&err);
}

impl JsButtonDef {
    pub fn into_def(self) -> Result<ButtonDef<ContentEditableEditor>, JsError> {
        let mut def = ButtonDef {
            name: self.name,
            label: self.label,
            ..ButtonDef::default()
        };
        if let Some(handler) = function_field(self.handler, "handler")? {
            def = def.handler(move |editor: &ContentEditableEditor| {
                if let Err(err) = handler.call1(&JsValue::NULL, editor.element()) {
                    rethrow(err);
                }
            });
        }
        if let Some(query) = function_field(self.query, "query")? {
            def = def.query(move |editor: &ContentEditableEditor| {
                match query.call1(&JsValue::NULL, editor.element()) {
                    Ok(state) => state.is_truthy(),
                    Err(err) => {
                        rethrow(err);
                        false
                    }
                }
            });
        }
        Ok(def)
    }
}

impl JsSelectboxDef {
    pub fn into_def(self) -> Result<SelectboxDef<ContentEditableEditor>, JsError> {
        let mut def = SelectboxDef {
            name: self.name,
            label: self.label,
            options: self.options,
            ..SelectboxDef::default()
        };
        if let Some(handler) = function_field(self.handler, "handler")? {
            def = def.handler(move |editor: &ContentEditableEditor, value: &str| {
                let value = JsValue::from_str(value);
                if let Err(err) = handler.call2(&JsValue::NULL, editor.element(), &value) {
                    rethrow(err);
                }
            });
        }
        if let Some(query) = function_field(self.query, "query")? {
            def = def.query(move |editor: &ContentEditableEditor| {
                match query.call1(&JsValue::NULL, editor.element()) {
                    Ok(state) => state.as_string(),
                    Err(err) => {
                        rethrow(err);
                        None
                    }
                }
            });
        }
        Ok(def)
    }
}
