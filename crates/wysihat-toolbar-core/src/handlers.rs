//! Handler resolution.
//!
//! When a definition carries no handler or query of its own, the toolbar
//! synthesizes one from the control name. [`HandlerResolver`] holds that
//! policy; override any method to change how a sub-step resolves.

use std::collections::HashMap;
use std::rc::Rc;

use crate::controls::{ActionHandler, ButtonDef, SelectboxDef, StateQuery, StyleQuery};
use crate::editor::RichTextEditor;

/// Resolved selectbox dispatcher. Returns false when the chosen value has no
/// handler, in which case nothing was run.
pub type SelectDispatch<E> = Rc<dyn Fn(&E, &str) -> bool>;

/// Run `command` on the editor, logging rather than propagating failures.
pub fn exec_or_warn<E: RichTextEditor>(editor: &E, command: &str, value: Option<&str>) {
    if let Err(err) = editor.exec_command(command, false, value) {
        tracing::warn!(command, ?value, %err, "editor command failed");
    }
}

pub trait HandlerResolver<E: RichTextEditor + 'static> {
    /// Action for a button: the definition's handler, or `exec_command(name)`.
    fn button_handler(&self, name: &str, def: &ButtonDef<E>) -> ActionHandler<E> {
        if let Some(handler) = &def.handler {
            return Rc::clone(handler);
        }
        let name = name.to_string();
        Rc::new(move |editor: &E| exec_or_warn(editor, &name, None))
    }

    /// Dispatcher for a selectbox.
    ///
    /// A custom handler receives every chosen value. Otherwise each option gets
    /// its own handler running `exec_command(name, false, option)`, and the
    /// chosen value is looked up among them.
    fn selectbox_handler(&self, name: &str, def: &SelectboxDef<E>) -> SelectDispatch<E> {
        if let Some(handler) = &def.handler {
            let handler = Rc::clone(handler);
            return Rc::new(move |editor: &E, value: &str| {
                handler(editor, value);
                true
            });
        }

        let handlers: HashMap<String, ActionHandler<E>> = def
            .options
            .iter()
            .map(|option| {
                let command = name.to_string();
                let value = option.clone();
                let handler: ActionHandler<E> =
                    Rc::new(move |editor: &E| exec_or_warn(editor, &command, Some(&value)));
                (option.clone(), handler)
            })
            .collect();
        let name = name.to_string();

        Rc::new(move |editor: &E, value: &str| match handlers.get(value) {
            Some(handler) => {
                handler(editor);
                true
            }
            None => {
                tracing::warn!(selectbox = %name, value, "no handler for selected value");
                false
            }
        })
    }

    /// State query for a button: the definition's query, or
    /// `query_command_state(name)`.
    fn button_state_handler(&self, name: &str, def: &ButtonDef<E>) -> StateQuery<E> {
        if let Some(query) = &def.query {
            return Rc::clone(query);
        }
        let name = name.to_string();
        Rc::new(move |editor: &E| editor.query_command_state(&name))
    }

    /// State query for a selectbox: the definition's query, or the editor's
    /// selected style stored under `name`.
    fn selectbox_state_handler(&self, name: &str, def: &SelectboxDef<E>) -> StyleQuery<E> {
        if let Some(query) = &def.query {
            return Rc::clone(query);
        }
        let name = name.to_string();
        Rc::new(move |editor: &E| editor.selected_styles().get(&name).cloned())
    }
}

/// Resolver using only the default synthesis rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHandlers;

impl<E: RichTextEditor + 'static> HandlerResolver<E> for DefaultHandlers {}
