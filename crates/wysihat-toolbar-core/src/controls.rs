//! Control definitions.
//!
//! A [`ButtonDef`] or [`SelectboxDef`] describes one control before it is
//! registered. Both are validated once, at registration, by
//! [`ButtonDef::spec`] / [`SelectboxDef::spec`].

use std::rc::Rc;

use smol_str::SmolStr;

use crate::error::ToolbarError;

/// Action run when a button is activated.
pub type ActionHandler<E> = Rc<dyn Fn(&E)>;

/// Button state query: is the command active at the selection?
pub type StateQuery<E> = Rc<dyn Fn(&E) -> bool>;

/// Action run when a selectbox value is chosen. Receives the chosen value.
pub type SelectHandler<E> = Rc<dyn Fn(&E, &str)>;

/// Selectbox state query: which option is currently active, if any?
pub type StyleQuery<E> = Rc<dyn Fn(&E) -> Option<String>>;

/// Identifier of a registered control, unique within its toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub(crate) u32);

impl ControlId {
    /// Rebuild an id from [`get`](Self::get), e.g. after a round trip
    /// through JavaScript.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Button,
    Selectbox,
}

/// Normalized identity of a control, handed to the platform for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSpec {
    /// Command name; also the control's distinguishing class.
    pub name: SmolStr,
    /// Text rendered inside the control.
    pub label: String,
}

/// Resolve `name`/`label` into a [`ControlSpec`].
///
/// The name defaults to the lower-cased label, and the label to the name.
/// Empty strings count as absent.
fn normalize(name: Option<&str>, label: Option<&str>) -> Result<ControlSpec, ToolbarError> {
    let name = name.filter(|n| !n.is_empty());
    let label = label.filter(|l| !l.is_empty());
    match (name, label) {
        (Some(name), Some(label)) => Ok(ControlSpec {
            name: SmolStr::new(name),
            label: label.to_string(),
        }),
        (Some(name), None) => Ok(ControlSpec {
            name: SmolStr::new(name),
            label: name.to_string(),
        }),
        (None, Some(label)) => Ok(ControlSpec {
            name: SmolStr::new(label.to_lowercase()),
            label: label.to_string(),
        }),
        (None, None) => Err(ToolbarError::MissingIdentifier),
    }
}

/// Definition of a toolbar button.
pub struct ButtonDef<E> {
    pub name: Option<String>,
    pub label: Option<String>,
    pub handler: Option<ActionHandler<E>>,
    pub query: Option<StateQuery<E>>,
}

impl<E> ButtonDef<E> {
    /// A button whose name is the lower-cased label.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// A button identified by name only; the name doubles as its label.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn handler(mut self, handler: impl Fn(&E) + 'static) -> Self {
        self.handler = Some(Rc::new(handler));
        self
    }

    pub fn query(mut self, query: impl Fn(&E) -> bool + 'static) -> Self {
        self.query = Some(Rc::new(query));
        self
    }

    /// Use `handler` unless the definition already carries one.
    pub fn or_handler(mut self, handler: ActionHandler<E>) -> Self {
        if self.handler.is_none() {
            self.handler = Some(handler);
        }
        self
    }

    pub fn spec(&self) -> Result<ControlSpec, ToolbarError> {
        normalize(self.name.as_deref(), self.label.as_deref())
    }
}

impl<E> Default for ButtonDef<E> {
    fn default() -> Self {
        Self {
            name: None,
            label: None,
            handler: None,
            query: None,
        }
    }
}

impl<E> Clone for ButtonDef<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            label: self.label.clone(),
            handler: self.handler.clone(),
            query: self.query.clone(),
        }
    }
}

impl<E> std::fmt::Debug for ButtonDef<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButtonDef")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("handler", &self.handler.is_some())
            .field("query", &self.query.is_some())
            .finish()
    }
}

/// Definition of a toolbar selectbox.
pub struct SelectboxDef<E> {
    pub name: Option<String>,
    pub label: Option<String>,
    /// Selectable values, in display order. Each value is both the option's
    /// text and its identity.
    pub options: Vec<String>,
    pub handler: Option<SelectHandler<E>>,
    pub query: Option<StyleQuery<E>>,
}

impl<E> SelectboxDef<E> {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn handler(mut self, handler: impl Fn(&E, &str) + 'static) -> Self {
        self.handler = Some(Rc::new(handler));
        self
    }

    pub fn query(mut self, query: impl Fn(&E) -> Option<String> + 'static) -> Self {
        self.query = Some(Rc::new(query));
        self
    }

    pub fn spec(&self) -> Result<ControlSpec, ToolbarError> {
        let spec = normalize(self.name.as_deref(), self.label.as_deref())?;
        if self.options.is_empty() {
            return Err(ToolbarError::EmptyOptions { name: spec.name });
        }
        Ok(spec)
    }
}

impl<E> Default for SelectboxDef<E> {
    fn default() -> Self {
        Self {
            name: None,
            label: None,
            options: Vec::new(),
            handler: None,
            query: None,
        }
    }
}

impl<E> Clone for SelectboxDef<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            label: self.label.clone(),
            options: self.options.clone(),
            handler: self.handler.clone(),
            query: self.query.clone(),
        }
    }
}

impl<E> std::fmt::Debug for SelectboxDef<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectboxDef")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("options", &self.options)
            .field("handler", &self.handler.is_some())
            .field("query", &self.query.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Def = ButtonDef<()>;

    #[test]
    fn test_name_defaults_to_lowercased_label() {
        let spec = Def::labeled("Bold").spec().unwrap();
        assert_eq!(spec.name, "bold");
        assert_eq!(spec.label, "Bold");
    }

    #[test]
    fn test_explicit_name_wins() {
        let spec = Def::labeled("Strike").name("strikethrough").spec().unwrap();
        assert_eq!(spec.name, "strikethrough");
        assert_eq!(spec.label, "Strike");
    }

    #[test]
    fn test_label_defaults_to_name() {
        let spec = Def::named("insertorderedlist").spec().unwrap();
        assert_eq!(spec.label, "insertorderedlist");
    }

    #[test]
    fn test_missing_identifier() {
        assert!(matches!(
            Def::default().spec(),
            Err(ToolbarError::MissingIdentifier)
        ));
        // Empty strings don't count.
        assert!(matches!(
            Def::labeled("").name("").spec(),
            Err(ToolbarError::MissingIdentifier)
        ));
    }

    #[test]
    fn test_or_handler_keeps_existing() {
        let def = Def::labeled("Bold").handler(|_| {});
        let original = def.handler.clone().unwrap();
        let def = def.or_handler(Rc::new(|_: &()| {}));
        assert!(Rc::ptr_eq(&original, def.handler.as_ref().unwrap()));

        let def = Def::labeled("Bold").or_handler(Rc::new(|_: &()| {}));
        assert!(def.handler.is_some());
    }

    #[test]
    fn test_selectbox_requires_options() {
        let err = SelectboxDef::<()>::named("fontname").spec().unwrap_err();
        match err {
            ToolbarError::EmptyOptions { name } => assert_eq!(name, "fontname"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_selectbox_identifier_checked_first() {
        let def = SelectboxDef::<()>::default();
        assert!(matches!(def.spec(), Err(ToolbarError::MissingIdentifier)));
    }

    #[test]
    fn test_selectbox_spec() {
        let def = SelectboxDef::<()>::labeled("Style").options(["a", "b", "c"]);
        let spec = def.spec().unwrap();
        assert_eq!(spec.name, "style");
        assert_eq!(def.options, vec!["a", "b", "c"]);
    }
}
