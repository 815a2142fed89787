//! The toolbar: registration and state synchronization.
//!
//! Every control follows the same protocol:
//!
//! 1. The definition is normalized (see [`ControlSpec`]).
//! 2. The platform creates the element and appends it to the container.
//! 3. An action is resolved and bound to the control's activation event.
//!    Activating the control runs the action, then fires
//!    [`EditorEvent::Change`] and [`EditorEvent::CursorMove`] on the editor.
//! 4. A state query is resolved and subscribed to
//!    [`EditorEvent::CursorMove`]; the control's visual state is updated only
//!    when the queried state changes.

use std::rc::{Rc, Weak};

use smol_str::SmolStr;

use crate::button_sets::ButtonSetRegistry;
use crate::config::{ToolbarConfig, UnmatchedStylePolicy};
use crate::controls::{
    ActionHandler, ButtonDef, ControlId, ControlKind, ControlSpec, SelectboxDef, StateQuery,
    StyleQuery,
};
use crate::editor::{EditorEvent, RichTextEditor};
use crate::error::ToolbarError;
use crate::handlers::{DefaultHandlers, HandlerResolver, SelectDispatch};
use crate::platform::ToolbarPlatform;
use crate::state::StateCache;

/// A registered control and the bindings that keep it alive.
struct Control<E: RichTextEditor, P: ToolbarPlatform<E>> {
    id: ControlId,
    name: SmolStr,
    kind: ControlKind,
    element: P::Element,
    _listener: P::Listener,
    _subscription: E::Subscription,
}

/// A row of command controls attached above an editor.
///
/// The toolbar shares the editor (it does not own it) and owns its container
/// element plus every control it creates. Dropping the toolbar drops all event
/// bindings and editor subscriptions; [`Toolbar::destroy`] also removes the
/// markup.
pub struct Toolbar<E, P, R = DefaultHandlers>
where
    E: RichTextEditor + 'static,
    P: ToolbarPlatform<E> + 'static,
    R: HandlerResolver<E>,
{
    editor: Rc<E>,
    platform: Rc<P>,
    resolver: R,
    config: ToolbarConfig,
    element: P::Element,
    controls: Vec<Control<E, P>>,
    next_id: u32,
}

impl<E, P> Toolbar<E, P, DefaultHandlers>
where
    E: RichTextEditor + 'static,
    P: ToolbarPlatform<E> + 'static,
{
    /// Create the toolbar container directly before the editor's element.
    pub fn new(editor: Rc<E>, platform: P) -> Result<Self, ToolbarError> {
        Self::with_config(editor, platform, DefaultHandlers, ToolbarConfig::default())
    }
}

impl<E, P, R> Toolbar<E, P, R>
where
    E: RichTextEditor + 'static,
    P: ToolbarPlatform<E> + 'static,
    R: HandlerResolver<E>,
{
    pub fn with_config(
        editor: Rc<E>,
        platform: P,
        resolver: R,
        config: ToolbarConfig,
    ) -> Result<Self, ToolbarError> {
        let element = platform.create_toolbar_element(&*editor)?;
        tracing::debug!("toolbar attached");
        Ok(Self {
            editor,
            platform: Rc::new(platform),
            resolver,
            config,
            element,
            controls: Vec::new(),
            next_id: 0,
        })
    }

    /// Create the toolbar and add every set named in
    /// [`ToolbarConfig::button_sets`].
    ///
    /// If a set is unknown or holds an invalid definition, the partially
    /// built toolbar is destroyed before the error is returned, so no
    /// container is left in front of the editor.
    pub fn with_button_sets(
        editor: Rc<E>,
        platform: P,
        resolver: R,
        config: ToolbarConfig,
        registry: &ButtonSetRegistry<E>,
    ) -> Result<Self, ToolbarError> {
        let mut toolbar = Self::with_config(editor, platform, resolver, config)?;
        if let Err(err) = toolbar.install_configured_sets(registry) {
            toolbar.destroy();
            return Err(err);
        }
        Ok(toolbar)
    }

    /// The container element.
    pub fn element(&self) -> &P::Element {
        &self.element
    }

    pub fn editor(&self) -> &Rc<E> {
        &self.editor
    }

    pub fn config(&self) -> &ToolbarConfig {
        &self.config
    }

    /// Number of registered controls.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Names of the registered controls, in registration order.
    pub fn control_names(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(|c| c.name.as_str())
    }

    /// Element and kind of a registered control.
    pub fn control(&self, id: ControlId) -> Option<(&P::Element, ControlKind)> {
        self.controls
            .iter()
            .find(|c| c.id == id)
            .map(|c| (&c.element, c.kind))
    }

    /// Register a button.
    pub fn add_button(&mut self, def: ButtonDef<E>) -> Result<ControlId, ToolbarError> {
        let spec = def.spec()?;
        let element = self.platform.create_button_element(&self.element, &spec)?;

        let handler = self.resolver.button_handler(&spec.name, &def);
        let listener = match self.observe_button_click(&element, handler) {
            Ok(listener) => listener,
            Err(err) => {
                self.platform.remove_element(&element);
                return Err(err);
            }
        };

        let query = self.resolver.button_state_handler(&spec.name, &def);
        let subscription = self.observe_state_changes(&element, &spec.name, query);

        tracing::debug!(name = %spec.name, "button registered");
        Ok(self.push_control(spec, ControlKind::Button, element, listener, subscription))
    }

    /// Register a button, using `handler` when the definition has none.
    pub fn add_button_with_handler(
        &mut self,
        def: ButtonDef<E>,
        handler: ActionHandler<E>,
    ) -> Result<ControlId, ToolbarError> {
        self.add_button(def.or_handler(handler))
    }

    /// Register a selectbox.
    pub fn add_selectbox(&mut self, def: SelectboxDef<E>) -> Result<ControlId, ToolbarError> {
        let spec = def.spec()?;
        let element = self
            .platform
            .create_selectbox_element(&self.element, &spec, &def.options)?;

        let dispatch = self.resolver.selectbox_handler(&spec.name, &def);
        let listener = match self.observe_option_select(&element, dispatch) {
            Ok(listener) => listener,
            Err(err) => {
                self.platform.remove_element(&element);
                return Err(err);
            }
        };

        let query = self.resolver.selectbox_state_handler(&spec.name, &def);
        let subscription = self.observe_state_changes_selectbox(&element, &spec.name, query);

        tracing::debug!(name = %spec.name, options = def.options.len(), "selectbox registered");
        Ok(self.push_control(spec, ControlKind::Selectbox, element, listener, subscription))
    }

    /// Register every button of `set`, in order.
    ///
    /// Stops at the first invalid definition; buttons registered before it
    /// stay on the toolbar.
    pub fn add_button_set<'a, I>(&mut self, set: I) -> Result<Vec<ControlId>, ToolbarError>
    where
        I: IntoIterator<Item = &'a ButtonDef<E>>,
    {
        set.into_iter()
            .map(|def| self.add_button(def.clone()))
            .collect()
    }

    /// Register the set stored under `name` in `registry`.
    pub fn add_named_button_set(
        &mut self,
        registry: &ButtonSetRegistry<E>,
        name: &str,
    ) -> Result<Vec<ControlId>, ToolbarError> {
        let set = registry
            .get(name)
            .ok_or_else(|| ToolbarError::UnknownButtonSet(name.to_string()))?;
        self.add_button_set(set)
    }

    /// Register every set listed in [`ToolbarConfig::button_sets`].
    pub fn install_configured_sets(
        &mut self,
        registry: &ButtonSetRegistry<E>,
    ) -> Result<Vec<ControlId>, ToolbarError> {
        let names = self.config.button_sets.clone();
        let mut ids = Vec::new();
        for name in &names {
            ids.extend(self.add_named_button_set(registry, name)?);
        }
        Ok(ids)
    }

    /// Tear down a control: unbind its events, unsubscribe it from the editor
    /// and detach its element. Returns false for an unknown id.
    pub fn remove_control(&mut self, id: ControlId) -> bool {
        let Some(index) = self.controls.iter().position(|c| c.id == id) else {
            return false;
        };
        let control = self.controls.remove(index);
        self.platform.remove_element(&control.element);
        tracing::debug!(name = %control.name, "control removed");
        true
    }

    /// Tear down every control and remove the container.
    pub fn destroy(mut self) {
        for control in self.controls.drain(..) {
            self.platform.remove_element(&control.element);
        }
        self.platform.remove_element(&self.element);
        tracing::debug!("toolbar destroyed");
    }

    fn push_control(
        &mut self,
        spec: ControlSpec,
        kind: ControlKind,
        element: P::Element,
        listener: P::Listener,
        subscription: E::Subscription,
    ) -> ControlId {
        let id = ControlId(self.next_id);
        self.next_id += 1;
        self.controls.push(Control {
            id,
            name: spec.name,
            kind,
            element,
            _listener: listener,
            _subscription: subscription,
        });
        id
    }

    fn observe_button_click(
        &self,
        element: &P::Element,
        handler: ActionHandler<E>,
    ) -> Result<P::Listener, ToolbarError> {
        let editor = Rc::downgrade(&self.editor);
        let listener = self.platform.observe_button_click(
            element,
            Box::new(move || {
                let Some(editor) = editor.upgrade() else {
                    return;
                };
                handler(&*editor);
                announce_edit(&*editor);
            }),
        )?;
        Ok(listener)
    }

    fn observe_option_select(
        &self,
        element: &P::Element,
        dispatch: SelectDispatch<E>,
    ) -> Result<P::Listener, ToolbarError> {
        let editor = Rc::downgrade(&self.editor);
        let listener = self.platform.observe_option_select(
            element,
            Box::new(move |value: &str| {
                let Some(editor) = editor.upgrade() else {
                    return;
                };
                if dispatch(&*editor, value) {
                    announce_edit(&*editor);
                }
            }),
        )?;
        Ok(listener)
    }

    fn observe_state_changes(
        &self,
        element: &P::Element,
        name: &SmolStr,
        query: StateQuery<E>,
    ) -> E::Subscription {
        let editor: Weak<E> = Rc::downgrade(&self.editor);
        let platform = Rc::clone(&self.platform);
        let element = element.clone();
        let name = name.clone();
        let previous = StateCache::new(false);

        self.editor.observe(
            EditorEvent::CursorMove,
            Box::new(move || {
                let Some(editor) = editor.upgrade() else {
                    return;
                };
                let state = query(&*editor);
                if previous.update(state) {
                    tracing::trace!(%name, state, "button state changed");
                    platform.update_button_state(&element, &name, state);
                }
            }),
        )
    }

    fn observe_state_changes_selectbox(
        &self,
        element: &P::Element,
        name: &SmolStr,
        query: StyleQuery<E>,
    ) -> E::Subscription {
        let editor: Weak<E> = Rc::downgrade(&self.editor);
        let platform = Rc::clone(&self.platform);
        let element = element.clone();
        let name = name.clone();
        let policy = self.config.unmatched_style;
        let previous: StateCache<Option<String>> = StateCache::new(None);

        self.editor.observe(
            EditorEvent::CursorMove,
            Box::new(move || {
                let Some(editor) = editor.upgrade() else {
                    return;
                };
                let state = query(&*editor);
                if !previous.update(state.clone()) {
                    return;
                }
                tracing::trace!(%name, ?state, "selectbox state changed");
                let matched = state
                    .as_deref()
                    .is_some_and(|value| platform.update_selectbox_state(&element, &name, value));
                if !matched {
                    tracing::debug!(%name, ?state, ?policy, "no option matches style");
                    if policy == UnmatchedStylePolicy::ClearSelection {
                        platform.clear_selectbox_state(&element);
                    }
                }
            }),
        )
    }
}

/// Tell the editor an edit happened: content first, then cursor, so state
/// observers see the result of the edit.
fn announce_edit<E: RichTextEditor>(editor: &E) {
    editor.fire(EditorEvent::Change);
    editor.fire(EditorEvent::CursorMove);
}

impl<E, P, R> std::fmt::Debug for Toolbar<E, P, R>
where
    E: RichTextEditor + 'static,
    P: ToolbarPlatform<E> + 'static,
    R: HandlerResolver<E>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolbar")
            .field("controls", &self.control_names().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
