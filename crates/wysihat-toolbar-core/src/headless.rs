//! In-memory implementation of the editor and platform traits.
//!
//! [`HeadlessDocument`] is a small element tree with just enough behaviour for
//! the toolbar: classes, attributes, text, `<option>` selection and listener
//! dispatch for clicks and value changes. [`HeadlessEditor`] and
//! [`HeadlessPlatform`] sit on top of it. Hosts without a browser (server-side
//! previews, tests) can drive a full toolbar through them.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

use smol_str::SmolStr;

use crate::config::MarkupConfig;
use crate::controls::ControlSpec;
use crate::editor::{EditorEvent, RichTextEditor, SelectedStyles};
use crate::events::{BusSubscription, EventBus};
use crate::platform::{PlatformError, ToolbarPlatform};

/// Handle to a node of a [`HeadlessDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DomEvent {
    Click,
    Change,
}

type Handler = Rc<dyn Fn(&str)>;

#[derive(Debug, Default)]
struct Node {
    /// `None` for text nodes.
    tag: Option<SmolStr>,
    text: String,
    attributes: Vec<(String, String)>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    selected: bool,
}

struct Listener {
    id: u64,
    node: NodeId,
    event: DomEvent,
    handler: Handler,
}

#[derive(Default)]
struct Tree {
    nodes: Vec<Node>,
    listeners: Vec<Listener>,
    next_listener: u64,
}

impl Tree {
    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0]
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: String) {
        let attributes = &mut self.nodes[node.0].attributes;
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => attributes.push((name.to_string(), value)),
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.nodes[select.0]
            .children
            .iter()
            .copied()
            .filter(|&c| self.nodes[c.0].tag.as_deref() == Some("option"))
            .collect()
    }

    fn option_value(&self, option: NodeId) -> String {
        match self.attribute(option, "value") {
            Some(value) => value.to_string(),
            None => self.text(option),
        }
    }

    fn text(&self, node: NodeId) -> String {
        let data = &self.nodes[node.0];
        if data.tag.is_none() {
            return data.text.clone();
        }
        data.children.iter().map(|&c| self.text(c)).collect()
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let data = &self.nodes[node.0];
        let Some(tag) = &data.tag else {
            out.push_str(&escape(&data.text, false));
            return;
        };
        out.push('<');
        out.push_str(tag);
        for (name, value) in &data.attributes {
            out.push_str(&format!(" {name}=\"{}\"", escape(value, true)));
        }
        if data.selected {
            out.push_str(" selected");
        }
        out.push('>');
        for &child in &data.children {
            self.write_html(child, out);
        }
        out.push_str(&format!("</{tag}>"));
    }

    fn handlers(&self, node: NodeId, event: DomEvent) -> Vec<Handler> {
        self.listeners
            .iter()
            .filter(|l| l.node == node && l.event == event)
            .map(|l| Rc::clone(&l.handler))
            .collect()
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// Shared in-memory element tree. Cloning yields another handle to the same
/// tree.
///
/// Nodes are never freed; [`remove`](Self::remove) only detaches them.
#[derive(Clone)]
pub struct HeadlessDocument {
    tree: Rc<RefCell<Tree>>,
    body: NodeId,
}

impl HeadlessDocument {
    /// A document holding an empty `<body>`.
    pub fn new() -> Self {
        let mut tree = Tree::default();
        let body = tree.push(Node {
            tag: Some(SmolStr::new_static("body")),
            ..Node::default()
        });
        Self {
            tree: Rc::new(RefCell::new(tree)),
            body,
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        self.tree.borrow_mut().push(Node {
            tag: Some(SmolStr::new(tag)),
            ..Node::default()
        })
    }

    /// Append a text node to `parent`.
    pub fn append_text(&self, parent: NodeId, text: &str) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let node = tree.push(Node {
            text: text.to_string(),
            parent: Some(parent),
            ..Node::default()
        });
        tree.nodes[parent.0].children.push(node);
        node
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree.borrow_mut();
        tree.detach(child);
        tree.nodes[child.0].parent = Some(parent);
        tree.nodes[parent.0].children.push(child);
    }

    /// Insert `node` into `reference`'s parent, directly before `reference`.
    pub fn insert_before(&self, reference: NodeId, node: NodeId) -> Result<(), PlatformError> {
        let mut tree = self.tree.borrow_mut();
        let parent = tree.nodes[reference.0]
            .parent
            .ok_or_else(|| PlatformError::from("reference node has no parent"))?;
        tree.detach(node);
        let siblings = &mut tree.nodes[parent.0].children;
        let index = siblings
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(siblings.len());
        siblings.insert(index, node);
        tree.nodes[node.0].parent = Some(parent);
        Ok(())
    }

    /// Detach `node` from its parent. Detached nodes are left alone.
    pub fn remove(&self, node: NodeId) {
        self.tree.borrow_mut().detach(node);
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.borrow().nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.borrow().nodes[node.0].children.clone()
    }

    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let parent = tree.nodes[node.0].parent?;
        let siblings = &tree.nodes[parent.0].children;
        let index = siblings.iter().position(|&c| c == node)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    pub fn tag(&self, node: NodeId) -> Option<SmolStr> {
        self.tree.borrow().nodes[node.0].tag.clone()
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree.borrow().attribute(node, name).map(str::to_string)
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.tree
            .borrow_mut()
            .set_attribute(node, name, value.to_string());
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree.borrow().has_class(node, class)
    }

    /// Add each whitespace-separated part of `class` that is not present yet.
    pub fn add_class(&self, node: NodeId, class: &str) {
        let mut tree = self.tree.borrow_mut();
        for class in class.split_whitespace() {
            if tree.has_class(node, class) {
                continue;
            }
            let classes = match tree.attribute(node, "class") {
                Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
                _ => class.to_string(),
            };
            tree.set_attribute(node, "class", classes);
        }
    }

    pub fn remove_class(&self, node: NodeId, class: &str) {
        let mut tree = self.tree.borrow_mut();
        let Some(existing) = tree.attribute(node, "class") else {
            return;
        };
        let classes = existing
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        tree.set_attribute(node, "class", classes);
    }

    /// First descendant of `root` (depth first, `root` excluded) carrying
    /// `class`.
    pub fn find_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let mut stack: Vec<NodeId> = tree.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if tree.has_class(node, class) {
                return Some(node);
            }
            stack.extend(tree.nodes[node.0].children.iter().rev().copied());
        }
        None
    }

    /// Text content of `node` and its descendants.
    pub fn text(&self, node: NodeId) -> String {
        self.tree.borrow().text(node)
    }

    pub fn is_selected(&self, option: NodeId) -> bool {
        self.tree.borrow().nodes[option.0].selected
    }

    /// Current value of a `<select>`: the selected option's value, or the
    /// first option's when none is selected.
    pub fn value(&self, select: NodeId) -> Option<String> {
        let tree = self.tree.borrow();
        let options = tree.options(select);
        let option = options
            .iter()
            .copied()
            .find(|&o| tree.nodes[o.0].selected)
            .or_else(|| options.first().copied())?;
        Some(tree.option_value(option))
    }

    /// Select the option of `select` whose value is `value`, deselecting the
    /// others. No listener runs. Returns false, changing nothing, when no
    /// option matches.
    pub fn select_value(&self, select: NodeId, value: &str) -> bool {
        let mut tree = self.tree.borrow_mut();
        let options = tree.options(select);
        let Some(target) = options
            .iter()
            .copied()
            .find(|&o| tree.option_value(o) == value)
        else {
            return false;
        };
        for option in options {
            tree.nodes[option.0].selected = option == target;
        }
        true
    }

    /// Deselect every option of `select`.
    pub fn clear_selection(&self, select: NodeId) {
        let mut tree = self.tree.borrow_mut();
        for option in tree.options(select) {
            tree.nodes[option.0].selected = false;
        }
    }

    /// Serialize `node` and its descendants.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.tree.borrow().write_html(node, &mut out);
        out
    }

    /// Call `callback` when `node` is clicked.
    pub fn on_click(&self, node: NodeId, callback: impl Fn() + 'static) -> HeadlessListener {
        self.listen(node, DomEvent::Click, Rc::new(move |_: &str| callback()))
    }

    /// Call `callback` with the new value when the selection of `node`
    /// changes.
    pub fn on_change(&self, node: NodeId, callback: impl Fn(&str) + 'static) -> HeadlessListener {
        self.listen(node, DomEvent::Change, Rc::new(callback))
    }

    /// Simulate a click. Returns false when no listener handled it.
    pub fn click(&self, node: NodeId) -> bool {
        let handlers = self.tree.borrow().handlers(node, DomEvent::Click);
        for handler in &handlers {
            handler("");
        }
        !handlers.is_empty()
    }

    /// Simulate a user choosing `value` in `select`: the selection changes
    /// first, then change listeners run with the new value. Returns false,
    /// running nothing, when no option has that value.
    pub fn select_option(&self, select: NodeId, value: &str) -> bool {
        if !self.select_value(select, value) {
            return false;
        }
        let handlers = self.tree.borrow().handlers(select, DomEvent::Change);
        for handler in &handlers {
            handler(value);
        }
        true
    }

    /// Number of listeners bound to `node`.
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.tree
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.node == node)
            .count()
    }

    fn listen(&self, node: NodeId, event: DomEvent, handler: Handler) -> HeadlessListener {
        let mut tree = self.tree.borrow_mut();
        let id = tree.next_listener;
        tree.next_listener += 1;
        tree.listeners.push(Listener {
            id,
            node,
            event,
            handler,
        });
        HeadlessListener {
            id,
            tree: Rc::downgrade(&self.tree),
        }
    }
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HeadlessDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessDocument")
            .field("body", &self.to_html(self.body))
            .finish()
    }
}

/// Listener guard. Dropping it unbinds the listener.
#[must_use = "dropping the listener unbinds it immediately"]
pub struct HeadlessListener {
    id: u64,
    tree: Weak<RefCell<Tree>>,
}

impl Drop for HeadlessListener {
    fn drop(&mut self) {
        if let Some(tree) = self.tree.upgrade() {
            tree.borrow_mut().listeners.retain(|l| l.id != self.id);
        }
    }
}

impl std::fmt::Debug for HeadlessListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HeadlessListener").field(&self.id).finish()
    }
}

/// One recorded [`RichTextEditor::exec_command`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecCall {
    pub command: String,
    pub show_ui: bool,
    pub value: Option<String>,
}

/// Editor over a [`HeadlessDocument`] element.
///
/// Commands are simulated: one without a value toggles that command's state,
/// one with a value stores it as the style of the same name. Every call and
/// every fired event is recorded for inspection.
pub struct HeadlessEditor {
    document: HeadlessDocument,
    element: NodeId,
    bus: EventBus,
    states: RefCell<BTreeMap<String, bool>>,
    styles: RefCell<SelectedStyles>,
    failing: RefCell<BTreeSet<String>>,
    calls: RefCell<Vec<ExecCall>>,
    fired: RefCell<Vec<EditorEvent>>,
}

impl HeadlessEditor {
    /// Wrap an existing element.
    pub fn new(document: &HeadlessDocument, element: NodeId) -> Self {
        Self {
            document: document.clone(),
            element,
            bus: EventBus::new(),
            states: RefCell::default(),
            styles: RefCell::default(),
            failing: RefCell::default(),
            calls: RefCell::default(),
            fired: RefCell::default(),
        }
    }

    /// Create an editable `<div class="editor">` at the end of the body and
    /// wrap it.
    pub fn create(document: &HeadlessDocument) -> Self {
        let element = document.create_element("div");
        document.add_class(element, "editor");
        document.set_attribute(element, "contenteditable", "true");
        document.append_child(document.body(), element);
        Self::new(document, element)
    }

    pub fn document(&self) -> &HeadlessDocument {
        &self.document
    }

    pub fn set_command_state(&self, command: &str, state: bool) {
        self.states.borrow_mut().insert(command.to_string(), state);
    }

    pub fn set_style(&self, name: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    pub fn clear_style(&self, name: &str) {
        self.styles.borrow_mut().remove(name);
    }

    /// Make every later call of `command` fail.
    pub fn fail_command(&self, command: &str) {
        self.failing.borrow_mut().insert(command.to_string());
    }

    /// Recorded `exec_command` calls, oldest first.
    pub fn calls(&self) -> Vec<ExecCall> {
        self.calls.borrow().clone()
    }

    /// Recorded fired events, oldest first.
    pub fn fired(&self) -> Vec<EditorEvent> {
        self.fired.borrow().clone()
    }

    /// Forget recorded calls and events.
    pub fn clear_log(&self) {
        self.calls.borrow_mut().clear();
        self.fired.borrow_mut().clear();
    }

    pub fn subscriber_count(&self, event: EditorEvent) -> usize {
        self.bus.subscriber_count(event)
    }
}

impl RichTextEditor for HeadlessEditor {
    type Element = NodeId;
    type Subscription = BusSubscription;

    fn element(&self) -> &NodeId {
        &self.element
    }

    fn exec_command(
        &self,
        command: &str,
        show_ui: bool,
        value: Option<&str>,
    ) -> Result<bool, PlatformError> {
        self.calls.borrow_mut().push(ExecCall {
            command: command.to_string(),
            show_ui,
            value: value.map(str::to_string),
        });
        if self.failing.borrow().contains(command) {
            return Err(PlatformError(format!("command `{command}` is not supported")));
        }
        match value {
            Some(value) => self.set_style(command, value),
            None => {
                let mut states = self.states.borrow_mut();
                let state = states.entry(command.to_string()).or_default();
                *state = !*state;
            }
        }
        Ok(true)
    }

    fn query_command_state(&self, command: &str) -> bool {
        self.states.borrow().get(command).copied().unwrap_or(false)
    }

    fn selected_styles(&self) -> SelectedStyles {
        self.styles.borrow().clone()
    }

    fn observe(&self, event: EditorEvent, callback: Box<dyn Fn()>) -> BusSubscription {
        self.bus.subscribe(event, callback)
    }

    fn fire(&self, event: EditorEvent) {
        self.fired.borrow_mut().push(event);
        self.bus.emit(event);
    }
}

impl std::fmt::Debug for HeadlessEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessEditor")
            .field("element", &self.element)
            .field("states", &self.states.borrow())
            .field("styles", &self.styles.borrow())
            .finish_non_exhaustive()
    }
}

/// Renders toolbar markup into a [`HeadlessDocument`].
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    document: HeadlessDocument,
    markup: MarkupConfig,
}

impl HeadlessPlatform {
    pub fn new(document: &HeadlessDocument) -> Self {
        Self::with_markup(document, MarkupConfig::default())
    }

    pub fn with_markup(document: &HeadlessDocument, markup: MarkupConfig) -> Self {
        Self {
            document: document.clone(),
            markup,
        }
    }

    pub fn document(&self) -> &HeadlessDocument {
        &self.document
    }
}

impl<E: RichTextEditor<Element = NodeId>> ToolbarPlatform<E> for HeadlessPlatform {
    type Element = NodeId;
    type Listener = HeadlessListener;

    fn create_toolbar_element(&self, editor: &E) -> Result<NodeId, PlatformError> {
        let toolbar = self.document.create_element("div");
        self.document.add_class(toolbar, &self.markup.toolbar_class);
        self.document.insert_before(*editor.element(), toolbar)?;
        Ok(toolbar)
    }

    fn create_button_element(
        &self,
        toolbar: &NodeId,
        spec: &ControlSpec,
    ) -> Result<NodeId, PlatformError> {
        let doc = &self.document;
        let button = doc.create_element("a");
        doc.set_attribute(button, "href", "#");
        doc.add_class(button, &self.markup.button_class);
        doc.add_class(button, &spec.name);
        let label = doc.create_element("span");
        doc.append_text(label, &spec.label);
        doc.append_child(button, label);
        doc.append_child(*toolbar, button);
        Ok(button)
    }

    fn create_selectbox_element(
        &self,
        toolbar: &NodeId,
        spec: &ControlSpec,
        options: &[String],
    ) -> Result<NodeId, PlatformError> {
        let doc = &self.document;
        let select = doc.create_element("select");
        doc.add_class(select, &spec.name);
        for value in options {
            let option = doc.create_element("option");
            doc.set_attribute(option, "value", value);
            doc.append_text(option, value);
            doc.append_child(select, option);
        }
        doc.append_child(*toolbar, select);
        Ok(select)
    }

    fn observe_button_click(
        &self,
        element: &NodeId,
        callback: Box<dyn Fn()>,
    ) -> Result<HeadlessListener, PlatformError> {
        Ok(self.document.on_click(*element, callback))
    }

    fn observe_option_select(
        &self,
        element: &NodeId,
        callback: Box<dyn Fn(&str)>,
    ) -> Result<HeadlessListener, PlatformError> {
        Ok(self.document.on_change(*element, callback))
    }

    fn update_button_state(&self, element: &NodeId, _name: &str, state: bool) {
        if state {
            self.document.add_class(*element, &self.markup.selected_class);
        } else {
            self.document
                .remove_class(*element, &self.markup.selected_class);
        }
    }

    fn update_selectbox_state(&self, element: &NodeId, _name: &str, state: &str) -> bool {
        self.document.select_value(*element, state)
    }

    fn clear_selectbox_state(&self, element: &NodeId) {
        self.document.clear_selection(*element);
    }

    fn remove_element(&self, element: &NodeId) {
        self.document.remove(*element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_before() {
        let doc = HeadlessDocument::new();
        let first = doc.create_element("p");
        doc.append_child(doc.body(), first);
        let second = doc.create_element("div");
        doc.insert_before(first, second).unwrap();

        assert_eq!(doc.children(doc.body()), vec![second, first]);
        assert_eq!(doc.previous_sibling(first), Some(second));
        assert_eq!(doc.previous_sibling(second), None);
    }

    #[test]
    fn test_insert_before_detached_reference() {
        let doc = HeadlessDocument::new();
        let orphan = doc.create_element("p");
        let node = doc.create_element("div");
        assert!(doc.insert_before(orphan, node).is_err());
        assert_eq!(doc.parent(node), None);
    }

    #[test]
    fn test_classes() {
        let doc = HeadlessDocument::new();
        let node = doc.create_element("a");
        doc.add_class(node, "button");
        doc.add_class(node, "bold");
        doc.add_class(node, "bold");
        assert_eq!(doc.attribute(node, "class").as_deref(), Some("button bold"));
        doc.add_class(node, " align  bold left");
        assert_eq!(
            doc.attribute(node, "class").as_deref(),
            Some("button bold align left")
        );

        doc.remove_class(node, "button");
        assert!(!doc.has_class(node, "button"));
        assert!(doc.has_class(node, "bold"));
    }

    #[test]
    fn test_find_by_class_is_depth_first() {
        let doc = HeadlessDocument::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("span");
        let sibling = doc.create_element("p");
        doc.add_class(inner, "target");
        doc.add_class(sibling, "target");
        doc.append_child(outer, inner);
        doc.append_child(doc.body(), outer);
        doc.append_child(doc.body(), sibling);

        assert_eq!(doc.find_by_class(doc.body(), "target"), Some(inner));
        assert_eq!(doc.tag(inner).as_deref(), Some("span"));
        assert_eq!(doc.find_by_class(inner, "target"), None);
    }

    #[test]
    fn test_to_html_escapes() {
        let doc = HeadlessDocument::new();
        let node = doc.create_element("span");
        doc.set_attribute(node, "title", "a \"b\"");
        doc.append_text(node, "<i> & co");
        assert_eq!(
            doc.to_html(node),
            r#"<span title="a &quot;b&quot;">&lt;i&gt; &amp; co</span>"#
        );
    }

    #[test]
    fn test_select_option_updates_value_before_listeners() {
        let doc = HeadlessDocument::new();
        let select = doc.create_element("select");
        for value in ["a", "b"] {
            let option = doc.create_element("option");
            doc.set_attribute(option, "value", value);
            doc.append_child(select, option);
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let _listener = {
            let doc = doc.clone();
            let seen = Rc::clone(&seen);
            doc.clone().on_change(select, move |value| {
                seen.borrow_mut().push((value.to_string(), doc.value(select)));
            })
        };

        assert_eq!(doc.value(select).as_deref(), Some("a"));
        assert!(doc.select_option(select, "b"));
        assert!(!doc.select_option(select, "z"));
        assert_eq!(
            *seen.borrow(),
            vec![("b".to_string(), Some("b".to_string()))]
        );
    }

    #[test]
    fn test_listener_drop_unbinds() {
        let doc = HeadlessDocument::new();
        let node = doc.create_element("a");
        let count = Rc::new(RefCell::new(0));

        let listener = {
            let count = Rc::clone(&count);
            doc.on_click(node, move || *count.borrow_mut() += 1)
        };
        assert!(doc.click(node));
        assert_eq!(doc.listener_count(node), 1);

        drop(listener);
        assert!(!doc.click(node));
        assert_eq!(*count.borrow(), 1);
        assert_eq!(doc.listener_count(node), 0);
    }

    #[test]
    fn test_editor_simulates_commands() {
        let doc = HeadlessDocument::new();
        let editor = HeadlessEditor::create(&doc);

        editor.exec_command("bold", false, None).unwrap();
        assert!(editor.query_command_state("bold"));
        editor.exec_command("bold", false, None).unwrap();
        assert!(!editor.query_command_state("bold"));

        editor
            .exec_command("fontname", false, Some("Georgia"))
            .unwrap();
        assert_eq!(
            editor.selected_styles().get("fontname").map(String::as_str),
            Some("Georgia")
        );
        assert_eq!(editor.calls().len(), 3);
    }

    #[test]
    fn test_editor_failing_command() {
        let doc = HeadlessDocument::new();
        let editor = HeadlessEditor::create(&doc);
        editor.fail_command("subscript");

        assert!(editor.exec_command("subscript", false, None).is_err());
        assert!(!editor.query_command_state("subscript"));
        // Still recorded.
        assert_eq!(editor.calls()[0].command, "subscript");
    }
}
