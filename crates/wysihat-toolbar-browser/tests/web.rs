//! WASM browser tests for wysihat-toolbar-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use web_sys::{Document, Event, HtmlElement, HtmlSelectElement};
use wysihat_toolbar_browser::{
    BrowserToolbar, ButtonDef, ButtonSetRegistry, ContentEditableEditor, DefaultHandlers,
    DomPlatform, EditorEvent, RichTextEditor, SelectboxDef, Toolbar, ToolbarConfig, ToolbarError,
};

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// A fresh `<div>` appended to the body, wrapped as an editor.
fn make_editor() -> Rc<ContentEditableEditor> {
    let document = document();
    let element: HtmlElement = document.create_element("div").unwrap().unchecked_into();
    element.set_inner_html("<p>hello world</p>");
    document.body().unwrap().append_child(&element).unwrap();
    Rc::new(ContentEditableEditor::attach(element).unwrap())
}

fn make_toolbar(editor: &Rc<ContentEditableEditor>) -> BrowserToolbar {
    Toolbar::new(Rc::clone(editor), DomPlatform::new(document())).unwrap()
}

/// Log every editor notification into `log` while the listeners live.
fn record(
    editor: &ContentEditableEditor,
    log: &Rc<RefCell<Vec<EditorEvent>>>,
) -> Vec<gloo_events::EventListener> {
    [EditorEvent::Change, EditorEvent::CursorMove]
        .into_iter()
        .map(|event| {
            let log = Rc::clone(log);
            editor.observe(event, Box::new(move || log.borrow_mut().push(event)))
        })
        .collect()
}

// === Markup ===

#[wasm_bindgen_test]
fn test_attach_marks_editable() {
    let editor = make_editor();
    assert_eq!(editor.element().content_editable(), "true");
}

#[wasm_bindgen_test]
fn test_toolbar_precedes_editor() {
    let editor = make_editor();
    let toolbar = make_toolbar(&editor);

    let sibling = editor.element().previous_element_sibling().unwrap();
    assert_eq!(&sibling, toolbar.element());
    assert_eq!(sibling.class_name(), "editor_toolbar");
    toolbar.destroy();
}

#[wasm_bindgen_test]
fn test_button_markup() {
    let editor = make_editor();
    let mut toolbar = make_toolbar(&editor);
    toolbar.add_button(ButtonDef::labeled("Bold")).unwrap();

    assert_eq!(
        toolbar.element().inner_html(),
        r##"<a href="#" class="button bold"><span>Bold</span></a>"##
    );
    toolbar.destroy();
}

#[wasm_bindgen_test]
fn test_selectbox_markup() {
    let editor = make_editor();
    let mut toolbar = make_toolbar(&editor);
    toolbar
        .add_selectbox(SelectboxDef::named("style").options(["a", "b"]))
        .unwrap();

    assert_eq!(
        toolbar.element().inner_html(),
        r#"<select class="style"><option value="a">a</option><option value="b">b</option></select>"#
    );
    toolbar.destroy();
}

#[wasm_bindgen_test]
fn test_label_with_space_adds_each_word_as_class() {
    let editor = make_editor();
    let mut toolbar = make_toolbar(&editor);
    let id = toolbar.add_button(ButtonDef::labeled("Align Left")).unwrap();
    toolbar
        .add_selectbox(SelectboxDef::labeled("Font Name").options(["Georgia"]))
        .unwrap();

    let (button, _) = toolbar.control(id).unwrap();
    assert!(button.class_list().contains("align"));
    assert!(button.class_list().contains("left"));
    assert_eq!(
        toolbar.element().inner_html(),
        r##"<a href="#" class="button align left"><span>Align Left</span></a><select class="font name"><option value="Georgia">Georgia</option></select>"##
    );
    toolbar.destroy();
}

// === Events ===

#[wasm_bindgen_test]
fn test_click_notifies_change_then_cursormove() {
    let editor = make_editor();
    let mut toolbar = make_toolbar(&editor);
    let clicks = Rc::new(RefCell::new(0));
    let def = {
        let clicks = Rc::clone(&clicks);
        ButtonDef::labeled("Bold").handler(move |_: &ContentEditableEditor| *clicks.borrow_mut() += 1)
    };
    let id = toolbar.add_button(def).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let _listeners = record(&editor, &log);

    let (button, _) = toolbar.control(id).unwrap();
    button.unchecked_ref::<HtmlElement>().click();

    assert_eq!(*clicks.borrow(), 1);
    assert_eq!(
        *log.borrow(),
        vec![EditorEvent::Change, EditorEvent::CursorMove]
    );
    toolbar.destroy();
}

#[wasm_bindgen_test]
fn test_click_is_cancelled() {
    let editor = make_editor();
    let mut toolbar = make_toolbar(&editor);
    let id = toolbar
        .add_button(ButtonDef::labeled("Bold").handler(|_: &ContentEditableEditor| {}))
        .unwrap();

    let (button, _) = toolbar.control(id).unwrap();
    let event = Event::new_with_event_init_dict("click", &{
        let init = web_sys::EventInit::new();
        init.set_cancelable(true);
        init
    })
    .unwrap();
    button.dispatch_event(&event).unwrap();

    assert!(event.default_prevented());
    toolbar.destroy();
}

#[wasm_bindgen_test]
fn test_select_change_passes_new_value() {
    let editor = make_editor();
    let mut toolbar = make_toolbar(&editor);
    let chosen = Rc::new(RefCell::new(Vec::new()));
    let def = {
        let chosen = Rc::clone(&chosen);
        SelectboxDef::named("style")
            .options(["a", "b", "c"])
            .handler(move |_: &ContentEditableEditor, value: &str| {
                chosen.borrow_mut().push(value.to_string())
            })
    };
    let id = toolbar.add_selectbox(def).unwrap();

    let (select, _) = toolbar.control(id).unwrap();
    let select: &HtmlSelectElement = select.unchecked_ref();
    select.set_value("b");
    select.dispatch_event(&Event::new("change").unwrap()).unwrap();

    assert_eq!(*chosen.borrow(), vec!["b".to_string()]);
    toolbar.destroy();
}

#[wasm_bindgen_test]
fn test_select_change_is_cancelled() {
    let editor = make_editor();
    let mut toolbar = make_toolbar(&editor);
    let id = toolbar
        .add_selectbox(
            SelectboxDef::named("style")
                .options(["a", "b"])
                .handler(|_: &ContentEditableEditor, _: &str| {}),
        )
        .unwrap();
    let bubbled = Rc::new(RefCell::new(0));
    let _outer = {
        let bubbled = Rc::clone(&bubbled);
        gloo_events::EventListener::new(toolbar.element(), "change", move |_| {
            *bubbled.borrow_mut() += 1
        })
    };

    let (select, _) = toolbar.control(id).unwrap();
    let event = Event::new_with_event_init_dict("change", &{
        let init = web_sys::EventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        init
    })
    .unwrap();
    select.dispatch_event(&event).unwrap();

    assert!(event.default_prevented());
    assert_eq!(*bubbled.borrow(), 0);
    toolbar.destroy();
}

// === State ===

#[wasm_bindgen_test]
fn test_cursormove_toggles_selected_class() {
    let editor = make_editor();
    let mut toolbar = make_toolbar(&editor);
    let active = Rc::new(RefCell::new(false));
    let def = {
        let active = Rc::clone(&active);
        ButtonDef::labeled("Bold").query(move |_: &ContentEditableEditor| *active.borrow())
    };
    let id = toolbar.add_button(def).unwrap();
    let (button, _) = toolbar.control(id).unwrap();
    let button = button.clone();

    *active.borrow_mut() = true;
    editor.fire(EditorEvent::CursorMove);
    assert!(button.class_list().contains("selected"));

    *active.borrow_mut() = false;
    editor.fire(EditorEvent::CursorMove);
    assert!(!button.class_list().contains("selected"));
    toolbar.destroy();
}

#[wasm_bindgen_test]
fn test_selectbox_follows_query() {
    let editor = make_editor();
    let mut toolbar = make_toolbar(&editor);
    let id = toolbar
        .add_selectbox(
            SelectboxDef::named("style")
                .options(["a", "b", "c"])
                .query(|_: &ContentEditableEditor| Some("c".to_string())),
        )
        .unwrap();

    editor.fire(EditorEvent::CursorMove);
    let (select, _) = toolbar.control(id).unwrap();
    assert_eq!(select.unchecked_ref::<HtmlSelectElement>().value(), "c");
    toolbar.destroy();
}

#[wasm_bindgen_test]
fn test_selectbox_state_is_scoped_to_its_select() {
    let editor = make_editor();
    let mut toolbar = make_toolbar(&editor);
    let size = Rc::new(RefCell::new("x".to_string()));
    let fontname = toolbar
        .add_selectbox(
            SelectboxDef::named("fontname")
                .options(["x", "y"])
                .query(|_: &ContentEditableEditor| Some("x".to_string())),
        )
        .unwrap();
    let fontsize = {
        let size = Rc::clone(&size);
        toolbar
            .add_selectbox(
                SelectboxDef::named("fontsize")
                    .options(["x", "y"])
                    .query(move |_: &ContentEditableEditor| Some(size.borrow().clone())),
            )
            .unwrap()
    };

    editor.fire(EditorEvent::CursorMove);
    *size.borrow_mut() = "y".to_string();
    editor.fire(EditorEvent::CursorMove);

    let value = |id| {
        let (select, _) = toolbar.control(id).unwrap();
        select.unchecked_ref::<HtmlSelectElement>().value()
    };
    assert_eq!(value(fontname), "x");
    assert_eq!(value(fontsize), "y");
    toolbar.destroy();
}

// === Teardown ===

#[wasm_bindgen_test]
fn test_destroy_removes_toolbar() {
    let editor = make_editor();
    let mut toolbar = make_toolbar(&editor);
    toolbar.add_button(ButtonDef::labeled("Bold")).unwrap();
    let container = toolbar.element().clone();
    toolbar.destroy();

    assert!(container.parent_node().is_none());
    assert!(editor.element().is_connected());
}

#[wasm_bindgen_test]
fn test_remove_control_detaches_element() {
    let editor = make_editor();
    let mut toolbar = make_toolbar(&editor);
    let bold = toolbar.add_button(ButtonDef::labeled("Bold")).unwrap();
    toolbar.add_button(ButtonDef::labeled("Italic")).unwrap();

    assert!(toolbar.remove_control(bold));
    assert_eq!(toolbar.element().child_element_count(), 1);
    assert_eq!(toolbar.control_names().collect::<Vec<_>>(), ["italic"]);
    toolbar.destroy();
}

#[wasm_bindgen_test]
fn test_failed_button_sets_leave_no_toolbar() {
    let editor = make_editor();
    let config = ToolbarConfig {
        button_sets: vec!["Basic".to_string(), "Missing".to_string()],
        ..ToolbarConfig::default()
    };
    let result: Result<BrowserToolbar, _> = Toolbar::with_button_sets(
        Rc::clone(&editor),
        DomPlatform::new(document()),
        DefaultHandlers,
        config,
        &ButtonSetRegistry::with_defaults(),
    );

    assert!(matches!(result, Err(ToolbarError::UnknownButtonSet(_))));
    let sibling = editor.element().previous_element_sibling();
    assert!(sibling.is_none_or(|sibling| !sibling.class_list().contains("editor_toolbar")));
}
