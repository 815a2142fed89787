//! Browser DOM layer for wysihat-toolbar.
//!
//! This crate implements the core traits on top of `web-sys`. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `editor`: `contenteditable` editor driven by `document.execCommand`
//! - `dom`: toolbar markup, event binding and `classList` state updates
//!
//! # Re-exports
//!
//! This crate re-exports `wysihat-toolbar-core` for convenience, so consumers
//! only need to depend on `wysihat-toolbar-browser`.

// Re-export core crate
pub use wysihat_toolbar_core;
pub use wysihat_toolbar_core::*;

pub mod dom;
pub mod editor;

pub use dom::DomPlatform;
pub use editor::ContentEditableEditor;

/// Toolbar over a `contenteditable` element rendered with `web-sys`.
pub type BrowserToolbar<R = DefaultHandlers> = Toolbar<ContentEditableEditor, DomPlatform, R>;
