//! wysihat-toolbar-core: toolbar logic for WysiHat-style rich text editors,
//! without DOM dependencies.
//!
//! This crate provides:
//! - `RichTextEditor` trait for the editor the toolbar drives
//! - `ToolbarPlatform` trait for markup, event binding and visual state
//! - `Toolbar` - control registration and state synchronization
//! - `ButtonDef` / `SelectboxDef` - typed control definitions
//! - `HandlerResolver` - default command and state handler synthesis
//! - `ButtonSetRegistry` - named button groups, with the "Basic" set
//! - `headless` - in-memory editor and platform

pub mod button_sets;
pub mod config;
pub mod controls;
pub mod editor;
pub mod error;
pub mod events;
pub mod handlers;
pub mod headless;
pub mod platform;
pub mod state;
pub mod toolbar;

pub use button_sets::{BASIC, ButtonSetRegistry};
pub use config::{MarkupConfig, ToolbarConfig, UnmatchedStylePolicy};
pub use controls::{
    ActionHandler, ButtonDef, ControlId, ControlKind, ControlSpec, SelectHandler, SelectboxDef,
    StateQuery, StyleQuery,
};
pub use editor::{EditorEvent, RichTextEditor, SelectedStyles};
pub use error::ToolbarError;
pub use events::{BusSubscription, EventBus};
pub use handlers::{DefaultHandlers, HandlerResolver, SelectDispatch, exec_or_warn};
pub use platform::{PlatformError, ToolbarPlatform};
pub use smol_str::SmolStr;
pub use state::StateCache;
pub use toolbar::Toolbar;
