//! Errors raised while building a toolbar.

use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

use crate::platform::PlatformError;

/// Configuration errors surfaced synchronously at registration time.
///
/// Validation failures are raised before the platform is asked to create
/// anything, so a failed registration never leaves markup behind.
#[derive(Debug, Error, Diagnostic)]
pub enum ToolbarError {
    #[error("control definition has neither a name nor a label")]
    #[diagnostic(
        code(wysihat::toolbar::missing_identifier),
        help("set `label`, or `name` when the command differs from the label")
    )]
    MissingIdentifier,

    #[error("selectbox `{name}` has no options")]
    #[diagnostic(code(wysihat::toolbar::empty_options))]
    EmptyOptions { name: SmolStr },

    #[error("no button set named `{0}`")]
    #[diagnostic(code(wysihat::toolbar::unknown_button_set))]
    UnknownButtonSet(String),

    #[error("platform error: {0}")]
    #[diagnostic(code(wysihat::toolbar::platform))]
    Platform(#[from] PlatformError),
}
