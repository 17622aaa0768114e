//! UI layer: line-oriented terminal driver for the assistant session.

pub mod shell;
pub mod transcript;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
