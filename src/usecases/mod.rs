//! Use case layer: session flows and application wiring.

pub mod analyze;
pub mod bootstrap;
pub mod chat;
pub mod context;
pub mod contracts;
pub mod outcome;
pub mod session;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
