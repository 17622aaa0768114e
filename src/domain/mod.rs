//! Domain layer: core entities and business rules.

pub mod analysis;
pub mod category_breakdown;
pub mod message;
pub mod message_log;
pub mod session_state;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
