//! Assistant service integration layer: HTTP transport and wire types.

pub mod http;
mod wire;

pub use http::HttpAssistantTransport;

/// Returns the assistant module name for smoke checks.
pub fn module_name() -> &'static str {
    "assistant"
}
