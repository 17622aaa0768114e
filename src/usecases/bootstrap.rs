use std::path::Path;

use crate::{
    assistant::HttpAssistantTransport,
    infra::{self, config::FileConfigAdapter, contracts::ConfigAdapter, error::AppError},
    usecases::context::AppContext,
};

pub fn bootstrap(
    config_path: Option<&Path>,
    session_id: Option<&str>,
) -> Result<AppContext, AppError> {
    let adapter = FileConfigAdapter::new(config_path).with_session_id(session_id);
    let context = build_context(&adapter)?;
    infra::logging::init(&context.config.logging)?;

    tracing::info!(
        base_url = context.assistant.base_url(),
        session_id = %context.config.assistant.session_id,
        analyze_policy = ?context.config.session.analyze_policy,
        "assistant session configured"
    );

    Ok(context)
}

fn build_context(adapter: &dyn ConfigAdapter) -> Result<AppContext, AppError> {
    let config = adapter.load()?;
    let assistant = HttpAssistantTransport::new(&config.assistant)?;

    Ok(AppContext::new(config, assistant))
}
