use crate::{
    assistant::HttpAssistantTransport, infra::config::AppConfig,
    usecases::session::SessionSettings,
};

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub assistant: HttpAssistantTransport,
}

impl AppContext {
    pub fn new(config: AppConfig, assistant: HttpAssistantTransport) -> Self {
        Self { config, assistant }
    }

    pub fn session_settings(&self) -> SessionSettings {
        session_settings(&self.config)
    }
}

pub fn session_settings(config: &AppConfig) -> SessionSettings {
    SessionSettings {
        session_id: config.assistant.session_id.clone(),
        currency: config.assistant.currency.clone(),
        analyze_policy: config.session.analyze_policy,
    }
}
