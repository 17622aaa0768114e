use serde::Deserialize;

use crate::{
    infra::config::{AppConfig, AssistantConfig, LogConfig, SessionConfig},
    usecases::analyze::AnalyzePolicy,
};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub assistant: Option<FileAssistantConfig>,
    pub session: Option<FileSessionConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(assistant) = self.assistant {
            assistant.merge_into(&mut config.assistant);
        }

        if let Some(session) = self.session {
            session.merge_into(&mut config.session);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileAssistantConfig {
    pub base_url: Option<String>,
    pub session_id: Option<String>,
    pub currency: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

impl FileAssistantConfig {
    fn merge_into(self, config: &mut AssistantConfig) {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }

        if let Some(session_id) = self.session_id {
            config.session_id = session_id;
        }

        if let Some(currency) = self.currency {
            config.currency = currency;
        }

        if let Some(timeout_ms) = self.request_timeout_ms {
            config.request_timeout_ms = Some(timeout_ms);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileSessionConfig {
    pub analyze_policy: Option<AnalyzePolicy>,
}

impl FileSessionConfig {
    fn merge_into(self, config: &mut SessionConfig) {
        if let Some(policy) = self.analyze_policy {
            config.analyze_policy = policy;
        }
    }
}
