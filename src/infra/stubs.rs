use crate::infra::{config::AppConfig, contracts::ConfigAdapter, error::AppError};

/// Config adapter that hands out a fixed config.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigAdapter {
    config: AppConfig,
}

impl StaticConfigAdapter {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

impl ConfigAdapter for StaticConfigAdapter {
    fn load(&self) -> Result<AppConfig, AppError> {
        Ok(self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_config_returns_given_config() {
        let mut config = AppConfig::default();
        config.assistant.session_id = "fixed".to_owned();

        let loaded = StaticConfigAdapter::new(config.clone())
            .load()
            .expect("static config must load");

        assert_eq!(loaded, config);
    }
}
