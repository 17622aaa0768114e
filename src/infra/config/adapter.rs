use std::path::{Path, PathBuf};

use crate::infra::{
    config::{load, validate, AppConfig},
    contracts::ConfigAdapter,
    error::AppError,
};

/// Loads the TOML config file, then applies command-line overrides.
#[derive(Debug, Clone, Default)]
pub struct FileConfigAdapter {
    path: Option<PathBuf>,
    session_id_override: Option<String>,
}

impl FileConfigAdapter {
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            session_id_override: None,
        }
    }

    pub fn with_session_id(mut self, session_id: Option<&str>) -> Self {
        self.session_id_override = session_id.map(str::to_owned);
        self
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn load(&self) -> Result<AppConfig, AppError> {
        let mut config = load(self.path.as_deref())?;

        if let Some(session_id) = &self.session_id_override {
            config.assistant.session_id = session_id.clone();
            validate(&config)?;
        }

        Ok(config)
    }
}
