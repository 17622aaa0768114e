use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::infra::{
    config::{file_config::FileConfig, AppConfig},
    error::AppError,
};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut config = AppConfig::default();

    if !config_path.exists() {
        return Ok(config);
    }

    let raw = fs::read_to_string(&config_path).map_err(|source| AppError::ConfigRead {
        path: config_path.clone(),
        source,
    })?;

    let file_config: FileConfig = toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
        path: config_path,
        source,
    })?;

    file_config.merge_into(&mut config);
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &AppConfig) -> Result<(), AppError> {
    let assistant = &config.assistant;

    if !(assistant.base_url.starts_with("http://") || assistant.base_url.starts_with("https://")) {
        return Err(AppError::InvalidConfig {
            field: "assistant.base_url",
            reason: "must start with http:// or https://".to_owned(),
        });
    }

    if assistant.session_id.trim().is_empty() {
        return Err(AppError::InvalidConfig {
            field: "assistant.session_id",
            reason: "must not be empty".to_owned(),
        });
    }

    if assistant.currency.trim().is_empty() {
        return Err(AppError::InvalidConfig {
            field: "assistant.currency",
            reason: "must not be empty".to_owned(),
        });
    }

    Ok(())
}
