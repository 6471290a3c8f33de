//! Client settings: defaults, then `client.toml`, then environment overrides.

use std::fs;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::classifier::StatusCodes;

pub const SETTINGS_FILE: &str = "client.toml";
const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_url: Url,
    pub search_api_url: Url,
    pub status_codes: StatusCodes,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid client.toml: {0}")]
    File(#[from] toml::de::Error),
    #[error("invalid url for {key}: {source}")]
    Url {
        key: &'static str,
        source: url::ParseError,
    },
    #[error("invalid status code for {key}: '{value}'")]
    Status { key: &'static str, value: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    api_url: Option<String>,
    search_api_url: Option<String>,
    status_ok: Option<u16>,
    status_created: Option<u16>,
    status_invalid_request: Option<u16>,
    status_server_error: Option<u16>,
}

/// Defaults, then `client.toml` in the working directory, then the environment.
pub fn load_settings() -> Result<ClientSettings, SettingsError> {
    let raw = fs::read_to_string(SETTINGS_FILE).ok();
    resolve_settings(raw.as_deref(), |key| std::env::var(key).ok())
}

fn resolve_settings(
    raw_file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, SettingsError> {
    let local = parse_url("default", DEFAULT_API_URL)?;
    let mut settings = ClientSettings {
        api_url: local.clone(),
        search_api_url: local,
        status_codes: StatusCodes::default(),
    };

    if let Some(raw) = raw_file {
        let file_cfg: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file_cfg.api_url {
            settings.api_url = parse_url("api_url", &v)?;
        }
        if let Some(v) = file_cfg.search_api_url {
            settings.search_api_url = parse_url("search_api_url", &v)?;
        }
        let codes = &mut settings.status_codes;
        codes.ok = file_cfg.status_ok.unwrap_or(codes.ok);
        codes.created = file_cfg.status_created.unwrap_or(codes.created);
        codes.invalid_request = file_cfg
            .status_invalid_request
            .unwrap_or(codes.invalid_request);
        codes.server_error = file_cfg.status_server_error.unwrap_or(codes.server_error);
    }

    if let Some(v) = env("STORE_API_URL") {
        settings.api_url = parse_url("STORE_API_URL", &v)?;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = parse_url("APP__API_URL", &v)?;
    }

    if let Some(v) = env("SEARCH_API_URL") {
        settings.search_api_url = parse_url("SEARCH_API_URL", &v)?;
    }
    if let Some(v) = env("APP__SEARCH_API_URL") {
        settings.search_api_url = parse_url("APP__SEARCH_API_URL", &v)?;
    }

    let codes = &mut settings.status_codes;
    for (key, slot) in [
        ("APP__STATUS_OK", &mut codes.ok),
        ("APP__STATUS_CREATED", &mut codes.created),
        ("APP__STATUS_INVALID_REQUEST", &mut codes.invalid_request),
        ("APP__STATUS_SERVER_ERROR", &mut codes.server_error),
    ] {
        if let Some(v) = env(key) {
            *slot = v
                .trim()
                .parse()
                .map_err(|_| SettingsError::Status { key, value: v })?;
        }
    }

    Ok(settings)
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, SettingsError> {
    Url::parse(raw.trim()).map_err(|source| SettingsError::Url { key, source })
}
