use std::{collections::HashMap, fs};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub fixtures_path: Option<String>,
    pub product_failure_status: Option<u16>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            fixtures_path: None,
            product_failure_status: None,
        }
    }
}

pub fn load_settings() -> Settings {
    let raw = fs::read_to_string("server.toml").ok();
    resolve_settings(raw.as_deref(), |key| std::env::var(key).ok())
}

fn resolve_settings(raw_file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = raw_file {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("fixtures_path") {
                settings.fixtures_path = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("product_failure_status") {
                settings.product_failure_status = v.parse().ok();
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("APP__FIXTURES_PATH") {
        settings.fixtures_path = Some(v);
    }

    if let Some(v) = env("APP__PRODUCT_FAILURE_STATUS") {
        if let Ok(parsed) = v.parse::<u16>() {
            settings.product_failure_status = Some(parsed);
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
