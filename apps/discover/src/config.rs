use std::{collections::HashMap, fs, path::Path};

use client_core::gemini::{
    GeminiConfig, DEFAULT_API_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL,
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "discover.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub text_model: String,
    pub image_model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.into(),
            text_model: DEFAULT_TEXT_MODEL.into(),
            image_model: DEFAULT_IMAGE_MODEL.into(),
        }
    }
}

impl Settings {
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            api_base_url: self.api_base_url.clone(),
            text_model: self.text_model.clone(),
            image_model: self.image_model.clone(),
        }
    }
}

/// Defaults, then `path` if it exists, then the environment. A missing API
/// key is not an error here; it surfaces on the first remote call.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!(error = %err, "ignoring unreadable config file");
            return;
        }
    };

    if let Some(v) = file_cfg.get("api_key") {
        set_api_key(settings, v);
    }
    if let Some(v) = file_cfg.get("api_base_url") {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("text_model") {
        settings.text_model = v.clone();
    }
    if let Some(v) = file_cfg.get("image_model") {
        settings.image_model = v.clone();
    }
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for key in ["API_KEY", "GEMINI_API_KEY", "APP__API_KEY"] {
        if let Some(v) = lookup(key) {
            set_api_key(settings, &v);
        }
    }

    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__TEXT_MODEL") {
        settings.text_model = v;
    }
    if let Some(v) = lookup("APP__IMAGE_MODEL") {
        settings.image_model = v;
    }
}

fn set_api_key(settings: &mut Settings, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        settings.api_key = Some(value.to_string());
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
