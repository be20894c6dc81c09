//! Resolve settings from the process environment, a project `.env` and the XDG
//! `config.toml`, with priority **existing env > .env > XDG**.
//!
//! The result is an explicit [`Settings`] value that callers pass to whatever needs
//! it (e.g. the chat client constructor). Nothing here writes to the process
//! environment.

mod dotenv;
mod xdg_toml;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

/// Key for the OpenAI-compatible API key.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Key for the API base URL (e.g. `https://api.openai.com/v1`).
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
/// Key for the chat model name.
pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
/// Key for the sampling temperature.
pub const OPENAI_TEMPERATURE: &str = "OPENAI_TEMPERATURE";
/// Key for the tracing filter.
pub const RUST_LOG: &str = "RUST_LOG";
/// Key for the optional log file path.
pub const LOG_FILE: &str = "LOG_FILE";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("missing required setting: {0}")]
    Missing(String),
}

/// Resolved key-value settings. Cheap to clone; read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    /// Merges three sources; for each key the first source that has it wins:
    /// `env`, then `dotenv`, then `xdg`.
    pub fn from_sources(
        env: HashMap<String, String>,
        dotenv: HashMap<String, String>,
        xdg: HashMap<String, String>,
    ) -> Self {
        let mut values = xdg;
        values.extend(dotenv);
        values.extend(env);
        Self { values }
    }

    /// Value for `key`, if any source set it.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns a copy with `key` set, overriding every source.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Typed view of the chat-model settings.
    pub fn llm(&self) -> Result<LlmSettings, LoadError> {
        let temperature = match self.get(OPENAI_TEMPERATURE) {
            None => None,
            Some(raw) => Some(raw.trim().parse::<f32>().map_err(|_| LoadError::InvalidValue {
                key: OPENAI_TEMPERATURE.to_string(),
                value: raw.to_string(),
            })?),
        };
        Ok(LlmSettings {
            api_key: self.get(OPENAI_API_KEY).map(str::to_string),
            base_url: self.get(OPENAI_BASE_URL).map(str::to_string),
            model: self.get(OPENAI_MODEL).map(str::to_string),
            temperature,
        })
    }
}

/// Chat-model settings. Every field is optional here; the client decides what is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

/// Loads settings for `app_name` from the real sources.
///
/// * env: a snapshot of the current process environment (read only).
/// * `.env`: in `override_dir` if given, else the current directory.
/// * XDG: `$XDG_CONFIG_HOME/<app_name>/config.toml`, `[env]` table.
pub fn load_settings(app_name: &str, override_dir: Option<&Path>) -> Result<Settings, LoadError> {
    let xdg = xdg_toml::load_env_map(app_name)?;
    let dotenv = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;
    let env: HashMap<String, String> = std::env::vars().collect();
    Ok(Settings::from_sources(env, dotenv, xdg))
}
