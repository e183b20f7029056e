use std::{collections::HashMap, fs, path::Path, time::Duration};

pub const DEFAULT_CONFIG_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    /// `None` leaves requests without a deadline.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3333".into(),
            request_timeout: None,
        }
    }
}

/// Defaults, then `client.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    load_settings_with(Path::new(DEFAULT_CONFIG_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    config_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        apply_file(&mut settings, &raw);
    }

    if let Some(v) = env("API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("API_TIMEOUT_SECONDS") {
        settings.request_timeout = parse_timeout(&v).or(settings.request_timeout);
    }
    if let Some(v) = env("APP__API_TIMEOUT_SECONDS") {
        settings.request_timeout = parse_timeout(&v).or(settings.request_timeout);
    }

    settings
}

fn apply_file(settings: &mut ClientSettings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        tracing::warn!("ignoring unparsable {DEFAULT_CONFIG_FILE}");
        return;
    };

    if let Some(v) = file_cfg.get("api_base_url").and_then(toml::Value::as_str) {
        settings.api_base_url = v.to_string();
    }
    match file_cfg.get("timeout_seconds") {
        Some(toml::Value::Integer(secs)) if *secs > 0 => {
            settings.request_timeout = Some(Duration::from_secs(*secs as u64));
        }
        Some(toml::Value::String(secs)) => {
            settings.request_timeout = parse_timeout(secs).or(settings.request_timeout);
        }
        _ => {}
    }
}

fn parse_timeout(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
