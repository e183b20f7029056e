use super::*;

use std::{
    env,
    sync::atomic::{AtomicU32, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

static NEXT_FILE: AtomicU32 = AtomicU32::new(0);

fn temp_config(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
    let path = env::temp_dir().join(format!("repo_list_client_{suffix}_{n}.toml"));
    fs::write(&path, contents).expect("write config");
    path
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_when_nothing_is_configured() {
    let settings = load_settings_with(Path::new("/definitely/missing/client.toml"), no_env);
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config("api_base_url = \"http://10.0.2.2:3333\"\ntimeout_seconds = 5\n");

    let settings = load_settings_with(&path, no_env);
    assert_eq!(settings.api_base_url, "http://10.0.2.2:3333");
    assert_eq!(settings.request_timeout, Some(Duration::from_secs(5)));

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn prefixed_env_wins_over_plain_env_and_file() {
    let path = temp_config("api_base_url = \"http://from-file\"\n");

    let settings = load_settings_with(&path, |key| match key {
        "API_BASE_URL" => Some("http://plain".into()),
        "APP__API_BASE_URL" => Some("http://prefixed".into()),
        "API_TIMEOUT_SECONDS" => Some("12".into()),
        _ => None,
    });
    assert_eq!(settings.api_base_url, "http://prefixed");
    assert_eq!(settings.request_timeout, Some(Duration::from_secs(12)));

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn zero_or_garbage_timeout_is_ignored() {
    let settings = load_settings_with(Path::new("/definitely/missing/client.toml"), |key| {
        match key {
            "API_TIMEOUT_SECONDS" => Some("0".into()),
            "APP__API_TIMEOUT_SECONDS" => Some("soon".into()),
            _ => None,
        }
    });
    assert_eq!(settings.request_timeout, None);
}

#[test]
fn unparsable_file_keeps_defaults() {
    let path = temp_config("this is = = not toml");

    let settings = load_settings_with(&path, no_env);
    assert_eq!(settings, ClientSettings::default());

    fs::remove_file(path).expect("cleanup");
}
