use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

pub const CONFIG_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub static_dir: String,
    pub spa_entry: String,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            static_dir: "./public".into(),
            spa_entry: "index.html".into(),
            max_body_bytes: 64 * 1024,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

/// Applies the flat `key = "value"` table of `server.toml`.
pub fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, toml::Value>>(raw) {
        Ok(cfg) => cfg,
        Err(error) => {
            warn!(%error, file = CONFIG_FILE, "ignoring unparseable config file");
            return;
        }
    };

    if let Some(v) = file_cfg.get("bind_addr").and_then(toml::Value::as_str) {
        settings.server_bind = v.to_string();
    }
    if let Some(v) = file_cfg.get("static_dir").and_then(toml::Value::as_str) {
        settings.static_dir = v.to_string();
    }
    if let Some(v) = file_cfg.get("spa_entry").and_then(toml::Value::as_str) {
        settings.spa_entry = v.to_string();
    }
    match file_cfg.get("max_body_bytes") {
        Some(toml::Value::Integer(n)) if *n > 0 => settings.max_body_bytes = *n as usize,
        Some(toml::Value::String(s)) => set_body_limit(settings, s),
        Some(other) => warn!(value = %other, "ignoring invalid max_body_bytes"),
        None => {}
    }
}

/// Later keys win, so `APP__*` overrides the short form.
pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__STATIC_DIR") {
        settings.static_dir = v;
    }
    if let Some(v) = lookup("APP__SPA_ENTRY") {
        settings.spa_entry = v;
    }
    if let Some(v) = lookup("APP__MAX_BODY_BYTES") {
        set_body_limit(settings, &v);
    }
}

fn set_body_limit(settings: &mut Settings, raw: &str) {
    match raw.trim().parse::<usize>() {
        Ok(parsed) if parsed > 0 => settings.max_body_bytes = parsed,
        _ => warn!(value = raw, "ignoring invalid max_body_bytes"),
    }
}

pub fn prepare_static_dir(raw_static_dir: &str) -> anyhow::Result<PathBuf> {
    let static_dir = normalize_static_dir(raw_static_dir);
    fs::create_dir_all(&static_dir).with_context(|| {
        format!(
            "failed to create static asset directory '{}'",
            static_dir.display()
        )
    })?;
    Ok(static_dir)
}

fn normalize_static_dir(raw_static_dir: &str) -> PathBuf {
    let raw_static_dir = raw_static_dir.trim();
    if raw_static_dir.is_empty() {
        return PathBuf::from(Settings::default().static_dir);
    }
    PathBuf::from(raw_static_dir.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
