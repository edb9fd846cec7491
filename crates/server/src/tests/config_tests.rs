use std::collections::HashMap;

use super::{
    apply_env_overrides, apply_file_overrides, normalize_static_dir, prepare_static_dir, Settings,
};

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
bind_addr = "0.0.0.0:8080"
static_dir = "dist"
max_body_bytes = 2048
"#,
    );

    assert_eq!(settings.server_bind, "0.0.0.0:8080");
    assert_eq!(settings.static_dir, "dist");
    assert_eq!(settings.spa_entry, "index.html");
    assert_eq!(settings.max_body_bytes, 2048);
}

#[test]
fn broken_file_leaves_defaults_untouched() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "bind_addr = [unterminated");
    assert_eq!(settings, Settings::default());
}

#[test]
fn prefixed_env_var_wins_over_short_form() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_of(&[
            ("SERVER_BIND", "127.0.0.1:4000"),
            ("APP__BIND_ADDR", "127.0.0.1:5000"),
            ("APP__SPA_ENTRY", "app.html"),
        ]),
    );

    assert_eq!(settings.server_bind, "127.0.0.1:5000");
    assert_eq!(settings.spa_entry, "app.html");
}

#[test]
fn invalid_body_limit_is_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, env_of(&[("APP__MAX_BODY_BYTES", "lots")]));
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);

    apply_env_overrides(&mut settings, env_of(&[("APP__MAX_BODY_BYTES", "0")]));
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);

    apply_env_overrides(&mut settings, env_of(&[("APP__MAX_BODY_BYTES", " 512 ")]));
    assert_eq!(settings.max_body_bytes, 512);
}

#[test]
fn blank_static_dir_falls_back_to_default() {
    assert_eq!(
        normalize_static_dir("   "),
        std::path::PathBuf::from(Settings::default().static_dir)
    );
    assert_eq!(
        normalize_static_dir("site\\public"),
        std::path::PathBuf::from("site/public")
    );
}

#[test]
fn prepare_creates_missing_static_dir() {
    let temp = tempfile::tempdir().expect("tempdir");
    let target = temp.path().join("nested").join("public");

    let prepared = prepare_static_dir(target.to_string_lossy().as_ref()).expect("prepare");

    assert!(prepared.is_dir());
}
