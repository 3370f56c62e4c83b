use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let pairs: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| pairs.get(key).cloned()
}

#[test]
fn defaults_point_at_public_models_without_key() {
    let settings = Settings::default();
    assert_eq!(settings.api_key, None);
    assert_eq!(settings.text_model, "gemini-2.5-flash");
    assert_eq!(settings.image_model, "gemini-2.5-flash-image");
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
api_key = "file-key"
api_base_url = "http://localhost:8080"
image_model = "custom-image"
"#,
    );

    assert_eq!(settings.api_key.as_deref(), Some("file-key"));
    assert_eq!(settings.api_base_url, "http://localhost:8080");
    assert_eq!(settings.text_model, "gemini-2.5-flash");
    assert_eq!(settings.image_model, "custom-image");
}

#[test]
fn unreadable_file_leaves_defaults() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "api_key = [not a string");
    assert_eq!(settings, Settings::default());
}

#[test]
fn env_overrides_file_and_later_keys_win() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, r#"api_key = "file-key""#);
    apply_env_overrides(
        &mut settings,
        env_from(&[
            ("API_KEY", "plain-key"),
            ("APP__API_KEY", "app-key"),
            ("APP__TEXT_MODEL", "gemini-test"),
        ]),
    );

    assert_eq!(settings.api_key.as_deref(), Some("app-key"));
    assert_eq!(settings.text_model, "gemini-test");
}

#[test]
fn blank_api_key_is_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, env_from(&[("GEMINI_API_KEY", "  ")]));
    assert_eq!(settings.api_key, None);
}

#[test]
fn load_settings_reads_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("discover_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("discover.toml");
    fs::write(&path, r#"image_model = "from-disk""#).expect("write config");

    let settings = load_settings(&path);
    assert_eq!(settings.image_model, "from-disk");
    assert_eq!(settings.gemini_config().image_model, "from-disk");

    fs::remove_dir_all(temp_root).expect("cleanup");
}
