use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_root(tag: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("analyzer_config_{tag}_{suffix}"));
    fs::create_dir_all(&root).expect("temp root");
    root
}

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn falls_back_to_default_without_file_or_env() {
    let root = temp_root("defaults");
    let settings = load_settings_from(&root.join(CONFIG_FILE), env_of(&[])).expect("settings");
    assert_eq!(settings, Settings::default());
    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn file_overrides_default_and_env_overrides_file() {
    let root = temp_root("layers");
    let path = root.join(CONFIG_FILE);
    fs::write(&path, "backend_url = \"http://file.test:8080\"\n").expect("write config");

    let from_file = load_settings_from(&path, env_of(&[])).expect("settings");
    assert_eq!(from_file.backend_url, "http://file.test:8080");

    let from_env = load_settings_from(&path, env_of(&[("BACKEND_URL", "http://env.test")]))
        .expect("settings");
    assert_eq!(from_env.backend_url, "http://env.test");

    let prefixed = load_settings_from(
        &path,
        env_of(&[
            ("BACKEND_URL", "http://env.test"),
            ("APP__BACKEND_URL", " http://app.test/ "),
        ]),
    )
    .expect("settings");
    assert_eq!(prefixed.backend_url, "http://app.test/");

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn malformed_file_is_reported() {
    let root = temp_root("malformed");
    let path = root.join(CONFIG_FILE);
    fs::write(&path, "backend_url = [").expect("write config");

    let err = load_settings_from(&path, env_of(&[])).expect_err("parse failure");
    assert!(err.to_string().contains("failed to parse config file"));

    fs::remove_dir_all(root).expect("cleanup");
}
