//! Configuration tests
//!
//! The generated template must always parse back, and every key it writes
//! must land in the matching `Config` field.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).unwrap_or_else(|e| panic!("TOML:\n{}\nError: {}", toml_str, e))
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// The default template parses and resolves back to the defaults.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let resolved = Config::resolve(parse(&config.to_toml()), no_env).unwrap();
    assert_eq!(resolved, config);
}

/// Every non-default value survives serialization.
#[test]
fn test_config_roundtrip_customized() {
    let config = Config {
        server_url: "https://bugs.example.com/tracker".to_string(),
        request_timeout_secs: 3,
        session_cookie: Some("eyJfZnJlc2giOmZhbHNlfQ.abc".to_string()),
        confirm_delete: false,
        logging: LoggingConfig {
            level: "debug".to_string(),
            file_enabled: true,
            file_dir: "/tmp/bugdesk logs".into(),
            file_rotation: LogRotation::Hourly,
            file_prefix: "desk".to_string(),
        },
    };

    let resolved = Config::resolve(parse(&config.to_toml()), no_env).unwrap();
    assert_eq!(resolved, config);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_file_uses_defaults() {
    let resolved = Config::resolve(FileConfig::default(), no_env).unwrap();
    assert_eq!(resolved.server_url, DEFAULT_SERVER_URL);
    assert_eq!(resolved.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(resolved.session_cookie, None);
    assert!(resolved.confirm_delete);
}

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
server_url = "http://file:5000"
request_timeout_secs = 30
session_cookie = "from-file"
"#,
    );
    let env = env_of(&[
        (env::SERVER_URL, "http://env:8000"),
        (env::TIMEOUT, " 7 "),
        (env::SESSION, "from-env"),
    ]);

    let resolved = Config::resolve(file, env).unwrap();
    assert_eq!(resolved.server_url, "http://env:8000");
    assert_eq!(resolved.request_timeout_secs, 7);
    assert_eq!(resolved.session_cookie.as_deref(), Some("from-env"));
}

#[test]
fn test_empty_session_means_none() {
    let resolved = Config::resolve(FileConfig::default(), env_of(&[(env::SESSION, "  ")])).unwrap();
    assert_eq!(resolved.session_cookie, None);
}

#[test]
fn test_bad_timeout_env_is_error() {
    let err = Config::resolve(FileConfig::default(), env_of(&[(env::TIMEOUT, "soon")])).unwrap_err();
    assert!(err.to_string().contains(env::TIMEOUT));
}

// ─────────────────────────────────────────────────────────────────────────────
// File handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_keys_are_rejected() {
    let result: Result<FileConfig, _> = toml::from_str("servr_url = \"http://x\"\n");
    assert!(result.is_err());
}

#[test]
fn test_unknown_rotation_falls_back_to_daily() {
    let file = parse("[logging]\nfile_rotation = \"weekly\"\n");
    let resolved = Config::resolve(file, no_env).unwrap();
    assert_eq!(resolved.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_load_file_config_from_disk() {
    let dir = std::env::temp_dir().join(format!("bugdesk-config-test-{}", std::process::id()));
    let path = dir.join("config.toml");

    // Missing file: defaults
    let missing = Config::load_file_config(&path).unwrap();
    assert!(missing.server_url.is_none());

    // Template written by write_template parses
    Config::write_template(&path).unwrap();
    let loaded = Config::load_file_config(&path).unwrap();
    assert_eq!(loaded.server_url.as_deref(), Some(DEFAULT_SERVER_URL));

    // Broken file is an error, not a silent fallback
    std::fs::write(&path, "confirm_delete = maybe\n").unwrap();
    assert!(Config::load_file_config(&path).is_err());

    let _ = std::fs::remove_dir_all(&dir);
}
