// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::TempDir;

#[test]
fn empty_config_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.device.password, "000000");
    assert_eq!(config.daemon.retry, 1);
    assert!(config.device.target().is_none());
}

#[test]
fn parses_full_config() {
    let config = Config::parse(
        r#"
[device]
address = "AA:BB:CC:DD:EE:FF"
password = "123456"

[daemon]
retry = 3
"#,
    )
    .unwrap();

    assert_eq!(config.daemon.retry, 3);
    let target = config.device.target().expect("target configured");
    assert_eq!(target.address(), "AA:BB:CC:DD:EE:FF");
    assert_eq!(target.credential(), "123456");
}

#[test]
fn rejects_invalid_address() {
    let result = Config::parse("[device]\naddress = \"12:34:56:78:9a:bcx\"\n");
    assert!(matches!(result, Err(Error::InvalidAddress(_))));
}

#[test]
fn rejects_short_password() {
    let result = Config::parse("[device]\npassword = \"123\"\n");
    assert!(matches!(result, Err(Error::InvalidCredential)));
}

#[test]
fn rejects_malformed_toml() {
    let result = Config::parse("[device");
    assert!(matches!(result, Err(Error::ConfigParse(_))));
}

#[test]
fn load_missing_file() {
    let temp = TempDir::new().unwrap();
    let result = Config::load(&temp.path().join("config.toml"));
    assert!(matches!(result, Err(Error::ConfigNotFound(_))));
}

#[test]
fn save_and_reload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");

    let mut config = Config::default();
    config.device.address = "12:34:56:78:9a:bc".to_string();
    config.daemon.retry = 2;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
}
