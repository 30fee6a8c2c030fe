//! Tests for layered settings loading and per-mode profiles.

use figment::Jail;
use mpa_config::{BuildMode, ConfigError, ConfigSource, DuplicatePolicy, MpaConfig};
use std::path::PathBuf;

#[test]
fn defaults_apply_without_a_settings_file() {
    Jail::expect_with(|jail| {
        assert!(MpaConfig::find(jail.directory()).unwrap().is_none());

        let config = MpaConfig::load(jail.directory()).unwrap();
        assert_eq!(config.pages.dir, PathBuf::from("src/pages"));
        assert_eq!(config.dev.port, 8000);
        Ok(())
    });
}

#[test]
fn toml_file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "mpa.toml",
            r#"
[pages]
template = "./public/page.html"
duplicates = "last-wins"

[output]
dir = "build"

[dev]
port = 3000
"#,
        )?;

        let config = MpaConfig::load(jail.directory()).unwrap();
        assert_eq!(config.pages.template, "./public/page.html");
        assert_eq!(config.pages.duplicates, DuplicatePolicy::LastWins);
        assert_eq!(config.output.dir, PathBuf::from("build"));
        assert_eq!(config.dev.port, 3000);
        // untouched values keep their defaults
        assert_eq!(config.pages.commons_chunk, "commons");
        assert!(config.dev.hot);
        Ok(())
    });
}

#[test]
fn package_json_field_is_used_when_no_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "package.json",
            r#"{
  "name": "site",
  "mpa": {
    "pages": { "commons_chunk": "shared" }
  }
}"#,
        )?;

        assert!(matches!(
            MpaConfig::find(jail.directory()).unwrap(),
            Some(ConfigSource::PackageJson(_))
        ));
        let config = MpaConfig::load(jail.directory()).unwrap();
        assert_eq!(config.pages.commons_chunk, "shared");
        Ok(())
    });
}

#[test]
fn toml_takes_precedence_over_package_json() {
    Jail::expect_with(|jail| {
        jail.create_file("mpa.toml", "[dev]\nport = 4000\n")?;
        jail.create_file("package.json", r#"{"mpa": {"dev": {"port": 5000}}}"#)?;

        let config = MpaConfig::load(jail.directory()).unwrap();
        assert_eq!(config.dev.port, 4000);
        Ok(())
    });
}

#[test]
fn package_json_without_field_is_ignored() {
    Jail::expect_with(|jail| {
        jail.create_file("package.json", r#"{"name": "site"}"#)?;
        assert!(MpaConfig::find(jail.directory()).unwrap().is_none());
        Ok(())
    });
}

#[test]
fn malformed_package_json_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_file("package.json", r#"{"name": "site", "mpa": {"#)?;

        let err = MpaConfig::load(jail.directory()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "package.json"));
        assert!(MpaConfig::find(jail.directory()).is_err());
        Ok(())
    });
}

#[test]
fn environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("mpa.toml", "[dev]\nport = 4000\n")?;
        jail.set_env("MPA_DEV__PORT", "9100");
        jail.set_env("MPA_PAGES__ALLOW_EMPTY", "true");

        let config = MpaConfig::load(jail.directory()).unwrap();
        assert_eq!(config.dev.port, 9100);
        assert!(config.pages.allow_empty);
        Ok(())
    });
}

#[test]
fn invalid_value_names_the_field() {
    Jail::expect_with(|jail| {
        jail.create_file("mpa.toml", "[dev]\nport = \"eighty\"\n")?;

        let err = MpaConfig::load(jail.directory()).unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert!(field.ends_with("port"), "{field}"),
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    });
}

#[test]
fn explicit_file_must_exist() {
    Jail::expect_with(|jail| {
        let err = MpaConfig::load_from(jail.directory().join("custom.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        Ok(())
    });
}

#[test]
fn explicit_json_file_is_loaded() {
    Jail::expect_with(|jail| {
        jail.create_file("mpa.json", r#"{"output": {"clean": false}}"#)?;

        let config = MpaConfig::load_from(jail.directory().join("mpa.json")).unwrap();
        assert!(!config.output.clean);
        Ok(())
    });
}

#[test]
fn production_profile_from_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "mpa.toml",
            r#"
[output]
dir = "dist"

[profiles.production.output]
dir = "release"
split_commons = false

[profiles.development.dev]
open = false
"#,
        )?;

        let base = MpaConfig::load(jail.directory()).unwrap();

        let prod = base.clone().materialize_profile(BuildMode::Production).unwrap();
        assert_eq!(prod.output.dir, PathBuf::from("release"));
        assert!(!prod.output.split_commons);
        assert!(prod.dev.open);

        let dev = base.materialize_profile(BuildMode::Development).unwrap();
        assert_eq!(dev.output.dir, PathBuf::from("dist"));
        assert!(!dev.dev.open);
        Ok(())
    });
}
