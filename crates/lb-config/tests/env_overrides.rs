use std::path::PathBuf;

use figment::Jail;
use lb_config::{ConfigError, LifeboatConfig};
use rstest::rstest;

fn isolate_home(jail: &mut Jail) {
    let home = jail.directory().join("home");
    jail.set_env("XDG_CONFIG_HOME", home.display());
}

#[test]
fn env_beats_every_file_layer() {
    Jail::expect_with(|jail| {
        isolate_home(jail);
        std::fs::create_dir_all(".lifeboat").expect("create dir");
        jail.create_file(".lifeboat/config.toml", "[model]\npath = \"project.json\"\n")?;
        jail.create_file("extra.toml", "[model]\npath = \"extra.json\"\n")?;
        jail.set_env("LIFEBOAT_MODEL__PATH", "env.json");

        let config =
            LifeboatConfig::load(Some(std::path::Path::new("extra.toml"))).expect("config loads");
        assert_eq!(config.model.path, PathBuf::from("env.json"));
        Ok(())
    });
}

#[rstest]
#[case("LIFEBOAT_EXPORT__DIRECTORY", "out")]
#[case("LIFEBOAT_EXPORT__HISTORY_FILE_NAME", "h.csv")]
#[case("LIFEBOAT_REPORT__SURVIVED_COLOR", "#123456")]
fn env_sets_nested_fields(#[case] key: &str, #[case] value: &str) {
    Jail::expect_with(|jail| {
        isolate_home(jail);
        jail.set_env(key, value);

        let config = LifeboatConfig::load(None).expect("config loads");
        let actual = match key {
            "LIFEBOAT_EXPORT__DIRECTORY" => config.export.directory.display().to_string(),
            "LIFEBOAT_EXPORT__HISTORY_FILE_NAME" => config.export.history_file_name,
            _ => config.report.survived_color,
        };
        assert_eq!(actual, value);
        Ok(())
    });
}

#[test]
fn numeric_env_value_is_parsed() {
    Jail::expect_with(|jail| {
        isolate_home(jail);
        jail.set_env("LIFEBOAT_REPORT__BAR_WIDTH", "40");

        let config = LifeboatConfig::load(None).expect("config loads");
        assert_eq!(config.report.bar_width, 40);
        Ok(())
    });
}

#[test]
fn zero_bar_width_from_env_is_rejected() {
    Jail::expect_with(|jail| {
        isolate_home(jail);
        jail.set_env("LIFEBOAT_REPORT__BAR_WIDTH", "0");

        let err = LifeboatConfig::load(None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }), "{err}");
        Ok(())
    });
}

#[test]
fn unrelated_lifeboat_vars_are_ignored() {
    Jail::expect_with(|jail| {
        isolate_home(jail);
        jail.set_env("LIFEBOAT_LOG", "debug");

        let config = LifeboatConfig::load(None).expect("config loads");
        assert_eq!(config, LifeboatConfig::default());
        Ok(())
    });
}
