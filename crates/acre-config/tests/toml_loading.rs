//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use acre_config::AcreConfig;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};

#[test]
fn loads_every_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/acre/registry.db"

[server]
bind = "0.0.0.0:9000"

[general]
page_size = 25
default_user = "user1"
"#,
        )?;

        let config: AcreConfig = Figment::from(Serialized::defaults(AcreConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/acre/registry.db");
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.general.page_size, 25);
        assert_eq!(config.general.default_user(), Some("user1"));
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[general]\npage_size = 5\n")?;

        let config: AcreConfig = Figment::from(Serialized::defaults(AcreConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.page_size, 5);
        assert_eq!(config.database.path, ".acre/acre.db");
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".acre")).expect("create .acre");
        jail.create_file(".acre/config.toml", "[database]\npath = \":memory:\"\n")?;

        let config = AcreConfig::load().expect("config loads");
        assert!(config.database.is_memory());
        Ok(())
    });
}

#[test]
fn invalid_bind_in_file_fails_validation() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".acre")).expect("create .acre");
        jail.create_file(".acre/config.toml", "[server]\nbind = \"nowhere\"\n")?;

        let err = AcreConfig::load().unwrap_err();
        assert!(err.to_string().contains("server.bind"));
        Ok(())
    });
}
