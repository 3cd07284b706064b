use acre_config::AcreConfig;
use figment::Jail;

#[test]
fn env_overrides_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("ACRE_DATABASE__PATH", "/tmp/acre-env.db");
        jail.set_env("ACRE_GENERAL__PAGE_SIZE", "3");

        let config = AcreConfig::load().expect("config loads");
        assert_eq!(config.database.path, "/tmp/acre-env.db");
        assert_eq!(config.general.page_size, 3);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".acre")).expect("create .acre");
        jail.create_file(".acre/config.toml", "[general]\ndefault_user = \"from_toml\"\n")?;
        jail.set_env("ACRE_GENERAL__DEFAULT_USER", "from_env");

        let config = AcreConfig::load().expect("config loads");
        assert_eq!(config.general.default_user(), Some("from_env"));
        Ok(())
    });
}

#[test]
fn zero_page_size_from_env_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("ACRE_GENERAL__PAGE_SIZE", "0");
        assert!(AcreConfig::load().is_err());
        Ok(())
    });
}
