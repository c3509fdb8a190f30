use orderdesk_core::config::{Config, ConfigError, ConfigValue, PROFILE_ENV};
use serial_test::serial;

#[test]
fn test_empty_config() {
    let config = Config::empty();
    assert!(matches!(
        config.get::<String>("nonexistent"),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
fn test_set_and_get() {
    let mut config = Config::empty();
    config.set("server.host", "127.0.0.1");
    assert_eq!(config.get::<String>("server.host").unwrap(), "127.0.0.1");
}

#[test]
fn test_get_or_default_only_when_missing() {
    let mut config = Config::empty();
    assert_eq!(config.get_or("server.port", 5000u16).unwrap(), 5000);

    config.set("server.port", "not-a-port");
    assert!(matches!(
        config.get_or("server.port", 5000u16),
        Err(ConfigError::TypeMismatch { .. })
    ));
}

#[test]
fn test_type_conversions() {
    let mut config = Config::empty();
    config.set("int_val", 42i64);
    config.set("int_str", " 8080 ");
    config.set("bool_str", "yes");
    config.set("too_big", 70_000i64);
    config.set("negative", -1i64);
    config.set("origins", "https://a.example.com, ,https://b.example.com");

    assert_eq!(config.get::<i64>("int_val").unwrap(), 42);
    assert_eq!(config.get::<String>("int_val").unwrap(), "42");
    assert_eq!(config.get::<u16>("int_str").unwrap(), 8080);
    assert!(config.get::<bool>("bool_str").unwrap());
    assert!(matches!(
        config.get::<u16>("too_big"),
        Err(ConfigError::TypeMismatch { .. })
    ));
    assert!(config.get::<u32>("negative").is_err());
    assert_eq!(
        config.get::<Vec<String>>("origins").unwrap(),
        vec!["https://a.example.com", "https://b.example.com"]
    );
}

#[test]
fn test_list_is_not_a_string() {
    let mut config = Config::empty();
    config.set("origins", ConfigValue::List(vec!["a".into()]));
    assert!(config.get::<String>("origins").is_err());
}

#[test]
fn test_nested_yaml_keys() {
    let yaml = r#"
database:
  url: "postgres://localhost/orders"
  pool:
    size: 10
cors:
  origins:
    - "http://localhost:3000"
    - "https://orders.example.com"
"#;
    let config = Config::from_yaml_str(yaml, "test").unwrap();

    assert_eq!(
        config.get::<String>("database.url").unwrap(),
        "postgres://localhost/orders"
    );
    assert_eq!(config.get::<u32>("database.pool.size").unwrap(), 10);
    let origins: Vec<String> = config.get("cors.origins").unwrap();
    assert_eq!(
        origins,
        vec!["http://localhost:3000", "https://orders.example.com"]
    );
}

#[test]
fn test_invalid_yaml_is_load_error() {
    let result = Config::from_yaml_str("database: [unclosed", "test");
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
#[serial]
fn test_profile_file_overrides_base() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "server:\n  port: 5000\n  host: \"0.0.0.0\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("application-staging.yaml"),
        "server:\n  port: 8081\n",
    )
    .unwrap();

    std::env::remove_var(PROFILE_ENV);
    let config = Config::load_from(dir.path(), "staging").unwrap();

    assert_eq!(config.profile(), "staging");
    assert_eq!(config.get::<u16>("server.port").unwrap(), 8081);
    assert_eq!(config.get::<String>("server.host").unwrap(), "0.0.0.0");
}

#[test]
#[serial]
fn test_env_overrides_yaml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "orderdesktest:\n  database:\n    url: \"postgres://yaml\"\n",
    )
    .unwrap();

    std::env::set_var("ORDERDESKTEST_DATABASE_URL", "postgres://env");
    let config = Config::load_from(dir.path(), "dev").unwrap();
    std::env::remove_var("ORDERDESKTEST_DATABASE_URL");

    assert_eq!(
        config.get::<String>("orderdesktest.database.url").unwrap(),
        "postgres://env"
    );
}

#[test]
#[serial]
fn test_profile_env_var_wins() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var(PROFILE_ENV, "production");
    let config = Config::load_from(dir.path(), "dev").unwrap();
    std::env::remove_var(PROFILE_ENV);

    assert_eq!(config.profile(), "production");
}

#[test]
#[serial]
fn test_missing_files_are_not_errors() {
    let dir = tempfile::tempdir().unwrap();
    std::env::remove_var(PROFILE_ENV);
    let config = Config::load_from(dir.path(), "dev").unwrap();
    assert_eq!(config.profile(), "dev");
}
