use orderdesk_core::Config;
use orderdesk_server::settings::Settings;

const YAML: &str = r#"
server:
  port: 8080
database:
  url: "postgres://localhost/orders"
  pool:
    size: 4
  setup: true
cors:
  origins:
    - "http://localhost:3000"
    - "https://orders.example.com"
"#;

#[test]
fn test_reads_typed_settings() {
    let config = Config::from_yaml_str(YAML, "dev").unwrap();
    let settings = Settings::from_config(&config).unwrap();

    assert_eq!(settings.bind_addr(), "0.0.0.0:8080");
    assert_eq!(settings.database.pool_size, 4);
    assert_eq!(settings.database.acquire_timeout_secs, 5);
    assert!(settings.database.setup);
    assert!(!settings.database.is_memory());
    assert_eq!(settings.cors_origins.len(), 2);
    assert!(!settings.json_logs);
    assert!(!settings.production);
}

#[test]
fn test_database_url_is_required() {
    assert!(Settings::from_config(&Config::empty()).is_err());
}

#[test]
fn test_production_profile_implies_production() {
    let config = Config::from_yaml_str(YAML, "production").unwrap();
    assert!(Settings::from_config(&config).unwrap().production);

    let mut config = Config::from_yaml_str(YAML, "dev").unwrap();
    config.set("app.production", "true");
    assert!(Settings::from_config(&config).unwrap().production);
}

#[test]
fn test_cors_origins_from_comma_separated_string() {
    let mut config = Config::from_yaml_str(YAML, "dev").unwrap();
    config.set("cors.origins", "https://a.example.com, https://b.example.com,");
    let settings = Settings::from_config(&config).unwrap();
    assert_eq!(
        settings.cors_origins,
        vec!["https://a.example.com", "https://b.example.com"]
    );
}

#[test]
fn test_memory_url() {
    let config = Config::from_yaml_str("database:\n  url: memory\n", "test").unwrap();
    assert!(Settings::from_config(&config).unwrap().database.is_memory());
}
