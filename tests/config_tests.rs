// Config loading and validation tests

use statchart::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 8082
host = "0.0.0.0"

[statistics]
base_path = "data/statistics"

[cluster]
hosts = ["AdminServer", "ManagedServer1", "ManagedServer2"]

[chart]
default_duration_mins = 60
max_duration_mins = 1440
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8082);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.statistics.base_path, "data/statistics");
    assert_eq!(
        config.cluster.hosts,
        vec!["AdminServer", "ManagedServer1", "ManagedServer2"]
    );
    assert_eq!(config.chart.default_duration_mins, 60);
    assert_eq!(config.chart.max_duration_mins, 1440);
}

#[test]
fn test_config_defaults_when_omitted() {
    let minimal = r#"
[server]
port = 8082
host = "127.0.0.1"

[statistics]
base_path = "/var/lib/stats"
"#;
    let config = AppConfig::load_from_str(minimal).expect("valid");
    assert_eq!(config.statistics.timestamp_format, "%d/%m/%Y %H:%M:%S");
    assert!(config.cluster.hosts.is_empty());
    assert_eq!(config.chart.default_duration_mins, 30);
    assert_eq!(config.chart.max_duration_mins, 10080);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8082", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_base_path() {
    let bad = VALID_CONFIG.replace("base_path = \"data/statistics\"", "base_path = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("statistics.base_path"));
}

#[test]
fn test_config_validation_rejects_blank_timestamp_format() {
    let bad = VALID_CONFIG.replace(
        "base_path = \"data/statistics\"",
        "base_path = \"data/statistics\"\ntimestamp_format = \" \"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("timestamp_format"));
}

#[test]
fn test_config_validation_rejects_duplicate_hosts() {
    let bad = VALID_CONFIG.replace("\"ManagedServer2\"", "\"ManagedServer1\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn test_config_validation_rejects_blank_host() {
    let bad = VALID_CONFIG.replace("\"ManagedServer2\"", "\"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("cluster.hosts"));
}

#[test]
fn test_config_validation_rejects_default_duration_zero() {
    let bad = VALID_CONFIG.replace("default_duration_mins = 60", "default_duration_mins = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("default_duration_mins"));
}

#[test]
fn test_config_validation_rejects_max_below_default() {
    let bad = VALID_CONFIG.replace("max_duration_mins = 1440", "max_duration_mins = 10");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_duration_mins"));
}

#[test]
fn test_config_validation_rejects_missing_statistics_section() {
    let bad = VALID_CONFIG.replace("[statistics]\nbase_path = \"data/statistics\"\n", "");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 8082);
    assert_eq!(config.statistics.base_path, "data/statistics");
}
