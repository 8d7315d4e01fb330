//! Configuration layering

use mes_global_search::config::Config;
use mes_global_search::models::ItemType;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_file_overrides_embedded_defaults() {
    let file = write_config(
        r#"
[server]
http_port = 9191

[observability]
service_name = "mes-search-edge"

[search]
default_limit = 10

[grouping]
max_groups = 3

[grouping.category_priority]
"待处理" = 0
"#,
    );

    let config = Config::load_from(file.path()).unwrap();

    assert_eq!(config.server.http_port, 9191);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.observability.service_name, "mes-search-edge");
    assert_eq!(config.search.default_limit, 10);
    assert_eq!(config.search.max_limit, 50);
    assert_eq!(config.grouping.max_groups, 3);
    assert_eq!(config.grouping.category_rank("待处理"), 0);
    assert_eq!(config.grouping.type_rank(&ItemType::Setting), 4);
}

#[test]
fn test_invalid_value_is_an_error() {
    let file = write_config(
        r#"
[server]
http_port = "not a port"
"#,
    );

    assert!(Config::load_from(file.path()).is_err());
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.server.http_port, 8080);
    assert!(config.observability.prometheus_enabled);
    assert!(!config.observability.json_logs);
    assert_eq!(config.observability.service_name, "mes-global-search");
}
