//! Integration tests for config resolution and environment overrides.

use std::io::Write;
use std::path::PathBuf;

use courtside::config::{AppConfig, CONFIG_ENV_VAR, DB_HOST_ENV_VAR, DB_PASSWORD_ENV_VAR};

fn write_config(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path
}

const MINIMAL: &str = r#"
[database]
host = "filehost"
dbname = "nba"
user = "reader"
password = "filepass"
"#;

#[test]
fn test_explicit_path_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "database.toml", MINIMAL);

    let config = AppConfig::resolve(Some(path.as_path())).unwrap();
    // Env-override tests in this binary may touch host/password concurrently,
    // so assert on the fields they leave alone.
    assert_eq!(config.database.dbname, "nba");
    assert_eq!(config.database.user, "reader");
}

#[test]
fn test_env_var_points_at_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "from-env.toml", MINIMAL);

    std::env::set_var(CONFIG_ENV_VAR, &path);
    let config = AppConfig::resolve(None).unwrap();
    std::env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.database.user, "reader");
}

#[test]
fn test_env_overrides_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "database.toml", MINIMAL);

    std::env::set_var(DB_HOST_ENV_VAR, "envhost");
    std::env::set_var(DB_PASSWORD_ENV_VAR, "envpass");
    let config = AppConfig::from_file(&path).unwrap();
    std::env::remove_var(DB_HOST_ENV_VAR);
    std::env::remove_var(DB_PASSWORD_ENV_VAR);

    assert_eq!(config.database.host, "envhost");
    assert_eq!(config.database.password, "envpass");
}
