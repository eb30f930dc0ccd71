use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use chartroom::api::HttpSessionApi;
use chartroom::config::ServerConfig;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

#[allow(dead_code)]
pub fn temp_json_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("failed to write json file");
    (temp_dir, path)
}

/// HTTP session API pointed at a mock server
#[allow(dead_code)]
pub fn api_for(base_url: &str) -> HttpSessionApi {
    HttpSessionApi::new(&ServerConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    })
    .expect("valid server config")
}
