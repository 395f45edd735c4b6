use std::fs;
use std::path::PathBuf;

use gourmet::api::ApiClient;
use gourmet::config::ApiConfig;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Restaurant JSON as the directory service emits it
#[allow(dead_code)]
pub fn restaurant_json(id: i64, name: &str, neighborhood: &str, cuisine: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "visited": false,
        "notes": "",
        "neighborhood": neighborhood,
        "cuisine_type": cuisine,
        "booking_urls": {},
        "monitor_enabled": false,
        "priority": "normal",
        "created_at": "2025-01-01T12:00:00",
        "updated_at": "2025-01-01T12:00:00"
    })
}

/// A listing page wrapping `items`
#[allow(dead_code)]
pub fn page_json(items: Vec<Value>, total: u64, page: u32, per_page: u32, total_pages: u32) -> Value {
    json!({
        "items": items,
        "total": total,
        "page": page,
        "per_page": per_page,
        "total_pages": total_pages
    })
}

/// Client pointed at a mock server origin
#[allow(dead_code)]
pub fn client_for(base_url: &str) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    };
    ApiClient::new(&config).expect("failed to build client")
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
