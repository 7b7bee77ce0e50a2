use axum_test::TestServer;
use quran_gpt::{
    config::{Config, LlmConfig, LogsConfig, ServerConfig},
    llm::GeminiClient,
    server::{self, handlers::AppState},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "gemini-2.0-flash";
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

/// Create a test configuration pointing the provider at `base_url`
pub fn create_test_config(base_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        llm: LlmConfig {
            base_url: base_url.to_string(),
            api_key: Some(TEST_API_KEY.to_string()),
            model: TEST_MODEL.to_string(),
            timeout_secs: 5,
        },
    }
}

/// Build the full router around a real Gemini client
pub fn create_test_server(config: &Config) -> TestServer {
    let llm = GeminiClient::new(&config.llm).expect("Failed to build Gemini client");
    let state = AppState::new(Arc::new(llm), config.llm.model.clone());
    TestServer::new(server::router(state)).expect("Failed to start test server")
}

/// A provider success body carrying `text` as the first candidate's first part
pub fn gemini_success_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"parts": [{"text": text}], "role": "model"},
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15},
        "modelVersion": TEST_MODEL
    })
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> String {
    let config_path = dir.path().join("config.yaml");
    tokio::fs::write(&config_path, content)
        .await
        .expect("Failed to write config file");
    config_path.to_string_lossy().to_string()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 3000
  logs:
    level: "debug"

llm:
  base_url: "http://localhost:9999"
  api_key: "file-api-key"
  model: "gemini-1.5-pro"
  timeout_secs: 30
"#;

/// Sample configuration without a provider key
pub const SAMPLE_CONFIG_WITHOUT_KEY: &str = r#"
server:
  port: 9000

llm:
  model: "gemini-2.0-flash"
"#;
