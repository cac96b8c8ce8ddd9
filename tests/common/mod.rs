use solace::config::Config;
use solace::session::ChatSession;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::MockServer;

/// Configuration pointing at a mock OpenAI-compatible server
#[allow(dead_code)]
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.provider.api_base = format!("{}/v1", server.uri());
    config.provider.api_key = Some("sk-test".to_string());
    config.provider.timeout_seconds = 5;
    config
}

/// Ready session talking to `server`
#[allow(dead_code)]
pub fn session_for(server: &MockServer) -> ChatSession {
    ChatSession::from_config(&config_for(server))
}

/// Body of a successful chat completion
#[allow(dead_code)]
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49 }
    })
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
