//! Wire-format and profile-storage contracts for the provider layer.

use serde_json::json;
use std::sync::Mutex;
use toolsmith::error::ApiError;
use toolsmith::provider::{
    ChatMessage, CompletionOptions, ModelProviderClient, OpenAiChatClient, ProviderConfig,
    ProviderRegistry, ProviderType,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Serializes tests that rewrite XDG_CONFIG_HOME.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[tokio::test]
async fn completion_request_follows_openai_wire_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4",
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hello"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "hi there"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        OpenAiChatClient::new(server.uri(), Some("sk-test".to_string()), "gpt-4").unwrap();
    let reply = client
        .complete(
            &[ChatMessage::system("be brief"), ChatMessage::user("hello")],
            &CompletionOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(reply, "hi there");
}

#[tokio::test]
async fn completion_options_are_forwarded_in_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "temperature": 0.7,
            "max_tokens": 500
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "ok"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiChatClient::new(server.uri(), None, "llama3").unwrap();
    let options = CompletionOptions {
        temperature: Some(0.7),
        max_tokens: Some(500),
        top_p: None,
    };
    let reply = client
        .complete(&[ChatMessage::user("x")], &options)
        .await
        .unwrap();
    assert_eq!(reply, "ok");
}

#[tokio::test]
async fn error_status_surfaces_as_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let client = OpenAiChatClient::new(server.uri(), Some("sk-bad".to_string()), "gpt-4").unwrap();
    let err = client
        .complete(&[ChatMessage::user("x")], &CompletionOptions::default())
        .await
        .unwrap_err();
    match err {
        ApiError::ProviderError(msg) => {
            assert!(msg.contains("401"));
            assert!(msg.contains("bad key"));
        }
        other => panic!("expected ProviderError, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_choices_is_a_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })),
        )
        .mount(&server)
        .await;

    let client = OpenAiChatClient::new(server.uri(), None, "gpt-4").unwrap();
    assert!(matches!(
        client
            .complete(&[ChatMessage::user("x")], &CompletionOptions::default())
            .await,
        Err(ApiError::ProviderError(_))
    ));
}

#[test]
fn provider_profiles_round_trip_through_the_providers_dir() {
    let _guard = ENV_LOCK.lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let mut registry = ProviderRegistry::new();
    let profile = ProviderConfig {
        provider_name: None,
        provider_type: ProviderType::Ollama,
        model: "llama3".to_string(),
        api_key: None,
        endpoint: Some("http://localhost:11434/v1".to_string()),
        default_options: CompletionOptions {
            temperature: Some(0.2),
            max_tokens: None,
            top_p: None,
        },
    };

    registry
        .save_provider_config("local-ollama", &profile)
        .unwrap();
    let config_path = registry.provider_config_path("local-ollama").unwrap();
    assert!(config_path.exists());
    assert!(config_path.ends_with("providers/local-ollama.toml"));

    registry.load_from_xdg().unwrap();
    let loaded = registry.get("local-ollama").unwrap();
    // Filename supplies the missing name on load
    assert_eq!(loaded.provider_name.as_deref(), Some("local-ollama"));
    assert_eq!(loaded.provider_type, ProviderType::Ollama);
    assert_eq!(loaded.model, "llama3");
    assert_eq!(loaded.default_options.temperature, Some(0.2));

    registry.delete_provider_config("local-ollama").unwrap();
    assert!(!config_path.exists());

    std::env::remove_var("XDG_CONFIG_HOME");
}

#[test]
fn invalid_profile_files_are_skipped_on_load() {
    let _guard = ENV_LOCK.lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let providers_dir = dir.path().join("toolsmith/providers");
    std::fs::create_dir_all(&providers_dir).unwrap();
    std::fs::write(providers_dir.join("broken.toml"), "not = [valid").unwrap();
    std::fs::write(providers_dir.join("notes.txt"), "ignored entirely").unwrap();
    std::fs::write(
        providers_dir.join("good.toml"),
        "provider_type = \"ollama\"\nmodel = \"llama3\"\n",
    )
    .unwrap();

    let mut registry = ProviderRegistry::new();
    registry.load_from_xdg().unwrap();
    assert!(registry.get("broken").is_none());
    assert!(registry.get("good").is_some());

    std::env::remove_var("XDG_CONFIG_HOME");
}
