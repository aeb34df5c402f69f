//! Remote Generation Tests
//!
//! HTTP client behavior against a mock completion endpoint, and the generator
//! wired to it.

use crate::config::RemoteConfig;
use crate::error::MindMapError;
use crate::remote::{CompletionService, HttpCompletionClient, RemoteGenerator};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

fn config_for(server: &MockServer, api_key: Option<&str>) -> RemoteConfig {
    RemoteConfig {
        api_url: format!("{}{}", server.uri(), COMPLETIONS_PATH),
        api_key: api_key.map(str::to_string),
        timeout_secs: 1,
        ..RemoteConfig::default()
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

#[cfg(test)]
mod client_tests {
    use super::*;

    #[tokio::test]
    async fn test_request_shape_and_bearer() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(header("authorization", "Bearer secret"))
            .and(body_partial_json(json!({
                "model": "deepseek-chat",
                "temperature": 0.7,
                "max_tokens": 4000,
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("好的")))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = HttpCompletionClient::new(config_for(&mock_server, Some("secret")));

        // 2. Act
        let result = client.complete("提示".to_string()).await;

        // 3. Assert
        assert_eq!(result.unwrap(), "好的");
    }

    #[tokio::test]
    async fn test_server_error_is_http_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;
        let client = HttpCompletionClient::new(config_for(&mock_server, None));

        let result = client.complete("提示".to_string()).await;

        match result {
            Err(MindMapError::Http(msg)) => assert!(msg.contains("500")),
            other => panic!("Expected MindMapError::Http, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_choices_is_malformed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&mock_server)
            .await;
        let client = HttpCompletionClient::new(config_for(&mock_server, None));

        let result = client.complete("提示".to_string()).await;

        assert!(matches!(result, Err(MindMapError::MalformedExternalResult(_))));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("太慢了"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;
        let client = HttpCompletionClient::new(config_for(&mock_server, None));

        let result = client.complete("提示".to_string()).await;

        assert!(matches!(result, Err(MindMapError::Timeout(_))));
    }
}

#[cfg(test)]
mod generator_tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_through_http() {
        let mock_server = MockServer::start().await;
        let reply = "```json\n{\"topic\": \"学习方法\", \"nodes\": [{\"type\": \"feature\", \"label\": \"计划\", \"children\": [{\"type\": \"point\", \"label\": \"每日目标\"}]}]}\n```";
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(reply)))
            .mount(&mock_server)
            .await;
        let generator =
            RemoteGenerator::new(HttpCompletionClient::new(config_for(&mock_server, None)));

        let tree = generator.generate("学习要有方法").await.unwrap();

        assert_eq!(tree.label, "学习方法");
        assert_eq!(tree.children[0].label, "计划");
        assert_eq!(tree.children[0].children[0].label, "每日目标");
    }

    #[tokio::test]
    async fn test_broken_json_reply_still_yields_tree() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("{topic: '总结', nodes: [...]}")),
            )
            .mount(&mock_server)
            .await;
        let generator =
            RemoteGenerator::new(HttpCompletionClient::new(config_for(&mock_server, None)));

        let tree = generator.generate("一些文本").await.unwrap();

        assert_eq!(tree.label, "总结");
        assert!(!tree.children.is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_sends_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
            .expect(0)
            .mount(&mock_server)
            .await;
        let generator =
            RemoteGenerator::new(HttpCompletionClient::new(config_for(&mock_server, None)));

        let result = generator.generate("   ").await;

        assert!(matches!(result, Err(MindMapError::EmptyInput)));
    }
}
