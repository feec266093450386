//! Anthropic answer generator.
//!
//! Uses Anthropic's Messages API directly:
//! - `x-api-key` header authentication (not Bearer)
//! - `anthropic-version` header
//! - System instruction as top-level field
//! - One user turn per request, text blocks joined with newlines

use async_trait::async_trait;
use helpdoc_core::error::GenerationError;
use helpdoc_core::generator::AnswerGenerator;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Anthropic Messages API generator.
pub struct AnthropicGenerator {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    client: reqwest::Client,
}

impl AnthropicGenerator {
    /// Create a generator with the default model and sampling settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT_SECS)
    }

    /// Like [`new`](Self::new) with a request timeout other than the default.
    pub fn with_timeout(api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            client: build_client(timeout_secs),
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, system: &'a str, user_content: &'a str) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system,
            messages: vec![RequestMessage {
                role: "user",
                content: user_content,
            }],
        }
    }

    /// Join every text block; other block types are ignored.
    fn response_text(resp: MessagesResponse) -> String {
        resp.content
            .into_iter()
            .filter_map(|block| match block {
                ResponseContentBlock::Text { text } => Some(text),
                ResponseContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn build_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .expect("Failed to create HTTP client")
}

#[async_trait]
impl AnswerGenerator for AnthropicGenerator {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate_answer(
        &self,
        system_instruction: &str,
        user_content: &str,
    ) -> Result<String, GenerationError> {
        if self.api_key.is_empty() {
            return Err(GenerationError::NotConfigured(
                "Anthropic API key is not set".into(),
            ));
        }

        let url = format!("{}/v1/messages", self.base_url);
        let body = self.request_body(system_instruction, user_content);

        debug!(provider = "anthropic", model = %self.model, "Sending generation request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(5);
            return Err(GenerationError::RateLimited { retry_after_secs });
        }
        if status == 401 || status == 403 {
            return Err(GenerationError::AuthenticationFailed(
                "Invalid Anthropic API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Anthropic API error");
            return Err(GenerationError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: MessagesResponse = response.json().await.map_err(|e| {
            GenerationError::InvalidResponse(format!("Failed to parse Anthropic response: {e}"))
        })?;

        Ok(Self::response_text(api_resp))
    }

    async fn health_check(&self) -> Result<bool, GenerationError> {
        Ok(!self.api_key.is_empty())
    }
}

// --- Anthropic API types ---

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ResponseContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn status_router(status: StatusCode) -> Router {
        Router::new().route(
            "/v1/messages",
            post(move || async move { (status, "upstream says no").into_response() }),
        )
    }

    #[test]
    fn constructor_defaults() {
        let generator = AnthropicGenerator::new("sk-ant-test");
        assert_eq!(generator.name(), "anthropic");
        assert_eq!(generator.base_url, DEFAULT_BASE_URL);
        assert_eq!(generator.model(), "claude-3-5-sonnet-20241022");
        assert_eq!(generator.max_tokens, 500);
        assert!((generator.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn constructor_with_base_url() {
        let generator =
            AnthropicGenerator::new("sk-ant-test").with_base_url("https://custom.proxy.com/");
        assert_eq!(generator.base_url, "https://custom.proxy.com");
    }

    #[test]
    fn request_body_shape() {
        let generator = AnthropicGenerator::new("k").with_model("claude-x").with_max_tokens(64);
        let body = serde_json::to_value(generator.request_body("Be brief.", "Q?")).unwrap();
        assert_eq!(body["model"], "claude-x");
        assert_eq!(body["max_tokens"], 64);
        assert_eq!(body["system"], "Be brief.");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Q?");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn parse_text_blocks_skipping_others() {
        let resp: MessagesResponse = serde_json::from_str(
            r#"{
                "id": "msg_01",
                "model": "claude-3-5-sonnet-20241022",
                "content": [
                    {"type": "text", "text": "First."},
                    {"type": "thinking", "thinking": "hmm"},
                    {"type": "text", "text": "Second."}
                ],
                "usage": {"input_tokens": 10, "output_tokens": 5},
                "stop_reason": "end_turn"
            }"#,
        )
        .unwrap();

        assert_eq!(AnthropicGenerator::response_text(resp), "First.\nSecond.");
    }

    #[tokio::test]
    async fn missing_api_key_is_not_configured() {
        let generator = AnthropicGenerator::new("").with_base_url("http://127.0.0.1:9");
        let err = generator.generate_answer("s", "u").await.unwrap_err();
        assert!(matches!(err, GenerationError::NotConfigured(_)));
        assert!(!generator.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn sends_headers_and_returns_text() {
        let router = Router::new().route(
            "/v1/messages",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["x-api-key"], "sk-ant-test");
                assert_eq!(headers["anthropic-version"], ANTHROPIC_VERSION);
                assert_eq!(body["system"], "system text");
                assert_eq!(body["max_tokens"], 500);
                let question = body["messages"][0]["content"].as_str().unwrap_or_default();
                Json(json!({
                    "id": "msg_1",
                    "model": "claude-3-5-sonnet-20241022",
                    "content": [{"type": "text", "text": format!("echo: {question}")}],
                    "usage": {"input_tokens": 1, "output_tokens": 1}
                }))
            }),
        );
        let base = serve(router).await;

        let generator = AnthropicGenerator::new("sk-ant-test").with_base_url(base);
        let answer = generator
            .generate_answer("system text", "How fast is shipping?")
            .await
            .unwrap();
        assert_eq!(answer, "echo: How fast is shipping?");
    }

    #[tokio::test]
    async fn status_codes_map_to_errors() {
        let base = serve(status_router(StatusCode::TOO_MANY_REQUESTS)).await;
        let err = AnthropicGenerator::new("k")
            .with_base_url(base)
            .generate_answer("s", "u")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::RateLimited { .. }));

        let base = serve(status_router(StatusCode::UNAUTHORIZED)).await;
        let err = AnthropicGenerator::new("k")
            .with_base_url(base)
            .generate_answer("s", "u")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::AuthenticationFailed(_)));

        let base = serve(status_router(StatusCode::INTERNAL_SERVER_ERROR)).await;
        let err = AnthropicGenerator::new("k")
            .with_base_url(base)
            .generate_answer("s", "u")
            .await
            .unwrap_err();
        match err {
            GenerationError::ApiError {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 500);
                assert_eq!(message, "upstream says no");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let router = Router::new().route("/v1/messages", post(|| async { "not json" }));
        let base = serve(router).await;
        let err = AnthropicGenerator::new("k")
            .with_base_url(base)
            .generate_answer("s", "u")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = AnthropicGenerator::new("k")
            .with_base_url(format!("http://{addr}"))
            .generate_answer("s", "u")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Network(_)));
    }
}
