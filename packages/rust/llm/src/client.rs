//! HTTP client for the chat-completions extraction endpoint.

use std::future::Future;
use std::time::Duration;

use serde_json::json;
use tracing::{debug, instrument};

use jobnorm_shared::config::ExtractionConfig;
use jobnorm_shared::{ExtractedFields, ExtractionPayload, JobNormError, Result};

use crate::prompt::{SYSTEM_PROMPT, response_schema, user_prompt};
use crate::JobExtractor;

/// Production extraction client bound to one model.
///
/// Build two of these from the same [`ExtractionConfig`] — via [`primary`]
/// and [`fallback`] — to get the degradation pair the pipeline expects.
///
/// [`primary`]: ExtractionClient::primary
/// [`fallback`]: ExtractionClient::fallback
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ExtractionClient {
    /// Create a client against an explicit endpoint. Timeout bounds the whole
    /// request; a timed-out call surfaces as an ordinary error to the caller.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("jobnorm/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| JobNormError::Network(format!("client build: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Build the primary-model client from config, reading the API key from
    /// the configured env var.
    pub fn primary(config: &ExtractionConfig) -> Result<Self> {
        Self::from_config(config, &config.primary_model)
    }

    /// Build the fallback-model client from config.
    pub fn fallback(config: &ExtractionConfig) -> Result<Self> {
        Self::from_config(config, &config.fallback_model)
    }

    fn from_config(config: &ExtractionConfig, model: &str) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            JobNormError::config(format!(
                "extraction API key env var {} is not set",
                config.api_key_env
            ))
        })?;
        Self::new(
            &config.base_url,
            api_key,
            model,
            Duration::from_secs(config.timeout_secs),
        )
    }

    #[instrument(skip_all, fields(model = %self.model))]
    async fn request_fields(&self, payload: &ExtractionPayload) -> Result<ExtractedFields> {
        let body = json!({
            "model": self.model,
            "temperature": 0,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": user_prompt(payload)? },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "job_fields",
                    "schema": response_schema(),
                    "strict": true,
                }
            }
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| JobNormError::Network(format!("chat/completions: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            // Truncate by characters, not bytes: provider error bodies can
            // carry multibyte text and a byte slice could split a char.
            let snippet: String = text.chars().take(200).collect();
            return Err(match status.as_u16() {
                401 | 403 => JobNormError::llm(format!("authentication failed: {snippet}")),
                _ => JobNormError::llm(format!("HTTP {status}: {snippet}")),
            });
        }

        let envelope: serde_json::Value = response
            .json()
            .await
            .map_err(|e| JobNormError::llm(format!("invalid response body: {e}")))?;

        let content = envelope["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| JobNormError::llm("response has no message content".to_string()))?;

        debug!(content_len = content.len(), "extraction response received");

        serde_json::from_str(content)
            .map_err(|e| JobNormError::llm(format!("malformed extraction JSON: {e}")))
    }
}

impl JobExtractor for ExtractionClient {
    fn extract(
        &self,
        payload: &ExtractionPayload,
    ) -> impl Future<Output = Result<ExtractedFields>> + Send {
        self.request_fields(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn test_payload() -> ExtractionPayload {
        ExtractionPayload {
            title: "Backend Engineer".into(),
            description: "Rust services".into(),
            salary_field: String::new(),
            job_region_hint: "Europe".into(),
            job_type_hint: String::new(),
            provided_company_field: "Acme".into(),
        }
    }

    fn chat_response(content: &serde_json::Value) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content.to_string() },
                "finish_reason": "stop",
            }],
        })
    }

    async fn client_for(server: &MockServer, model: &str) -> ExtractionClient {
        ExtractionClient::new(server.uri(), "test-key", model, Duration::from_secs(5))
            .expect("build client")
    }

    #[tokio::test]
    async fn extract_parses_structured_guess() {
        let server = MockServer::start().await;

        let fields = json!({
            "company_name": "Acme",
            "company_website": "https://acme.io",
            "job_category": "Engineering",
            "benefits": ["Health insurance"],
            "job_tags": ["Rust", "Python"],
            "job_type": ["full-time"],
            "job_region": ["Europe"],
            "salary": "€90,000+",
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({ "model": "gpt-4o", "temperature": 0 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(&fields)))
            .mount(&server)
            .await;

        let client = client_for(&server, "gpt-4o").await;
        let result = client.extract(&test_payload()).await.expect("extract");

        assert_eq!(result.company_name, "Acme");
        assert_eq!(result.job_tags, vec!["Rust", "Python"]);
        assert_eq!(result.salary, "€90,000+");
    }

    #[tokio::test]
    async fn extract_coerces_bare_string_list_fields() {
        let server = MockServer::start().await;

        // Some models ignore the schema and return a bare string for a list.
        let fields = json!({
            "company_name": "Acme",
            "company_website": "",
            "job_category": "Data",
            "benefits": "Health insurance",
            "job_tags": [],
            "job_type": [],
            "job_region": "Europe",
            "salary": "",
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(&fields)))
            .mount(&server)
            .await;

        let client = client_for(&server, "gpt-4o").await;
        let result = client.extract(&test_payload()).await.expect("extract");

        assert_eq!(result.benefits, vec!["Health insurance"]);
        assert_eq!(result.job_region, vec!["Europe"]);
    }

    #[tokio::test]
    async fn extract_maps_auth_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Incorrect API key" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, "gpt-4o").await;
        let err = client.extract(&test_payload()).await.expect_err("should fail");

        assert!(matches!(err, JobNormError::Llm(_)), "got {err:?}");
        assert!(err.to_string().contains("authentication failed"));
    }

    #[tokio::test]
    async fn error_snippet_truncates_on_char_boundary() {
        let server = MockServer::start().await;

        // Byte 200 falls inside a two-byte character; truncation must not
        // panic and the error must still carry the body text.
        let body = format!("a{}", "é".repeat(150));
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string(body))
            .mount(&server)
            .await;

        let client = client_for(&server, "gpt-4o").await;
        let err = client.extract(&test_payload()).await.expect_err("should fail");

        let message = err.to_string();
        assert!(message.contains("HTTP 500"));
        assert!(message.contains('é'));
    }

    #[tokio::test]
    async fn extract_rejects_malformed_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(chat_response(&json!("not an object at all"))),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, "gpt-4o").await;
        let err = client.extract(&test_payload()).await.expect_err("should fail");

        assert!(err.to_string().contains("malformed extraction JSON"));
    }

    #[tokio::test]
    async fn request_carries_vocab_and_schema() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(move |req: &Request| {
                let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
                let user = body["messages"][1]["content"].as_str().unwrap();
                assert!(user.contains("Backend Engineer"));
                assert!(user.contains("\"Engineering\""));
                assert_eq!(body["response_format"]["type"], "json_schema");
                ResponseTemplate::new(200)
                    .set_body_json(chat_response(&json!(ExtractedFields::default())))
            })
            .mount(&server)
            .await;

        let client = client_for(&server, "gpt-4o-mini").await;
        let result = client.extract(&test_payload()).await.expect("extract");
        assert_eq!(result, ExtractedFields::default());
    }
}
