//! Anthropic messages API client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use minutes_core::errors::{MinutesResult, ProviderError};
use minutes_core::models::{ProviderKind, ProviderResponse, SummaryRequest};
use minutes_core::traits::CompletionProvider;

use super::{http_client, invalid, status_error, transport_error, Completion};
use crate::prompts;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: Option<u32>,
    output_tokens: Option<u32>,
}

pub fn build_request(model: &str, system: &str, user: String, max_tokens: u32) -> MessagesRequest {
    MessagesRequest {
        model: model.to_string(),
        max_tokens,
        system: system.to_string(),
        messages: vec![Message {
            role: "user",
            content: user,
        }],
    }
}

/// Concatenate the text blocks and sum input and output tokens.
pub fn parse_response(body: &str) -> Result<Completion, ProviderError> {
    let kind = ProviderKind::Anthropic;
    let parsed: MessagesResponse =
        serde_json::from_str(body).map_err(|e| invalid(kind, format!("malformed JSON: {e}")))?;
    let text: Vec<String> = parsed
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect();
    if text.is_empty() {
        return Err(invalid(kind, "response has no text content"));
    }
    let tokens_used = parsed.usage.and_then(|u| match (u.input_tokens, u.output_tokens) {
        (None, None) => None,
        (i, o) => Some(i.unwrap_or(0) + o.unwrap_or(0)),
    });
    Ok(Completion {
        text: text.join("").trim().to_string(),
        tokens_used,
    })
}

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl AnthropicClient {
    pub fn new(
        api_key: impl Into<String>,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> MinutesResult<Self> {
        Ok(Self {
            http: http_client(ProviderKind::Anthropic, timeout)?,
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/messages", self.base_url)
    }

    async fn complete(&self, system: &str, user: String, max_tokens: u32) -> MinutesResult<(Completion, u64)> {
        let kind = ProviderKind::Anthropic;
        let body = build_request(&self.model, system, user, max_tokens);
        let started = Instant::now();
        let response = self
            .http
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(kind, self.timeout, e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(kind, self.timeout, e))?;
        if !status.is_success() {
            return Err(status_error(kind, status, &text).into());
        }

        let completion = parse_response(&text)?;
        let latency_ms = started.elapsed().as_millis() as u64;
        debug!(
            provider = %kind,
            model = %self.model,
            latency_ms,
            tokens = ?completion.tokens_used,
            "message received"
        );
        Ok((completion, latency_ms))
    }
}

#[async_trait]
impl CompletionProvider for AnthropicClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn answer_question(&self, question: &str, context: &str) -> MinutesResult<ProviderResponse> {
        let (completion, latency_ms) = self
            .complete(
                prompts::QUESTION_SYSTEM_PROMPT,
                prompts::question_prompt(question, context),
                512,
            )
            .await?;
        Ok(ProviderResponse::ok(ProviderKind::Anthropic, completion.text)
            .with_telemetry(completion.tokens_used, Some(latency_ms)))
    }

    async fn generate_summary(&self, request: &SummaryRequest) -> MinutesResult<String> {
        let (completion, _) = self
            .complete(
                prompts::system_prompt(request.summary_type),
                prompts::user_prompt(request),
                prompts::max_tokens(request),
            )
            .await?;
        Ok(completion.text)
    }
}
