//! OpenAI-compatible `/chat/completions` client.
//!
//! Serves OpenAI, Gemini (through its OpenAI-compatible endpoint), Groq,
//! OpenRouter, and local servers such as Ollama.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use minutes_core::errors::{MinutesResult, ProviderError};
use minutes_core::models::{ProviderKind, ProviderResponse, SummaryRequest};
use minutes_core::traits::CompletionProvider;

use super::{http_client, invalid, status_error, transport_error, Completion};
use crate::prompts;

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: Option<u32>,
}

/// Build the JSON body for one completion.
pub fn build_request(model: &str, system: &str, user: String, max_tokens: u32) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: system.to_string(),
            },
            ChatMessage {
                role: "user",
                content: user,
            },
        ],
        max_tokens,
        temperature: 0.3,
    }
}

/// Extract the first choice's text and the total token usage.
pub fn parse_response(kind: ProviderKind, body: &str) -> Result<Completion, ProviderError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| invalid(kind, format!("malformed JSON: {e}")))?;
    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| invalid(kind, "response has no choices"))?;
    Ok(Completion {
        text: text.trim().to_string(),
        tokens_used: parsed.usage.and_then(|u| u.total_tokens),
    })
}

/// A provider speaking the OpenAI chat completions protocol.
pub struct ChatCompletionsClient {
    kind: ProviderKind,
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl ChatCompletionsClient {
    pub fn new(
        kind: ProviderKind,
        api_key: impl Into<String>,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> MinutesResult<Self> {
        Ok(Self {
            kind,
            http: http_client(kind, timeout)?,
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| Self::default_model(kind).to_string()),
            base_url: base_url
                .unwrap_or_else(|| Self::default_base_url(kind).to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout,
        })
    }

    pub fn default_base_url(kind: ProviderKind) -> &'static str {
        match kind {
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
            ProviderKind::Groq => "https://api.groq.com/openai/v1",
            ProviderKind::OpenRouter => "https://openrouter.ai/api/v1",
            ProviderKind::Local | ProviderKind::Anthropic => "http://localhost:11434/v1",
        }
    }

    pub fn default_model(kind: ProviderKind) -> &'static str {
        match kind {
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Gemini => "gemini-1.5-flash",
            ProviderKind::Groq => "llama-3.1-8b-instant",
            ProviderKind::OpenRouter => "openai/gpt-4o-mini",
            ProviderKind::Local | ProviderKind::Anthropic => "llama3.1",
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system: &str, user: String, max_tokens: u32) -> MinutesResult<(Completion, u64)> {
        let body = build_request(&self.model, system, user, max_tokens);
        let started = Instant::now();
        let mut request = self.http.post(self.endpoint()).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }
        if self.kind == ProviderKind::OpenRouter {
            request = request.header("X-Title", "minutes");
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(self.kind, self.timeout, e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(self.kind, self.timeout, e))?;
        if !status.is_success() {
            return Err(status_error(self.kind, status, &text).into());
        }

        let completion = parse_response(self.kind, &text)?;
        let latency_ms = started.elapsed().as_millis() as u64;
        debug!(
            provider = %self.kind,
            model = %self.model,
            latency_ms,
            tokens = ?completion.tokens_used,
            "chat completion received"
        );
        Ok((completion, latency_ms))
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionsClient {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn answer_question(&self, question: &str, context: &str) -> MinutesResult<ProviderResponse> {
        let (completion, latency_ms) = self
            .complete(
                prompts::QUESTION_SYSTEM_PROMPT,
                prompts::question_prompt(question, context),
                512,
            )
            .await?;
        Ok(ProviderResponse::ok(self.kind, completion.text)
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
