use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::time::Duration;

use crate::error::ApiError;
use crate::prompt::Prompt;

pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

// Attribution headers OpenRouter requires for free-tier access.
const REFERER: &str = "https://github.com/anmolsah/AICommit01";
const APP_TITLE: &str = "Commit Genius";

const MAX_TOKENS: u32 = 100;
const TEMPERATURE: f32 = 0.3;

/// Remote text-completion endpoint. One attempt per invocation; retry
/// policy, if any, belongs to the caller.
pub trait CompletionApi {
    fn complete(&self, prompt: &Prompt, credential: &str) -> Result<String, ApiError>;
}

/// Blocking OpenRouter chat-completions client.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    api_url: String,
    timeout: Duration,
}

impl OpenRouterClient {
    pub fn new(api_url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            api_url: api_url.into(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

impl Default for OpenRouterClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_TIMEOUT_MS)
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl CompletionApi for OpenRouterClient {
    fn complete(&self, prompt: &Prompt, credential: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({
            "model": prompt.model,
            "messages": [{ "role": "user", "content": prompt.text }],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} {elapsed}")
                .unwrap(),
        );
        spinner.set_message("Generating commit message...");
        spinner.enable_steady_tick(Duration::from_millis(80));

        let response = ureq::post(&self.api_url)
            .timeout(self.timeout)
            .set("Authorization", &format!("Bearer {credential}"))
            .set("HTTP-Referer", REFERER)
            .set("X-Title", APP_TITLE)
            .send_json(&body);

        spinner.finish_and_clear();

        let response = response.map_err(|err| self.classify(err))?;

        let parsed: ChatResponse = response
            .into_json()
            .map_err(|err| ApiError::MalformedResponse(err.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(ApiError::MalformedResponse(
                "response contained no completion text".into(),
            ));
        }
        Ok(content)
    }
}

impl OpenRouterClient {
    fn classify(&self, err: ureq::Error) -> ApiError {
        match err {
            ureq::Error::Status(status, response) => {
                let body = response.into_string().unwrap_or_default();
                match status {
                    429 => ApiError::RateLimited,
                    401 => ApiError::InvalidCredential,
                    402 => ApiError::InsufficientBalance,
                    _ => ApiError::Provider {
                        status,
                        message: provider_message(&body),
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                let text = transport.to_string();
                match transport.kind() {
                    ureq::ErrorKind::Dns | ureq::ErrorKind::ConnectionFailed => {
                        ApiError::NetworkUnreachable(text)
                    }
                    _ if text.contains("timed out") => {
                        ApiError::Timeout(self.timeout.as_millis() as u64)
                    }
                    _ => ApiError::NetworkUnreachable(text),
                }
            }
        }
    }
}

/// Prefer the provider's `{error:{message}}` envelope over the raw body.
fn provider_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().to_string(),
    }
}
