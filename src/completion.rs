use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ChatMessage, CompletionService, DreError, DreResult};

pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: String,
}

/// OpenAI-compatible `chat/completions` client.
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl ChatCompletionClient {
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

/// Pulls `choices[0].message.content` out of a response body.
fn first_choice(body: &str) -> DreResult<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| DreError::CompletionService(format!("undecodable response: {e}")))?;
    response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| DreError::CompletionService("response has no choices".to_string()))
}

impl CompletionService for ChatCompletionClient {
    fn complete(&self, messages: &[ChatMessage]) -> DreResult<String> {
        let url = self.endpoint();
        debug!(%url, model = %self.model, messages = messages.len(), "sending chat completion");

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages,
            })
            .send()?;

        let status = res.status();
        let body = res.text()?;
        if !status.is_success() {
            return Err(DreError::CompletionService(format!(
                "status {status}: {body}"
            )));
        }
        first_choice(&body)
    }
}
