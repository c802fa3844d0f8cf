use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::RewriteError;
use crate::providers::RewriteProvider;

/// Prompt template for dialect rewriting. The service must keep sequence
/// numbers, timecodes, tags and line structure intact and replace only the
/// text content.
const PROMPT_TEMPLATE: &str = "你是专业字幕改写器，任务是把字幕改写成{dialect}。请严格遵守：
1. 保留原先的序号、时间轴（例如 00:00:22,699 --> 00:00:24,533）、HTML 标签（例如 <b>…</b>）和行结构，只替换文字内容。
2. 输出必须自然顺畅，保持语气词和口语表达。
3. 标点和空白需沿用原文；若原行为空或只有标签，保持原样。
4. 输出只包含改写后的字幕内容，不要附加解释或任何额外文字。

需要改写的完整字幕如下：
{subtitle_text}
";

/// DeepSeek client speaking the OpenAI-compatible chat completions API
#[derive(Debug)]
pub struct DeepSeek {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL
    endpoint: String,
    /// Model name
    model: String,
}

/// Chat message object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct ChatRequest {
    /// Model name to use
    model: String,
    /// Messages of the conversation
    messages: Vec<ChatMessage>,
    /// Temperature for generation
    temperature: f32,
    /// Whether to stream the response
    stream: bool,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// Completion choices
    choices: Vec<ChatChoice>,
}

/// Individual completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    /// Response message
    message: ChatMessage,
}

impl DeepSeek {
    /// Create a new DeepSeek client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        DeepSeek {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl RewriteProvider for DeepSeek {
    async fn rewrite(&self, subtitle_text: &str, target_dialect: &str) -> Result<String, RewriteError> {
        let prompt = PROMPT_TEMPLATE
            .replace("{dialect}", target_dialect)
            .replace("{subtitle_text}", subtitle_text);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "You are a professional subtitle rewriter.".to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            temperature: 0.2,
            stream: false,
        };

        debug!("Sending rewrite request to {} ({} chars)", self.api_url(), subtitle_text.len());

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RewriteError::RequestFailed(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepSeek API error ({}): {}", status, error_text);
            return Err(RewriteError::RequestFailed(format!("API error ({}): {}", status, error_text)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::RequestFailed(format!("Failed to parse response: {}", e)))?;

        let content = chat_response
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(RewriteError::EmptyResponse);
        }

        Ok(content)
    }
}
