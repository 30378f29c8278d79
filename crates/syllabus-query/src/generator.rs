//! Text-generation fallback for questions no rule answers.

pub mod mock;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use syllabus_core::config_file::AssistantConfig;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model returned no text")]
    EmptyResponse,
}

/// A model that turns a prompt into text.
pub trait TextGenerator: Send + Sync {
    /// Model identifier, for logs.
    fn name(&self) -> &str;

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>;
}

/// Prompt that confines the model to the supplied syllabus JSON.
pub fn grounded_prompt(syllabus_json: &str, question: &str) -> String {
    format!(
        r#"
You are an expert college syllabus assistant.
Your task is to answer the user's question based ONLY on the provided syllabus data in JSON format.
Do not use any external knowledge. If the answer is not in the provided context, state that you cannot find the information in the syllabus.
Format your answer clearly using markdown for better readability.

Here is the full syllabus data:
```json
{syllabus_json}
```

Here is the user's question:
"{question}"

Answer:
"#
    )
}

/// Google Gemini `generateContent` client.
pub struct GeminiGenerator {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl GeminiGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            client: reqwest::Client::new(),
        }
    }

    /// Build from resolved settings. `None` when no API key is configured,
    /// which leaves the model fallback disabled.
    pub fn from_config(config: &AssistantConfig) -> Option<Self> {
        let api_key = config.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        let mut generator = Self::new(api_key);
        if let Some(model) = &config.model {
            generator = generator.with_model(model.as_str());
        }
        if let Some(base_url) = &config.base_url {
            generator = generator.with_base_url(base_url.as_str());
        }
        if let Some(secs) = config.timeout_secs {
            generator = generator.with_timeout(Duration::from_secs(secs));
        }
        Some(generator)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Per-request timeout. Without one, reqwest's default applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Concatenate the text parts of the first candidate.
pub(crate) fn response_text(data: &serde_json::Value) -> Option<String> {
    let parts = data["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect::<Vec<_>>()
        .join("");
    (!text.trim().is_empty()).then_some(text)
}

impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        &self.model
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        Box::pin(async move {
            let body = serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            });

            let mut req = self
                .client
                .post(self.endpoint())
                .query(&[("key", self.api_key.as_str())])
                .json(&body);
            if let Some(timeout) = self.timeout {
                req = req.timeout(timeout);
            }

            let resp = req.send().await?;
            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(GenerationError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let data: serde_json::Value = resp.json().await?;
            response_text(&data).ok_or(GenerationError::EmptyResponse)
        })
    }
}
