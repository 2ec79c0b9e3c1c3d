//! Vision API client
//!
//! Sends a meal photo plus the dietician system prompt to an
//! OpenAI-compatible chat completions endpoint and returns the raw text
//! reply. Parsing and validation of that text happen in the analysis core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model used when PROTEIN_MODEL is not set
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// API base used when OPENAI_BASE_URL is not set
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Vision call error types
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Vision API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Vision API returned no content")]
    EmptyResponse,
}

/// Client for the vision chat completions endpoint
#[derive(Clone)]
pub struct VisionClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl VisionClient {
    /// Build a client from the environment.
    ///
    /// Returns None when OPENAI_API_KEY is unset, empty, or the literal
    /// string "undefined"; the caller then takes the fallback estimation
    /// path.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        if api_key.is_empty() || api_key == "undefined" {
            return None;
        }

        let model =
            std::env::var("PROTEIN_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Some(Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url,
        })
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model to estimate protein for a meal photo.
    ///
    /// `image_data_url` is a data URL (or https URL) of the photo. Returns
    /// the raw assistant text, which the normalizer validates separately.
    pub async fn analyze_meal_photo(
        &self,
        system_prompt: &str,
        image_data_url: &str,
    ) -> Result<String, VisionError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: MessageContent::Text(system_prompt),
                },
                Message {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: "Estimate protein for this meal photo.",
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image_data_url,
                                detail: "auto",
                            },
                        },
                    ]),
                },
            ],
        };

        tracing::debug!(model = %self.model, "sending meal photo to vision API");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VisionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(VisionError::EmptyResponse)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
    detail: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
