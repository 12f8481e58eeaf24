//! Client for the OpenAI-compatible chat-completions API.
//!
//! One method per pipeline stage: `describe_image` for the vision model,
//! `generate_story` for the text model. Both are single synchronous
//! request/response calls with no retry; endpoint failures propagate to the
//! caller as [`PicstoryError::Upstream`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::constants::{DESCRIBE_IMAGE_PROMPT, STORY_SYSTEM_PROMPT};
use crate::encode::image_data_uri;
use crate::error::PicstoryError;

/// Request body for POST {base}/chat/completions
#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: MessageContent<'a>,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize, Debug)]
#[serde(tag = "type")]
enum ContentPart<'a> {
    #[serde(rename = "text")]
    Text { text: &'a str },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize, Debug)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: String,
}

/// Handle on the inference endpoint, cheap to clone.
#[derive(Clone, Debug)]
pub struct GroqClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    vision_model: String,
    text_model: String,
}

impl GroqClient {
    /// Builds a client. A missing API key is passed through as an empty
    /// bearer token and surfaces as an auth error from the endpoint.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        vision_model: &str,
        text_model: &str,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.unwrap_or_default(),
            vision_model: vision_model.to_string(),
            text_model: text_model.to_string(),
        }
    }

    /// Asks the vision model for a four-line description of the image.
    pub async fn describe_image(&self, base64_image: &str) -> Result<String, PicstoryError> {
        let data_uri = image_data_uri(base64_image);
        let body = describe_request(&self.vision_model, &data_uri);
        self.chat_completion(&body).await
    }

    /// Asks the text model for a story from the composite instruction.
    pub async fn generate_story(&self, story_prompt: &str) -> Result<String, PicstoryError> {
        let body = story_request(&self.text_model, story_prompt);
        self.chat_completion(&body).await
    }

    async fn chat_completion(&self, body: &ChatRequest<'_>) -> Result<String, PicstoryError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("chat completion request to {} model {}", url, body.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(PicstoryError::Upstream(
                status.as_u16(),
                String::from_utf8_lossy(&bytes).to_string(),
            ));
        }

        let parsed: ChatResponse = serde_json::from_slice(&bytes).map_err(|err| {
            PicstoryError::InternalServerError(format!(
                "Failed to parse chat completion response: {err}"
            ))
        })?;
        if let Some(error) = parsed.error {
            return Err(PicstoryError::Upstream(status.as_u16(), error.to_string()));
        }

        let first = parsed.choices.into_iter().next().ok_or_else(|| {
            PicstoryError::InternalServerError("Chat completion returned no choices".to_string())
        })?;
        Ok(first.message.content)
    }
}

fn describe_request<'a>(model: &'a str, data_uri: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content: MessageContent::Parts(vec![
                ContentPart::Text {
                    text: DESCRIBE_IMAGE_PROMPT,
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url: data_uri },
                },
            ]),
        }],
    }
}

fn story_request<'a>(model: &'a str, story_prompt: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: MessageContent::Text(STORY_SYSTEM_PROMPT),
            },
            ChatMessage {
                role: "user",
                content: MessageContent::Text(story_prompt),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn describe_request_shape() {
        let body = describe_request("vision-model", "data:image/jpeg;base64,AAAA");
        let value = serde_json::to_value(&body).expect("serialize request");
        assert_eq!(
            value,
            json!({
                "model": "vision-model",
                "messages": [
                    {
                        "role": "user",
                        "content": [
                            {"type": "text", "text": "Describe the image in 4 lines."},
                            {
                                "type": "image_url",
                                "image_url": {"url": "data:image/jpeg;base64,AAAA"}
                            }
                        ]
                    }
                ]
            })
        );
    }

    #[test]
    fn story_request_shape() {
        let body = story_request("text-model", "Write a comedic story. desc.");
        let value = serde_json::to_value(&body).expect("serialize request");
        assert_eq!(
            value,
            json!({
                "model": "text-model",
                "messages": [
                    {"role": "system", "content": STORY_SYSTEM_PROMPT},
                    {"role": "user", "content": "Write a comedic story. desc."}
                ]
            })
        );
    }

    #[test]
    fn request_construction_is_deterministic() {
        let a = serde_json::to_string(&story_request("m", "same prompt")).expect("serialize");
        let b = serde_json::to_string(&story_request("m", "same prompt")).expect("serialize");
        assert_eq!(a, b);
    }

    #[test]
    fn response_parsing_takes_first_choice() {
        let raw = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]
        })
        .to_string();
        let parsed: ChatResponse = serde_json::from_str(&raw).expect("parse response");
        let first = parsed.choices.into_iter().next().expect("first choice");
        assert_eq!(first.message.content, "first");
    }

    #[test]
    fn response_without_choices_is_rejected() {
        let raw = json!({"error": {"message": "model decommissioned"}}).to_string();
        let parsed: ChatResponse = serde_json::from_str(&raw).expect("parse response");
        assert!(parsed.error.is_some());
        assert!(parsed.choices.is_empty());
    }
}
