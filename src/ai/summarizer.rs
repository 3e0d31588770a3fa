use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Only this many characters of the article body are sent.
pub const ARTICLE_PREFIX_CHARS: usize = 3000;

const PROMPT_TEMPLATE: &str = r#"Read the following news article and summarize it in exactly this format, in the article's language:
1. **One-line summary**: the core topic of the article
2. **Key points**: the three most important details, as bullet points
3. **Sentiment**: exactly one of positive / negative / neutral

[Article]
"#;

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

pub struct Summarizer {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl Summarizer {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model,
            base_url: GEMINI_API_URL.to_string(),
        })
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn generate_summary(&self, article_text: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(article_text)),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: 1024,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(AppError::Summarizer(format!("API error ({status}): {error_text}")));
        }

        let response: GenerateResponse = response.json().await?;

        let summary = response
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("\n");

        if summary.trim().is_empty() {
            return Err(AppError::Summarizer("empty response".to_string()));
        }

        Ok(summary)
    }

    pub fn model_version(&self) -> &str {
        &self.model
    }
}

pub fn build_prompt(article_text: &str) -> String {
    format!("{PROMPT_TEMPLATE}{}", article_prefix(article_text, ARTICLE_PREFIX_CHARS))
}

/// The first `max_chars` characters, never splitting a code point.
pub fn article_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_article_prefix_respects_char_boundaries() {
        let text = "삼성전자".repeat(1000);
        let prefix = article_prefix(&text, ARTICLE_PREFIX_CHARS);
        assert_eq!(prefix.chars().count(), ARTICLE_PREFIX_CHARS);
        assert_eq!(article_prefix("short", 3000), "short");
    }

    #[test]
    fn test_prompt_asks_for_summary_points_and_sentiment() {
        let prompt = build_prompt("body text");
        assert!(prompt.contains("One-line summary"));
        assert!(prompt.contains("three most important details"));
        assert!(prompt.contains("positive / negative / neutral"));
        assert!(prompt.ends_with("body text"));
    }

    #[tokio::test]
    async fn test_generate_summary_joins_parts() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-1.5-flash:generateContent")
                    .header("x-goog-api-key", "test-key");
                then.status(200).json_body(json!({
                    "candidates": [{
                        "content": {
                            "parts": [{ "text": "1. 요약" }, { "text": "3. 중립" }]
                        }
                    }]
                }));
            })
            .await;

        let summarizer = Summarizer::new("test-key".to_string(), "gemini-1.5-flash".to_string())
            .unwrap()
            .with_base_url(server.base_url());
        let summary = summarizer.generate_summary("article").await.unwrap();

        mock.assert_async().await;
        assert_eq!(summary, "1. 요약\n3. 중립");
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(403)
                    .json_body(json!({ "error": { "message": "API key not valid" } }));
            })
            .await;

        let summarizer = Summarizer::new("bad".to_string(), "gemini-1.5-flash".to_string())
            .unwrap()
            .with_base_url(server.base_url());
        let err = summarizer.generate_summary("article").await.unwrap_err();

        assert!(matches!(err, AppError::Summarizer(_)));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({ "candidates": [] }));
            })
            .await;

        let summarizer = Summarizer::new("k".to_string(), "m".to_string())
            .unwrap()
            .with_base_url(server.base_url());
        assert!(summarizer.generate_summary("article").await.is_err());
    }
}
