use std::time::Duration;

use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use url::Url;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::ExtractedArticle;

const USER_AGENT_STRING: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

pub struct ArticleExtractor {
    client: Client,
}

impl ArticleExtractor {
    /// Uses the same timeout and certificate policy as the feed transport.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));

        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(5))
            .default_headers(headers)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self { client })
    }

    /// Follow redirects to the final article URL, falling back to the input.
    /// Uses HEAD so the article body is only downloaded once, by `extract`.
    pub async fn resolve_link(&self, url: &str) -> String {
        match self.client.head(url).send().await {
            Ok(response) => response.url().to_string(),
            Err(e) => {
                tracing::debug!("Failed to resolve {}: {}", url, e);
                url.to_string()
            }
        }
    }

    pub async fn extract(&self, article_url: &str) -> Result<ExtractedArticle> {
        let response = self.client.get(article_url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::Extraction(format!(
                "HTTP {} from {}",
                response.status(),
                article_url
            )));
        }

        let resolved_url = response.url().to_string();
        let html = response.text().await?;

        let text = extract_text(&html)
            .ok_or_else(|| AppError::Extraction("could not read article body".to_string()))?;
        let top_image = find_top_image(&html).map(|src| resolve_url(&src, &resolved_url));

        Ok(ExtractedArticle {
            resolved_url,
            text,
            top_image,
        })
    }
}

/// Convert HTML to plain text, dropping blank lines and surrounding space.
pub fn extract_text(html: &str) -> Option<String> {
    let text = match html2text::from_read(html.as_bytes(), 100) {
        Ok(t) => t,
        Err(e) => {
            tracing::debug!("Failed to convert HTML to text: {}", e);
            return None;
        }
    };

    let cleaned = text
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Some(cleaned)
}

/// Lead image from `og:image` or `twitter:image` meta tags.
pub fn find_top_image(html: &str) -> Option<String> {
    let property_first = Regex::new(
        r#"<meta[^>]*(?:property|name)=["'](?:og:image|twitter:image)["'][^>]*content=["']([^"']+)["']"#,
    )
    .ok()?;

    let content_first = Regex::new(
        r#"<meta[^>]*content=["']([^"']+)["'][^>]*(?:property|name)=["'](?:og:image|twitter:image)["']"#,
    )
    .ok()?;

    property_first
        .captures(html)
        .or_else(|| content_first.captures(html))
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

fn resolve_url(href: &str, base_url: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    if let Ok(base) = Url::parse(base_url) {
        if let Ok(resolved) = base.join(href) {
            return resolved.to_string();
        }
    }

    href.to_string()
}
