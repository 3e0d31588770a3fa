use std::time::Duration;

use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;

use crate::config::Config;
use crate::error::Result;
use crate::models::FeedEntry;

use super::query::FeedQuery;
use super::FeedSource;

const USER_AGENT: &str = "news-watch/1.0";

pub struct FeedFetcher {
    client: Client,
    query: FeedQuery,
}

impl FeedFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(5))
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            query: FeedQuery::new(&config.language, &config.region),
        })
    }

    #[cfg(test)]
    pub fn with_query(mut self, query: FeedQuery) -> Self {
        self.query = query;
        self
    }

    pub async fn fetch_entries(&self, url: &str) -> Result<Vec<FeedEntry>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Failed to fetch feed: HTTP {}", response.status()).into());
        }

        let bytes = response.bytes().await?;
        let feed = parser::parse(&bytes[..])?;

        let entries = feed
            .entries
            .into_iter()
            .filter_map(|entry| {
                let title = entry.title.map(|t| t.content)?;
                Some(FeedEntry {
                    title,
                    link: entry
                        .links
                        .first()
                        .map(|l| l.href.clone())
                        .unwrap_or_default(),
                    published: entry
                        .published
                        .or(entry.updated)
                        .map(|dt| dt.to_rfc2822())
                        .unwrap_or_default(),
                })
            })
            .collect();

        Ok(entries)
    }
}

#[async_trait]
impl FeedSource for FeedFetcher {
    async fn fetch(&self, keyword: &str, window: chrono::Duration) -> Result<Vec<FeedEntry>> {
        let url = self.query.url_for(keyword, window);
        tracing::debug!(keyword = %keyword, "Fetching {}", url);
        self.fetch_entries(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const RSS_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"삼성전자 when:1h" - Google News</title>
    <link>https://news.google.com</link>
    <description>Google News</description>
    <item>
      <title>삼성전자 주가 급등 - 연합뉴스</title>
      <link>https://news.google.com/rss/articles/abc</link>
      <pubDate>Sat, 17 Oct 2026 01:00:00 GMT</pubDate>
    </item>
    <item>
      <title>삼성전자 신제품 공개</title>
      <link>https://news.google.com/rss/articles/def</link>
    </item>
  </channel>
</rss>"#;

    fn fetcher(server: &MockServer) -> FeedFetcher {
        FeedFetcher::new(&Config::default())
            .unwrap()
            .with_query(FeedQuery::new("ko", "KR").with_base_url(server.url("/rss/search")))
    }

    #[tokio::test]
    async fn test_fetch_parses_entries() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rss/search")
                    .query_param_exists("q")
                    .query_param("hl", "ko");
                then.status(200)
                    .header("content-type", "application/rss+xml")
                    .body(RSS_BODY);
            })
            .await;

        let entries = fetcher(&server)
            .fetch("삼성전자", chrono::Duration::hours(1))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "삼성전자 주가 급등 - 연합뉴스");
        assert_eq!(entries[0].link, "https://news.google.com/rss/articles/abc");
        assert_eq!(entries[0].published, "Sat, 17 Oct 2026 01:00:00 +0000");
        assert_eq!(entries[1].published, "");
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rss/search");
                then.status(503);
            })
            .await;

        let result = fetcher(&server)
            .fetch("삼성전자", chrono::Duration::hours(1))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_malformed_payload_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rss/search");
                then.status(200).body("<html>not a feed</html>");
            })
            .await;

        let result = fetcher(&server)
            .fetch("삼성전자", chrono::Duration::hours(1))
            .await;
        assert!(result.is_err());
    }
}
