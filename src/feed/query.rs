use chrono::Duration;

pub const GOOGLE_NEWS_SEARCH_URL: &str = "https://news.google.com/rss/search";

/// Builds provider search URLs for a keyword.
#[derive(Debug, Clone)]
pub struct FeedQuery {
    base_url: String,
    language: String,
    region: String,
}

impl FeedQuery {
    pub fn new(language: &str, region: &str) -> Self {
        Self {
            base_url: GOOGLE_NEWS_SEARCH_URL.to_string(),
            language: language.to_string(),
            region: region.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn url_for(&self, keyword: &str, window: Duration) -> String {
        let query = format!("{} {}", keyword.trim(), recency_hint(window));
        format!(
            "{}?q={}&hl={}&gl={}&ceid={}:{}",
            self.base_url,
            urlencoding::encode(&query),
            self.language,
            self.region,
            self.region,
            self.language
        )
    }
}

/// Provider side age hint, rounded up to whole hours.
pub fn recency_hint(window: Duration) -> String {
    let seconds = window.num_seconds().max(1);
    let hours = (seconds + 3599) / 3600;
    format!("when:{hours}h")
}
