use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub resolved_url: String,
    pub text: String,
    pub top_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub link: String,
    pub content: String,
    pub model_version: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryStatus {
    #[default]
    NotRequested,
    Generating,
    Generated,
    TooShort,
    Failed,
    NoApiKey,
}
