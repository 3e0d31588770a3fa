use chrono::Utc;

use crate::ai::Summarizer;
use crate::models::{ArticleSummary, ExtractedArticle};

use super::article_extractor::ArticleExtractor;

/// Bodies shorter than this are shown as-is instead of summarized.
pub const MIN_ARTICLE_CHARS: usize = 50;

#[derive(Debug, Clone)]
pub enum SummaryOutcome {
    Generated {
        article: ExtractedArticle,
        summary: ArticleSummary,
    },
    TooShort(ExtractedArticle),
    Failed {
        message: String,
        detail: String,
    },
}

pub struct SummaryService {
    extractor: ArticleExtractor,
    summarizer: Option<Summarizer>,
}

impl SummaryService {
    pub fn new(extractor: ArticleExtractor, summarizer: Option<Summarizer>) -> Self {
        Self {
            extractor,
            summarizer,
        }
    }

    pub fn has_summarizer(&self) -> bool {
        self.summarizer.is_some()
    }

    /// Never fails: every error becomes `SummaryOutcome::Failed`.
    pub async fn summarize_article(&self, link: &str) -> SummaryOutcome {
        let Some(summarizer) = &self.summarizer else {
            return SummaryOutcome::Failed {
                message: "Summarization unavailable".to_string(),
                detail: "gemini_api_key is not configured".to_string(),
            };
        };

        let resolved = self.extractor.resolve_link(link).await;
        let article = match self.extractor.extract(&resolved).await {
            Ok(article) => article,
            Err(e) => {
                tracing::warn!("Failed to extract {}: {}", resolved, e);
                return SummaryOutcome::Failed {
                    message: "Could not download the article".to_string(),
                    detail: e.to_string(),
                };
            }
        };

        if article.text.chars().count() < MIN_ARTICLE_CHARS {
            return SummaryOutcome::TooShort(article);
        }

        match summarizer.generate_summary(&article.text).await {
            Ok(content) => SummaryOutcome::Generated {
                summary: ArticleSummary {
                    link: link.to_string(),
                    content,
                    model_version: summarizer.model_version().to_string(),
                    generated_at: Utc::now(),
                },
                article,
            },
            Err(e) => {
                tracing::error!("Failed to generate summary: {}", e);
                SummaryOutcome::Failed {
                    message: "Summarization failed".to_string(),
                    detail: e.to_string(),
                }
            }
        }
    }
}
