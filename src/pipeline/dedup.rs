use std::sync::Arc;

use chrono::{DateTime, Duration, Local, Utc};

use crate::config::Config;
use crate::db::{normalize_title, SeenTitleStore};
use crate::feed::FeedSource;
use crate::models::{KeywordGroup, NewsItem, RefreshError, RefreshOutcome, RelevanceMode};

use super::freshness::{display_date, FreshnessFilter};

#[derive(Debug, Clone, Copy)]
pub struct RefreshOptions {
    pub window: Duration,
    pub grace_percent: u32,
    pub relevance: RelevanceMode,
    pub display_offset_hours: i32,
}

impl RefreshOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            window: config.recency_window(),
            grace_percent: config.freshness_grace_percent,
            relevance: config.relevance,
            display_offset_hours: config.display_utc_offset_hours,
        }
    }
}

/// Fetches each keyword, keeps fresh and relevant items, and splits them
/// into new and already seen against the title history.
pub struct DedupPipeline<S> {
    source: S,
    history: Arc<SeenTitleStore>,
}

impl<S: FeedSource> DedupPipeline<S> {
    pub fn new(source: S, history: Arc<SeenTitleStore>) -> Self {
        Self { source, history }
    }

    pub async fn refresh(&self, keywords: &[String], options: &RefreshOptions) -> RefreshOutcome {
        self.refresh_at(keywords, options, Utc::now()).await
    }

    pub async fn refresh_at(
        &self,
        keywords: &[String],
        options: &RefreshOptions,
        now: DateTime<Utc>,
    ) -> RefreshOutcome {
        let filter = FreshnessFilter::new(options.window, options.grace_percent);
        let mut seen = self.history.load();
        let mut groups: Vec<KeywordGroup> = Vec::new();
        let mut errors = Vec::new();
        let mut new_count = 0;

        for keyword in keywords.iter().map(|k| k.trim()) {
            if keyword.is_empty() || groups.iter().any(|g| g.keyword == keyword) {
                continue;
            }

            let mut group = KeywordGroup {
                keyword: keyword.to_string(),
                items: Vec::new(),
            };

            let entries = match self.source.fetch(keyword, filter.window()).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(keyword = %keyword, "Fetch failed: {}", e);
                    errors.push(RefreshError::Fetch {
                        keyword: keyword.to_string(),
                        message: e.to_string(),
                    });
                    groups.push(group);
                    continue;
                }
            };

            let fetched = entries.len();
            for entry in entries {
                if !filter.is_within_window(&entry.published, now) {
                    tracing::debug!(keyword = %keyword, "Stale or undated: {}", entry.title);
                    continue;
                }

                let title = normalize_title(&entry.title);
                if !options.relevance.matches(&title, keyword) {
                    tracing::debug!(keyword = %keyword, "Irrelevant: {}", title);
                    continue;
                }

                let is_new = !seen.contains(&title);
                if is_new {
                    new_count += 1;
                    if let Err(e) = self.history.record(&title) {
                        tracing::error!("Failed to record seen title: {}", e);
                        errors.push(RefreshError::History {
                            title: title.clone(),
                            message: e.to_string(),
                        });
                    }
                    seen.insert(title.clone());
                }

                group.items.push(NewsItem {
                    keyword: keyword.to_string(),
                    published_display: display_date(&entry.published, options.display_offset_hours),
                    published_raw: entry.published,
                    title,
                    link: entry.link,
                    is_new,
                });
            }

            tracing::debug!(
                keyword = %keyword,
                fetched,
                kept = group.items.len(),
                "Keyword processed"
            );
            groups.push(group);
        }

        tracing::info!(new_count, failed = errors.len(), "Refresh finished");

        RefreshOutcome {
            groups,
            new_count,
            errors,
            refreshed_at: Local::now(),
        }
    }
}
