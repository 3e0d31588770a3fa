mod fetcher;
mod query;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::FeedEntry;

pub use fetcher::FeedFetcher;

/// Where candidate items for a keyword come from.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, keyword: &str, window: chrono::Duration) -> Result<Vec<FeedEntry>>;
}

#[async_trait]
impl<T: FeedSource + ?Sized> FeedSource for Arc<T> {
    async fn fetch(&self, keyword: &str, window: chrono::Duration) -> Result<Vec<FeedEntry>> {
        (**self).fetch(keyword, window).await
    }
}
