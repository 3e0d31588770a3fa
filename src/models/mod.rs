mod news;
mod summary;

pub use news::{
    FeedEntry, KeywordGroup, NewsItem, RefreshError, RefreshOutcome, RefreshStatus,
    RelevanceMode, SavedNews,
};
pub use summary::{ArticleSummary, ExtractedArticle, SummaryStatus};
