mod article_extractor;
mod export;
mod summary;

pub use article_extractor::ArticleExtractor;
pub use export::export_saved;
pub use summary::{SummaryOutcome, SummaryService};
