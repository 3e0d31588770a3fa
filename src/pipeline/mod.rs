mod dedup;
mod freshness;

pub use dedup::{DedupPipeline, RefreshOptions};
