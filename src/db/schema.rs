pub const SCHEMA: &str = r#"
-- saved_news table
CREATE TABLE IF NOT EXISTS saved_news (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    keyword TEXT,
    title TEXT,
    link TEXT,
    pub_date TEXT,
    saved_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_saved_news_title_link ON saved_news(title, link);
CREATE INDEX IF NOT EXISTS idx_saved_news_saved_at ON saved_news(saved_at DESC);
"#;

/// Format of the `saved_at` column.
pub const SAVED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
