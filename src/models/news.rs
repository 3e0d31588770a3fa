use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A raw entry as returned by the feed transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// RFC 2822 publication date, empty when the feed gave none.
    pub published: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub keyword: String,
    pub title: String,
    pub link: String,
    pub published_raw: String,
    pub published_display: String,
    /// First time this title was seen, in this refresh.
    pub is_new: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordGroup {
    pub keyword: String,
    pub items: Vec<NewsItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshError {
    Fetch { keyword: String, message: String },
    History { title: String, message: String },
}

impl std::fmt::Display for RefreshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshError::Fetch { keyword, message } => {
                write!(f, "fetch failed for '{keyword}': {message}")
            }
            RefreshError::History { title, message } => {
                write!(f, "could not record '{title}': {message}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    NewItems(usize),
    NoNewItems,
    NothingFound,
}

/// Result of one refresh cycle. Groups keep the keyword order they were
/// requested in; keywords with nothing fresh still get an empty group.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub groups: Vec<KeywordGroup>,
    pub new_count: usize,
    pub errors: Vec<RefreshError>,
    pub refreshed_at: DateTime<Local>,
}

impl RefreshOutcome {
    pub fn total_items(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn items(&self) -> impl Iterator<Item = &NewsItem> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    pub fn status(&self) -> RefreshStatus {
        if self.new_count > 0 {
            RefreshStatus::NewItems(self.new_count)
        } else if self.total_items() > 0 {
            RefreshStatus::NoNewItems
        } else {
            RefreshStatus::NothingFound
        }
    }

    pub fn status_line(&self) -> String {
        let at = self.refreshed_at.format("%Y-%m-%d %H:%M:%S");
        let mut line = match self.status() {
            RefreshStatus::NewItems(n) => format!("Updated ({at}): {n} new items"),
            RefreshStatus::NoNewItems => format!("Updated ({at}): no new items"),
            RefreshStatus::NothingFound => format!("Updated ({at}): no items found"),
        };
        let failed = self
            .errors
            .iter()
            .filter(|e| matches!(e, RefreshError::Fetch { .. }))
            .count();
        if failed > 0 {
            line.push_str(&format!(" ({failed} keywords failed)"));
        }
        line
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceMode {
    #[default]
    CaseInsensitive,
    CaseSensitive,
}

impl RelevanceMode {
    pub fn matches(self, title: &str, keyword: &str) -> bool {
        match self {
            RelevanceMode::CaseSensitive => title.contains(keyword),
            RelevanceMode::CaseInsensitive => {
                title.to_lowercase().contains(&keyword.to_lowercase())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedNews {
    pub id: i64,
    pub keyword: String,
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub saved_at: NaiveDateTime,
}
