use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::RelevanceMode;

const APP_DIR: &str = "news-watch";

pub const MIN_REFRESH_INTERVAL_MINUTES: u32 = 5;
pub const MAX_REFRESH_INTERVAL_MINUTES: u32 = 60;

/// Extra tolerance on top of the recency window, in percent of the window.
/// A 60 minute window with 5% grace accepts items up to 63 minutes old.
pub const DEFAULT_GRACE_PERCENT: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    #[serde(default = "default_true")]
    pub auto_refresh: bool,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_minutes: u32,

    #[serde(default = "default_recency_window")]
    pub recency_window_minutes: u32,

    #[serde(default = "default_grace_percent")]
    pub freshness_grace_percent: u32,

    #[serde(default)]
    pub relevance: RelevanceMode,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default = "default_display_offset")]
    pub display_utc_offset_hours: i32,

    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default = "default_history_path")]
    pub history_path: String,

    pub gemini_api_key: Option<String>,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn data_dir() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR);
    std::fs::create_dir_all(&data_dir).ok();
    data_dir
}

fn default_db_path() -> String {
    data_dir()
        .join("saved_news.db")
        .to_string_lossy()
        .to_string()
}

fn default_history_path() -> String {
    data_dir()
        .join("seen_titles.txt")
        .to_string_lossy()
        .to_string()
}

fn default_keywords() -> Vec<String> {
    vec!["삼성전자".to_string(), "SK하이닉스".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_refresh_interval() -> u32 {
    15
}

fn default_recency_window() -> u32 {
    60
}

fn default_grace_percent() -> u32 {
    DEFAULT_GRACE_PERCENT
}

fn default_language() -> String {
    "ko".to_string()
}

fn default_region() -> String {
    "KR".to_string()
}

fn default_display_offset() -> i32 {
    9
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            auto_refresh: true,
            refresh_interval_minutes: default_refresh_interval(),
            recency_window_minutes: default_recency_window(),
            freshness_grace_percent: default_grace_percent(),
            relevance: RelevanceMode::default(),
            language: default_language(),
            region: default_region(),
            display_utc_offset_hours: default_display_offset(),
            db_path: default_db_path(),
            history_path: default_history_path(),
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            accept_invalid_certs: true,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    pub fn export_path() -> PathBuf {
        data_dir().join("saved_news_export.json")
    }

    pub fn refresh_interval(&self) -> std::time::Duration {
        let minutes = self
            .refresh_interval_minutes
            .clamp(MIN_REFRESH_INTERVAL_MINUTES, MAX_REFRESH_INTERVAL_MINUTES);
        std::time::Duration::from_secs(u64::from(minutes) * 60)
    }

    pub fn recency_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.recency_window_minutes.max(1)))
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Split a comma separated keyword list, trimming entries and dropping
/// blanks and repeats (first occurrence wins).
pub fn parse_keywords(input: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for keyword in input.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        if !keywords.iter().any(|k| k == keyword) {
            keywords.push(keyword.to_string());
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords_trims_and_drops_blanks() {
        assert_eq!(
            parse_keywords(" 삼성전자 , ,SK하이닉스,,  "),
            vec!["삼성전자".to_string(), "SK하이닉스".to_string()]
        );
        assert!(parse_keywords("  ,  ").is_empty());
    }

    #[test]
    fn test_parse_keywords_drops_repeats() {
        assert_eq!(
            parse_keywords("rust, go, rust"),
            vec!["rust".to_string(), "go".to_string()]
        );
    }

    #[test]
    fn test_refresh_interval_is_clamped() {
        let mut config = Config {
            refresh_interval_minutes: 1,
            ..Config::default()
        };
        assert_eq!(config.refresh_interval().as_secs(), 5 * 60);

        config.refresh_interval_minutes = 600;
        assert_eq!(config.refresh_interval().as_secs(), 60 * 60);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("keywords = [\"rust\"]").unwrap();
        assert_eq!(config.keywords, vec!["rust".to_string()]);
        assert!(config.auto_refresh);
        assert_eq!(config.recency_window_minutes, 60);
        assert_eq!(config.freshness_grace_percent, DEFAULT_GRACE_PERCENT);
        assert_eq!(config.relevance, RelevanceMode::CaseInsensitive);
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_save_to_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            keywords: vec!["rust".to_string(), "tokio".to_string()],
            auto_refresh: false,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.keywords, config.keywords);
        assert!(!loaded.auto_refresh);
    }

    #[test]
    fn test_relevance_mode_round_trips_through_toml() {
        let config: Config = toml::from_str("relevance = \"case_sensitive\"").unwrap();
        assert_eq!(config.relevance, RelevanceMode::CaseSensitive);
    }
}
