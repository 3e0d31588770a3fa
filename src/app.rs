use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::ai::Summarizer;
use crate::config::{
    parse_keywords, Config, MAX_REFRESH_INTERVAL_MINUTES, MIN_REFRESH_INTERVAL_MINUTES,
};
use crate::db::{SavedNewsStore, SeenTitleStore};
use crate::error::Result;
use crate::feed::{FeedFetcher, FeedSource};
use crate::models::{
    ArticleSummary, ExtractedArticle, NewsItem, RefreshOutcome, SavedNews, SummaryStatus,
};
use crate::pipeline::{DedupPipeline, RefreshOptions};
use crate::scheduler::RefreshScheduler;
use crate::services::{export_saved, ArticleExtractor, SummaryOutcome, SummaryService};
use crate::tui::AppAction;

const INTERVAL_STEP_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    News,
    Saved,
    Summary,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::News => Tab::Saved,
            Tab::Saved => Tab::Summary,
            Tab::Summary => Tab::News,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::News => 0,
            Tab::Saved => 1,
            Tab::Summary => 2,
        }
    }
}

// Message for completed summary
pub struct SummaryResult {
    pub link: String,
    pub outcome: SummaryOutcome,
}

pub struct App {
    // Data
    pub config: Config,
    pub outcome: Option<RefreshOutcome>,
    pub saved: Vec<SavedNews>,

    // UI State
    pub tab: Tab,
    pub news_index: usize,
    pub saved_index: usize,
    pub marked: HashSet<i64>,
    pub show_help: bool,
    pub keyword_input_active: bool,
    pub keyword_input: String,
    pub message: Option<String>,
    config_path: PathBuf,

    // Summary state
    pub summary_status: SummaryStatus,
    pub summary_item: Option<NewsItem>,
    pub summary: Option<ArticleSummary>,
    pub summary_article: Option<ExtractedArticle>,
    pub summary_error: Option<(String, String)>,
    summary_rx: mpsc::Receiver<SummaryResult>,
    summary_tx: mpsc::Sender<SummaryResult>,

    // Refresh state
    pub is_refreshing: bool,
    refresh_rx: mpsc::Receiver<RefreshOutcome>,
    refresh_tx: mpsc::Sender<RefreshOutcome>,
    tick_rx: mpsc::Receiver<()>,
    scheduler: RefreshScheduler,

    // Services
    store: SavedNewsStore,
    history: Arc<SeenTitleStore>,
    pipeline: Arc<DedupPipeline<Arc<dyn FeedSource>>>,
    summaries: Arc<SummaryService>,
}

impl App {
    pub async fn new(config: Config, config_path: PathBuf) -> Result<Self> {
        let source = Arc::new(FeedFetcher::new(&config)?);
        Self::with_source(config, config_path, source).await
    }

    pub async fn with_source(
        config: Config,
        config_path: PathBuf,
        source: Arc<dyn FeedSource>,
    ) -> Result<Self> {
        let store = SavedNewsStore::open(&config.db_path).await?;
        let history = Arc::new(SeenTitleStore::new(&config.history_path));
        let pipeline = Arc::new(DedupPipeline::new(source, Arc::clone(&history)));

        let summarizer = match &config.gemini_api_key {
            Some(key) if !key.trim().is_empty() => {
                Some(Summarizer::new(key.clone(), config.gemini_model.clone())?)
            }
            _ => None,
        };
        let summaries = Arc::new(SummaryService::new(
            ArticleExtractor::new(&config)?,
            summarizer,
        ));

        let saved = store.list_all().await?;

        let (summary_tx, summary_rx) = mpsc::channel(1);
        let (refresh_tx, refresh_rx) = mpsc::channel(1);
        let (tick_tx, tick_rx) = mpsc::channel(1);

        let mut scheduler = RefreshScheduler::new(config.refresh_interval(), tick_tx);
        if config.auto_refresh {
            scheduler.start();
        }

        Ok(Self {
            config,
            outcome: None,
            saved,
            tab: Tab::News,
            news_index: 0,
            saved_index: 0,
            marked: HashSet::new(),
            show_help: false,
            keyword_input_active: false,
            keyword_input: String::new(),
            message: None,
            config_path,
            summary_status: SummaryStatus::NotRequested,
            summary_item: None,
            summary: None,
            summary_article: None,
            summary_error: None,
            summary_rx,
            summary_tx,
            is_refreshing: false,
            refresh_rx,
            refresh_tx,
            tick_rx,
            scheduler,
            store,
            history,
            pipeline,
            summaries,
        })
    }

    pub fn news_items(&self) -> Vec<&NewsItem> {
        self.outcome
            .as_ref()
            .map(|o| o.items().collect())
            .unwrap_or_default()
    }

    pub fn selected_news(&self) -> Option<&NewsItem> {
        self.outcome.as_ref()?.items().nth(self.news_index)
    }

    pub fn selected_saved(&self) -> Option<&SavedNews> {
        self.saved.get(self.saved_index)
    }

    pub fn auto_refresh_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn auto_refresh_minutes(&self) -> u64 {
        self.scheduler.interval().as_secs() / 60
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        match action {
            AppAction::Quit => return Ok(true),

            AppAction::NextTab => {
                self.tab = self.tab.next();
            }

            AppAction::MoveUp => match self.tab {
                Tab::News => self.news_index = self.news_index.saturating_sub(1),
                Tab::Saved => self.saved_index = self.saved_index.saturating_sub(1),
                Tab::Summary => {}
            },

            AppAction::MoveDown => match self.tab {
                Tab::News => {
                    let len = self.news_items().len();
                    if self.news_index + 1 < len {
                        self.news_index += 1;
                    }
                }
                Tab::Saved => {
                    if self.saved_index + 1 < self.saved.len() {
                        self.saved_index += 1;
                    }
                }
                Tab::Summary => {}
            },

            AppAction::Summarize => {
                self.request_summary();
            }

            AppAction::SaveItem => {
                self.save_selected().await;
            }

            AppAction::ToggleMark => {
                if let Some(id) = self.selected_saved().map(|s| s.id) {
                    if !self.marked.remove(&id) {
                        self.marked.insert(id);
                    }
                }
            }

            AppAction::DeleteSaved => {
                self.delete_saved().await;
            }

            AppAction::RefreshNow => {
                self.start_refresh();
            }

            AppAction::ToggleAutoRefresh => {
                self.set_auto_refresh(!self.config.auto_refresh);
            }

            AppAction::IncreaseInterval => {
                self.change_interval(INTERVAL_STEP_MINUTES as i32);
            }

            AppAction::DecreaseInterval => {
                self.change_interval(-(INTERVAL_STEP_MINUTES as i32));
            }

            AppAction::EditKeywords => {
                self.keyword_input_active = true;
                self.keyword_input = self.config.keywords.join(", ");
            }

            AppAction::ResetHistory => {
                self.reset_history();
            }

            AppAction::ExportSaved => {
                self.export(&Config::export_path());
            }

            AppAction::OpenInBrowser => {
                let link = match self.tab {
                    Tab::News => self.selected_news().map(|n| n.link.clone()),
                    Tab::Saved => self.selected_saved().map(|s| s.link.clone()),
                    Tab::Summary => self
                        .summary_article
                        .as_ref()
                        .map(|a| a.resolved_url.clone())
                        .or_else(|| self.summary_item.as_ref().map(|n| n.link.clone())),
                };
                if let Some(link) = link {
                    if let Err(e) = open::that(&link) {
                        tracing::warn!("Failed to open {}: {}", link, e);
                    }
                }
            }

            AppAction::DismissMessage => {
                self.message = None;
                self.summary_error = None;
            }

            AppAction::ShowHelp => {
                self.show_help = true;
            }

            AppAction::HideHelp => {
                self.show_help = false;
            }

            AppAction::KeywordInputChar(c) => {
                self.keyword_input.push(c);
            }

            AppAction::KeywordInputBackspace => {
                self.keyword_input.pop();
            }

            AppAction::KeywordInputConfirm => {
                let input = std::mem::take(&mut self.keyword_input);
                self.keyword_input_active = false;
                self.apply_keywords(&input);
            }

            AppAction::KeywordInputCancel => {
                self.keyword_input_active = false;
                self.keyword_input.clear();
            }
        }

        Ok(false)
    }

    /// Start a refresh in the background unless one is already running.
    pub fn start_refresh(&mut self) {
        if self.is_refreshing {
            return;
        }
        self.is_refreshing = true;

        let pipeline = Arc::clone(&self.pipeline);
        let keywords = self.config.keywords.clone();
        let options = RefreshOptions::from_config(&self.config);
        let tx = self.refresh_tx.clone();

        tokio::spawn(async move {
            let outcome = pipeline.refresh(&keywords, &options).await;
            let _ = tx.send(outcome).await;
        });
    }

    /// Run a refresh to completion on the current task.
    pub async fn refresh_blocking(&mut self) -> &RefreshOutcome {
        let options = RefreshOptions::from_config(&self.config);
        let outcome = self.pipeline.refresh(&self.config.keywords, &options).await;
        self.apply_refresh(outcome)
    }

    fn apply_refresh(&mut self, outcome: RefreshOutcome) -> &RefreshOutcome {
        for error in &outcome.errors {
            tracing::warn!("{}", error);
        }
        let len = outcome.total_items();
        if self.news_index >= len {
            self.news_index = len.saturating_sub(1);
        }
        self.outcome.insert(outcome)
    }

    /// Poll for completed refresh results (non-blocking)
    pub fn poll_refresh_result(&mut self) {
        if let Ok(outcome) = self.refresh_rx.try_recv() {
            self.is_refreshing = false;
            self.apply_refresh(outcome);
        }
    }

    /// Poll for scheduler ticks (non-blocking)
    pub fn poll_refresh_tick(&mut self) {
        if self.tick_rx.try_recv().is_ok() {
            self.start_refresh();
        }
    }

    fn request_summary(&mut self) {
        let Some(item) = self.selected_news().cloned() else {
            return;
        };

        self.tab = Tab::Summary;
        self.summary = None;
        self.summary_article = None;
        self.summary_error = None;

        if !self.summaries.has_summarizer() {
            self.summary_item = Some(item);
            self.summary_status = SummaryStatus::NoApiKey;
            return;
        }

        self.summary_status = SummaryStatus::Generating;
        let link = item.link.clone();
        self.summary_item = Some(item);

        let summaries = Arc::clone(&self.summaries);
        let tx = self.summary_tx.clone();

        tokio::spawn(async move {
            let outcome = summaries.summarize_article(&link).await;
            let _ = tx.send(SummaryResult { link, outcome }).await;
        });
    }

    /// Poll for completed summary results (non-blocking)
    pub fn poll_summary_result(&mut self) {
        let Ok(result) = self.summary_rx.try_recv() else {
            return;
        };

        // Only process if this is the summary we're waiting for
        if self.summary_item.as_ref().map(|i| i.link.as_str()) != Some(result.link.as_str()) {
            return;
        }

        match result.outcome {
            SummaryOutcome::Generated { article, summary } => {
                self.summary_article = Some(article);
                self.summary = Some(summary);
                self.summary_status = SummaryStatus::Generated;
            }
            SummaryOutcome::TooShort(article) => {
                self.summary_article = Some(article);
                self.summary_status = SummaryStatus::TooShort;
            }
            SummaryOutcome::Failed { message, detail } => {
                self.summary_error = Some((message, detail));
                self.summary_status = SummaryStatus::Failed;
            }
        }
    }

    async fn save_selected(&mut self) {
        let Some(item) = self.selected_news().cloned() else {
            return;
        };

        match self
            .store
            .save(&item.keyword, &item.title, &item.link, &item.published_raw)
            .await
        {
            Ok(true) => {
                self.message = Some(format!("Saved: {}", item.title));
                self.reload_saved().await;
            }
            Ok(false) => {
                self.message = Some("Already saved".to_string());
            }
            Err(e) => {
                tracing::error!("Failed to save item: {}", e);
                self.message = Some(format!("Save failed: {e}"));
            }
        }
    }

    /// Delete marked items, or the selected one when nothing is marked.
    async fn delete_saved(&mut self) {
        let ids: Vec<i64> = if self.marked.is_empty() {
            self.selected_saved().map(|s| s.id).into_iter().collect()
        } else {
            self.marked.iter().copied().collect()
        };
        if ids.is_empty() {
            return;
        }

        match self.store.delete(&ids).await {
            Ok(removed) => {
                self.message = Some(format!("Deleted {removed} saved items"));
                self.marked.clear();
                self.reload_saved().await;
            }
            Err(e) => {
                tracing::error!("Failed to delete saved items: {}", e);
                self.message = Some(format!("Delete failed: {e}"));
            }
        }
    }

    async fn reload_saved(&mut self) {
        match self.store.list_all().await {
            Ok(saved) => {
                self.saved = saved;
                if self.saved_index >= self.saved.len() {
                    self.saved_index = self.saved.len().saturating_sub(1);
                }
            }
            Err(e) => {
                tracing::error!("Failed to load saved items: {}", e);
            }
        }
    }

    fn set_auto_refresh(&mut self, enabled: bool) {
        self.config.auto_refresh = enabled;
        if enabled {
            self.scheduler.start();
        } else {
            self.scheduler.stop();
        }
        self.persist_config();
    }

    fn change_interval(&mut self, delta_minutes: i32) {
        let current = self.config.refresh_interval_minutes as i32;
        let next = (current + delta_minutes).clamp(
            MIN_REFRESH_INTERVAL_MINUTES as i32,
            MAX_REFRESH_INTERVAL_MINUTES as i32,
        );
        self.config.refresh_interval_minutes = next as u32;
        self.scheduler.set_interval(self.config.refresh_interval());
        self.persist_config();
    }

    fn apply_keywords(&mut self, input: &str) {
        let keywords = parse_keywords(input);
        if keywords.is_empty() {
            self.message = Some("Keyword list cannot be empty".to_string());
            return;
        }
        self.config.keywords = keywords;
        self.news_index = 0;
        self.persist_config();
        self.start_refresh();
    }

    pub fn reset_history(&mut self) {
        match self.history.reset() {
            Ok(()) => {
                self.message = Some(format!(
                    "Seen-title history cleared ({})",
                    self.history.path().display()
                ));
            }
            Err(e) => {
                tracing::error!("Failed to reset history: {}", e);
                self.message = Some(format!("Reset failed: {e}"));
            }
        }
    }

    pub fn export(&mut self, path: &Path) {
        match export_saved(&self.saved, path) {
            Ok(count) => {
                self.message = Some(format!("Exported {count} items to {}", path.display()));
            }
            Err(e) => {
                tracing::error!("Failed to export saved items: {}", e);
                self.message = Some(format!("Export failed: {e}"));
            }
        }
    }

    fn persist_config(&mut self) {
        if let Err(e) = self.config.save_to(&self.config_path) {
            tracing::error!("Failed to save config: {}", e);
            self.message = Some(format!("Could not save settings: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{Local, Utc};

    use crate::models::{FeedEntry, KeywordGroup};

    /// Serves one fresh headline per keyword and counts fetches.
    #[derive(Default)]
    struct StubSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FeedSource for StubSource {
        async fn fetch(&self, keyword: &str, _window: chrono::Duration) -> Result<Vec<FeedEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![FeedEntry {
                title: format!("{keyword} headline"),
                link: format!("https://news.example.com/{keyword}"),
                published: Utc::now().to_rfc2822(),
            }])
        }
    }

    async fn test_app(dir: &tempfile::TempDir) -> App {
        test_app_with_source(dir, Arc::new(StubSource::default())).await
    }

    async fn test_app_with_source(dir: &tempfile::TempDir, source: Arc<StubSource>) -> App {
        let config = Config {
            keywords: vec!["rust".to_string()],
            auto_refresh: false,
            db_path: dir.path().join("saved.db").to_string_lossy().to_string(),
            history_path: dir.path().join("seen.txt").to_string_lossy().to_string(),
            gemini_api_key: None,
            ..Config::default()
        };
        App::with_source(config, dir.path().join("config.toml"), source)
            .await
            .unwrap()
    }

    async fn wait_for_refresh(app: &mut App) {
        for _ in 0..200 {
            app.poll_refresh_result();
            if !app.is_refreshing {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("refresh did not complete");
    }

    fn item(keyword: &str, title: &str) -> NewsItem {
        NewsItem {
            keyword: keyword.to_string(),
            title: title.to_string(),
            link: format!("https://news.example.com/{title}"),
            published_raw: "Sat, 17 Oct 2026 01:00:00 +0000".to_string(),
            published_display: "2026-10-17 10:00".to_string(),
            is_new: true,
        }
    }

    fn outcome(items: Vec<NewsItem>) -> RefreshOutcome {
        RefreshOutcome {
            new_count: items.len(),
            groups: vec![KeywordGroup {
                keyword: "rust".to_string(),
                items,
            }],
            errors: Vec::new(),
            refreshed_at: Local::now(),
        }
    }

    #[tokio::test]
    async fn test_save_then_save_again_reports_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.apply_refresh(outcome(vec![item("rust", "rust 1.90")]));

        app.handle_action(AppAction::SaveItem).await.unwrap();
        assert_eq!(app.saved.len(), 1);
        assert_eq!(app.saved[0].pub_date, "Sat, 17 Oct 2026 01:00:00 +0000");

        app.handle_action(AppAction::SaveItem).await.unwrap();
        assert_eq!(app.saved.len(), 1);
        assert_eq!(app.message.as_deref(), Some("Already saved"));
    }

    #[tokio::test]
    async fn test_bulk_delete_marked_items() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.apply_refresh(outcome(vec![
            item("rust", "rust a"),
            item("rust", "rust b"),
            item("rust", "rust c"),
        ]));
        for _ in 0..3 {
            app.handle_action(AppAction::SaveItem).await.unwrap();
            app.handle_action(AppAction::MoveDown).await.unwrap();
        }
        assert_eq!(app.saved.len(), 3);

        app.tab = Tab::Saved;
        app.handle_action(AppAction::ToggleMark).await.unwrap();
        app.handle_action(AppAction::MoveDown).await.unwrap();
        app.handle_action(AppAction::ToggleMark).await.unwrap();
        app.handle_action(AppAction::DeleteSaved).await.unwrap();

        assert_eq!(app.saved.len(), 1);
        assert!(app.marked.is_empty());
    }

    #[tokio::test]
    async fn test_keyword_input_updates_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;

        app.handle_action(AppAction::EditKeywords).await.unwrap();
        assert_eq!(app.keyword_input, "rust");
        for c in ", tokio , rust".chars() {
            app.handle_action(AppAction::KeywordInputChar(c)).await.unwrap();
        }
        app.handle_action(AppAction::KeywordInputConfirm).await.unwrap();

        assert!(!app.keyword_input_active);
        assert_eq!(app.config.keywords, vec!["rust".to_string(), "tokio".to_string()]);
        let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
        assert!(saved.contains("tokio"));

        wait_for_refresh(&mut app).await;
        let keywords: Vec<&str> = app
            .outcome
            .as_ref()
            .unwrap()
            .groups
            .iter()
            .map(|g| g.keyword.as_str())
            .collect();
        assert_eq!(keywords, vec!["rust", "tokio"]);
    }

    #[tokio::test]
    async fn test_interval_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;

        for _ in 0..20 {
            app.handle_action(AppAction::IncreaseInterval).await.unwrap();
        }
        assert_eq!(app.config.refresh_interval_minutes, MAX_REFRESH_INTERVAL_MINUTES);

        for _ in 0..20 {
            app.handle_action(AppAction::DecreaseInterval).await.unwrap();
        }
        assert_eq!(app.config.refresh_interval_minutes, MIN_REFRESH_INTERVAL_MINUTES);
    }

    #[tokio::test]
    async fn test_toggle_auto_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        assert!(!app.auto_refresh_running());

        app.handle_action(AppAction::ToggleAutoRefresh).await.unwrap();
        assert!(app.auto_refresh_running());
        assert!(app.config.auto_refresh);

        app.handle_action(AppAction::ToggleAutoRefresh).await.unwrap();
        assert!(!app.auto_refresh_running());
    }

    #[tokio::test]
    async fn test_summary_without_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.apply_refresh(outcome(vec![item("rust", "rust a")]));

        app.handle_action(AppAction::Summarize).await.unwrap();
        assert_eq!(app.tab, Tab::Summary);
        assert_eq!(app.summary_status, SummaryStatus::NoApiKey);
        assert_eq!(app.summary_item.as_ref().unwrap().title, "rust a");
    }

    #[tokio::test]
    async fn test_reset_history_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.history.record("rust a").unwrap();

        app.handle_action(AppAction::ResetHistory).await.unwrap();
        assert!(app.history.load().is_empty());

        let path = dir.path().join("export.json");
        app.export(&path);
        assert!(path.exists());
        assert_eq!(app.message, Some(format!("Exported 0 items to {}", path.display())));
    }

    #[tokio::test]
    async fn test_selection_clamped_after_smaller_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.apply_refresh(outcome(vec![item("rust", "a"), item("rust", "b")]));
        app.handle_action(AppAction::MoveDown).await.unwrap();
        assert_eq!(app.news_index, 1);

        app.apply_refresh(outcome(vec![item("rust", "a")]));
        assert_eq!(app.news_index, 0);
        assert_eq!(app.selected_news().unwrap().title, "a");
    }

    #[tokio::test]
    async fn test_only_one_refresh_in_flight() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(StubSource::default());
        let mut app = test_app_with_source(&dir, Arc::clone(&source)).await;

        app.start_refresh();
        app.start_refresh();
        assert!(app.is_refreshing);

        wait_for_refresh(&mut app).await;
        assert!(!app.is_refreshing);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        let outcome = app.outcome.as_ref().unwrap();
        assert_eq!(outcome.new_count, 1);
        assert_eq!(outcome.groups[0].items[0].title, "rust headline");

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(app.refresh_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_scheduler_tick_starts_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(StubSource::default());
        let mut app = test_app_with_source(&dir, Arc::clone(&source)).await;

        let (tick_tx, tick_rx) = mpsc::channel(1);
        app.tick_rx = tick_rx;

        app.poll_refresh_tick();
        assert!(!app.is_refreshing);

        tick_tx.send(()).await.unwrap();
        app.poll_refresh_tick();
        assert!(app.is_refreshing);

        wait_for_refresh(&mut app).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(app.outcome.is_some());
    }

    #[tokio::test]
    async fn test_stale_summary_result_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir).await;
        app.summary_item = Some(item("rust", "rust b"));
        app.summary_status = SummaryStatus::Generating;

        app.summary_tx
            .send(SummaryResult {
                link: item("rust", "rust a").link,
                outcome: SummaryOutcome::Failed {
                    message: "Summarization failed".to_string(),
                    detail: "boom".to_string(),
                },
            })
            .await
            .unwrap();
        app.poll_summary_result();

        assert_eq!(app.summary_status, SummaryStatus::Generating);
        assert!(app.summary_error.is_none());

        app.summary_tx
            .send(SummaryResult {
                link: item("rust", "rust b").link,
                outcome: SummaryOutcome::Failed {
                    message: "Summarization failed".to_string(),
                    detail: "boom".to_string(),
                },
            })
            .await
            .unwrap();
        app.poll_summary_result();

        assert_eq!(app.summary_status, SummaryStatus::Failed);
        assert_eq!(
            app.summary_error,
            Some(("Summarization failed".to_string(), "boom".to_string()))
        );
    }
}
