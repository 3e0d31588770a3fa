use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;

/// Append-only log of headlines already shown, one title per line.
///
/// Membership is decided by `load`, so the file may hold the same line
/// twice without harm.
pub struct SeenTitleStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

/// Titles are compared after collapsing embedded line breaks to spaces.
pub fn normalize_title(title: &str) -> String {
    title.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

impl SeenTitleStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All titles seen so far. A missing or unreadable log yields an empty set.
    pub fn load(&self) -> HashSet<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => content
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) if e.kind() == ErrorKind::NotFound => HashSet::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to read seen titles: {}", e);
                HashSet::new()
            }
        }
    }

    /// Append a title. Empty titles are rejected since `load` skips blank lines.
    pub fn record(&self, title: &str) -> Result<()> {
        let line = normalize_title(title);
        if line.is_empty() {
            return Err(anyhow::anyhow!("cannot record an empty title").into());
        }
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("seen title lock poisoned"))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    /// Drop the whole history.
    pub fn reset(&self) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("seen title lock poisoned"))?;

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, SeenTitleStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SeenTitleStore::new(dir.path().join("seen_titles.txt"));
        (dir, store)
    }

    #[test]
    fn test_load_without_history_is_empty() {
        let (_dir, store) = store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_recorded_title_is_visible() {
        let (_dir, store) = store();
        store.record("삼성전자 주가 급등").unwrap();
        store.record("SK하이닉스 신고가").unwrap();

        let seen = store.load();
        assert!(seen.contains("삼성전자 주가 급등"));
        assert!(seen.contains("SK하이닉스 신고가"));
    }

    #[test]
    fn test_newlines_are_collapsed() {
        let (_dir, store) = store();
        store.record("line one\nline two\r\nline three").unwrap();

        let seen = store.load();
        assert_eq!(seen.len(), 1);
        assert!(seen.contains("line one line two line three"));
    }

    #[test]
    fn test_matching_is_exact() {
        let (_dir, store) = store();
        store.record(" Padded Title ").unwrap();

        let seen = store.load();
        assert!(seen.contains(" Padded Title "));
        assert!(!seen.contains("Padded Title"));
        assert!(!seen.contains(" padded title "));
    }

    #[test]
    fn test_duplicate_lines_are_tolerated() {
        let (_dir, store) = store();
        store.record("same").unwrap();
        store.record("same").unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_reset_clears_history() {
        let (_dir, store) = store();
        store.record("title").unwrap();
        store.reset().unwrap();
        assert!(store.load().is_empty());

        // Resetting an absent history is fine too.
        store.reset().unwrap();
    }

    #[test]
    fn test_record_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = SeenTitleStore::new(dir.path().join("nested").join("seen.txt"));
        store.record("title").unwrap();
        assert!(store.load().contains("title"));
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let (_dir, store) = store();
        assert!(store.record("").is_err());
        assert!(!store.path().exists());

        store.record("title").unwrap();
        assert!(store.record("").is_err());
        assert_eq!(store.load().len(), 1);
    }
}
