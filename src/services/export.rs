use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::SavedNews;

#[derive(Serialize)]
struct ExportFile<'a> {
    exported_at: String,
    count: usize,
    items: &'a [SavedNews],
}

/// Write saved items as pretty JSON. Returns the number of items written.
pub fn export_saved(items: &[SavedNews], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = ExportFile {
        exported_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        count: items.len(),
        items,
    };
    let content = serde_json::to_string_pretty(&file)?;
    std::fs::write(path, content)?;
    Ok(items.len())
}
