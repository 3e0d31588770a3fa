use chrono::{Local, NaiveDateTime};
use rusqlite::{params, params_from_iter, Row};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::SavedNews;

use super::schema::{SAVED_AT_FORMAT, SCHEMA};

/// User-curated news items. All writes go through the single connection
/// thread owned by `tokio_rusqlite`, so the existence check and the insert
/// in `save` cannot interleave with another caller.
pub struct SavedNewsStore {
    conn: Connection,
}

impl SavedNewsStore {
    pub async fn open(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;
        let store = Self { conn };
        store.initialize().await?;
        Ok(store)
    }

    pub async fn initialize(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    /// Insert unless an item with the same title and link is already saved.
    /// Returns whether a row was written.
    pub async fn save(
        &self,
        keyword: &str,
        title: &str,
        link: &str,
        pub_date: &str,
    ) -> Result<bool> {
        self.save_at(keyword, title, link, pub_date, Local::now().naive_local())
            .await
    }

    async fn save_at(
        &self,
        keyword: &str,
        title: &str,
        link: &str,
        pub_date: &str,
        saved_at: NaiveDateTime,
    ) -> Result<bool> {
        let keyword = keyword.to_string();
        let title = title.to_string();
        let link = link.to_string();
        let pub_date = pub_date.to_string();
        let saved_at = saved_at.format(SAVED_AT_FORMAT).to_string();

        let inserted = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let exists: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM saved_news WHERE title = ?1 AND link = ?2)",
                    params![title, link],
                    |row| row.get(0),
                )?;
                if exists {
                    return Ok(false);
                }
                tx.execute(
                    "INSERT INTO saved_news (keyword, title, link, pub_date, saved_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![keyword, title, link, pub_date, saved_at],
                )?;
                tx.commit()?;
                Ok(true)
            })
            .await?;
        Ok(inserted)
    }

    /// Most recent save first; equal timestamps keep insertion order.
    pub async fn list_all(&self) -> Result<Vec<SavedNews>> {
        let items = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, keyword, title, link, pub_date, saved_at FROM saved_news ORDER BY saved_at DESC, id ASC",
                )?;
                let items = stmt
                    .query_map([], saved_news_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(items)
            })
            .await?;
        Ok(items)
    }

    /// Remove the given ids. Unknown ids are ignored. Returns the number of
    /// rows actually removed.
    pub async fn delete(&self, ids: &[i64]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let ids = ids.to_vec();
        let removed = self
            .conn
            .call(move |conn| {
                let placeholders = vec!["?"; ids.len()].join(", ");
                let sql = format!("DELETE FROM saved_news WHERE id IN ({placeholders})");
                let removed = conn.execute(&sql, params_from_iter(ids.iter()))?;
                Ok(removed)
            })
            .await?;
        Ok(removed)
    }
}

fn parse_saved_at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, SAVED_AT_FORMAT).unwrap_or_default()
}

fn saved_news_from_row(row: &Row) -> rusqlite::Result<SavedNews> {
    Ok(SavedNews {
        id: row.get(0)?,
        keyword: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        link: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        pub_date: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        saved_at: row
            .get::<_, Option<String>>(5)?
            .map(|s| parse_saved_at(&s))
            .unwrap_or_default(),
    })
}
