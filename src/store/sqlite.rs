//! SQLite-backed [`MemoryStore`].
//!
//! Documents live in `memories`; their text is mirrored into the `memories_fts` FTS5
//! table under the same rowid so search can join back to the full record. Writes that
//! touch both tables run in a transaction.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{MemoryRecord, MemoryStore, Metadata};

/// Memory store over a single SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = crate::db::open_database(path)?;
        Ok(Self { conn })
    }

    /// Open a throwaway in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        let conn = crate::db::open_memory_database()?;
        Ok(Self { conn })
    }

    /// Wrap a connection whose schema is already initialized.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl MemoryStore for SqliteStore {
    fn create(
        &self,
        category: &str,
        document: &str,
        metadata: &Metadata,
        id: Option<&str>,
    ) -> Result<String> {
        let id = match id {
            Some(id) => id.to_string(),
            None => uuid::Uuid::now_v7().to_string(),
        };
        let metadata_json = serde_json::to_string(metadata)?;
        let now = chrono::Utc::now().to_rfc3339();

        let tx = self.conn.unchecked_transaction()?;

        // Same id in the same category: last write wins
        let replaced = remove_row(&tx, category, &id)?;

        tx.execute(
            "INSERT INTO memories (id, category, document, metadata, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, category, document, metadata_json, now],
        )
        .with_context(|| format!("failed to insert {category}/{id}"))?;
        let seq = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO memories_fts (rowid, document, category) VALUES (?1, ?2, ?3)",
            params![seq, document, category],
        )?;

        tx.commit()?;

        tracing::debug!(category, id = %id, replaced, "memory stored");
        Ok(id)
    }

    fn delete(&self, category: &str, id: &str) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = remove_row(&tx, category, id)?;
        tx.commit()?;
        Ok(removed)
    }

    fn get(&self, category: &str, id: &str) -> Result<Option<MemoryRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, category, document, metadata, created_at FROM memories \
                 WHERE category = ?1 AND id = ?2",
                params![category, id],
                read_row,
            )
            .optional()?;
        row.map(into_record).transpose()
    }

    fn list_recent(&self, category: &str, n: usize) -> Result<Vec<MemoryRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, document, metadata, created_at FROM memories \
             WHERE category = ?1 ORDER BY seq DESC LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![category, sql_limit(n)], read_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(into_record).collect()
    }

    fn search(&self, category: &str, query: &str, n: usize) -> Result<Vec<MemoryRecord>> {
        let escaped = escape_fts_query(query);
        if escaped.is_empty() || n == 0 {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(
            "SELECT m.id, m.category, m.document, m.metadata, m.created_at \
             FROM memories_fts JOIN memories m ON m.seq = memories_fts.rowid \
             WHERE memories_fts MATCH ?1 AND m.category = ?2 \
             ORDER BY rank LIMIT ?3",
        )?;
        let rows = stmt
            .query_map(params![escaped, category, sql_limit(n)], read_row)?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(category, query, hits = rows.len(), "fts search");
        rows.into_iter().map(into_record).collect()
    }

    fn wipe(&self, category: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM memories_fts WHERE rowid IN (SELECT seq FROM memories WHERE category = ?1)",
            params![category],
        )?;
        let removed = tx.execute("DELETE FROM memories WHERE category = ?1", params![category])?;
        tx.commit()?;

        tracing::info!(category, removed, "category wiped");
        Ok(())
    }

    fn count(&self, category: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM memories WHERE category = ?1",
            params![category],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

type RawRow = (String, String, String, String, String);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn into_record((id, category, document, metadata, created_at): RawRow) -> Result<MemoryRecord> {
    let metadata: Metadata = serde_json::from_str(&metadata)
        .with_context(|| format!("corrupt metadata on {category}/{id}"))?;
    Ok(MemoryRecord {
        id,
        category,
        document,
        metadata,
        created_at,
    })
}

/// Delete a document and its FTS row. Returns whether a row existed.
fn remove_row(conn: &Connection, category: &str, id: &str) -> Result<bool> {
    let seq: Option<i64> = conn
        .query_row(
            "SELECT seq FROM memories WHERE category = ?1 AND id = ?2",
            params![category, id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(seq) = seq else {
        return Ok(false);
    };

    conn.execute("DELETE FROM memories_fts WHERE rowid = ?1", params![seq])?;
    conn.execute("DELETE FROM memories WHERE seq = ?1", params![seq])?;
    Ok(true)
}

fn sql_limit(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Escape free text for FTS5 MATCH syntax.
///
/// Each whitespace-delimited word is quoted so punctuation cannot break the query,
/// and words are OR-joined so a document matching any of them is a candidate. BM25
/// ranks documents matching more words higher.
fn escape_fts_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(|word| word.replace('"', ""))
        .filter(|word| !word.is_empty())
        .map(|word| format!("\"{word}\""))
        .collect::<Vec<_>>()
        .join(" OR ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(value: serde_json::Value) -> Metadata {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn create_generates_time_ordered_ids() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.create("notes", "first", &Metadata::new(), None).unwrap();
        let b = store.create("notes", "second", &Metadata::new(), None).unwrap();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn create_with_existing_id_replaces_document() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .create("actions", "greet - say hi", &meta(json!({"v": 1})), Some("greet"))
            .unwrap();
        store
            .create("actions", "greet - say hello", &meta(json!({"v": 2})), Some("greet"))
            .unwrap();

        assert_eq!(store.count("actions").unwrap(), 1);
        let record = store.get("actions", "greet").unwrap().unwrap();
        assert_eq!(record.document, "greet - say hello");
        assert_eq!(record.metadata["v"], 2);

        // The old text must no longer be searchable
        assert!(store.search("actions", "hi", 5).unwrap().is_empty());
    }

    #[test]
    fn same_id_in_different_categories_is_independent() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create("a", "one", &Metadata::new(), Some("x")).unwrap();
        store.create("b", "two", &Metadata::new(), Some("x")).unwrap();
        assert_eq!(store.get("a", "x").unwrap().unwrap().document, "one");
        assert_eq!(store.get("b", "x").unwrap().unwrap().document, "two");
    }

    #[test]
    fn list_recent_is_newest_first() {
        let store = SqliteStore::open_in_memory().unwrap();
        for i in 0..5 {
            store
                .create("log", &format!("entry {i}"), &Metadata::new(), None)
                .unwrap();
        }
        let docs: Vec<String> = store
            .list_recent("log", 3)
            .unwrap()
            .into_iter()
            .map(|r| r.document)
            .collect();
        assert_eq!(docs, vec!["entry 4", "entry 3", "entry 2"]);
    }

    #[test]
    fn search_is_scoped_to_category() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create("actions", "write a file", &Metadata::new(), Some("write")).unwrap();
        store.create("action_history", "write", &Metadata::new(), None).unwrap();

        let hits = store.search("actions", "write", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "write");
    }

    #[test]
    fn search_matches_any_word_and_ranks_better_matches_first() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create("actions", "read a file from disk", &Metadata::new(), Some("read")).unwrap();
        store.create("actions", "send an email", &Metadata::new(), Some("email")).unwrap();
        store
            .create("actions", "write a file to disk", &Metadata::new(), Some("write"))
            .unwrap();

        let hits = store.search("actions", "write file", 10).unwrap();
        let ids: Vec<&str> = hits.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], "write");
        assert!(ids.contains(&"read"));
    }

    #[test]
    fn search_with_blank_or_quoted_query_is_safe() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create("actions", "quote \"me\"", &Metadata::new(), None).unwrap();
        assert!(store.search("actions", "   ", 5).unwrap().is_empty());
        assert!(store.search("actions", "\"\"", 5).unwrap().is_empty());
        assert_eq!(store.search("actions", "\"me\"", 5).unwrap().len(), 1);
    }

    #[test]
    fn delete_reports_existence() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create("actions", "gone soon", &Metadata::new(), Some("tmp")).unwrap();
        assert!(store.delete("actions", "tmp").unwrap());
        assert!(!store.delete("actions", "tmp").unwrap());
        assert!(store.search("actions", "gone", 5).unwrap().is_empty());
    }

    #[test]
    fn wipe_only_touches_one_category() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create("actions", "keep nothing", &Metadata::new(), Some("a")).unwrap();
        store.create("action_history", "a", &Metadata::new(), None).unwrap();

        store.wipe("actions").unwrap();

        assert_eq!(store.count("actions").unwrap(), 0);
        assert_eq!(store.count("action_history").unwrap(), 1);
        assert!(store.search("actions", "keep", 5).unwrap().is_empty());
    }

    #[test]
    fn escape_fts_query_quotes_and_or_joins() {
        assert_eq!(escape_fts_query("open file"), "\"open\" OR \"file\"");
        assert_eq!(escape_fts_query("say \"hi\""), "\"say\" OR \"hi\"");
        assert_eq!(escape_fts_query(""), "");
    }
}
