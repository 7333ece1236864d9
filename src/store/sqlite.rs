//! SQLite-backed FAQ store.
//!
//! One connection per process lifetime. Every write runs in its own
//! transaction; constraint failures are classified into duplicate /
//! value-too-long / generic store errors.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info, warn};

use crate::core::data::{Faq, FaqInput, ListFilter};
use crate::core::traits::FaqRepository;
use crate::utils::error::{AppError, AppResult};
use crate::utils::format::parse_datetime;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS faq (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    question    TEXT    NOT NULL,
    answer      TEXT    NOT NULL,
    active      INTEGER NOT NULL,
    updated_at  TEXT    NOT NULL DEFAULT (datetime('now')),
    category    TEXT    NOT NULL,
    CONSTRAINT faq_question_un UNIQUE (question),
    CONSTRAINT ck_faq_active CHECK (active IN (0, 1)),
    CONSTRAINT ck_faq_question_len CHECK (length(question) <= 150),
    CONSTRAINT ck_faq_answer_len CHECK (length(answer) <= 600),
    CONSTRAINT ck_faq_category_len CHECK (length(category) <= 50)
);
CREATE INDEX IF NOT EXISTS idx_faq_categ_up ON faq (upper(category));
";

const SQL_INSERT: &str = "INSERT INTO faq (question, answer, active, category) VALUES (?1, ?2, ?3, ?4)";

const SQL_SELECT: &str = "SELECT id, question, answer, active, updated_at, category FROM faq";

const SQL_UPDATE: &str = "
UPDATE faq
SET question = ?1,
    answer = ?2,
    active = ?3,
    updated_at = datetime('now'),
    category = ?4
WHERE id = ?5";

const SQL_DELETE: &str = "DELETE FROM faq WHERE id = ?1";

const SQL_DISTINCT_CATEGORIES: &str = "SELECT DISTINCT category FROM faq ORDER BY category";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and ensure the schema exists
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Connection(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let conn = Connection::open(path)
            .map_err(|e| AppError::Connection(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "database connection established");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| AppError::Connection(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> AppResult<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| AppError::Connection(format!("failed to prepare schema: {}", e)))?;
        let store = Self { conn };
        store.log_schema_health();
        Ok(store)
    }

    /// Report schema objects the store relies on but cannot find.
    /// Never alters the database.
    pub fn check_schema(&self) -> AppResult<Vec<&'static str>> {
        let table_sql: Option<String> = self
            .conn
            .query_row(
                "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = 'faq'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(classify_error)?;

        let Some(table_sql) = table_sql else {
            return Ok(vec!["TABLE faq"]);
        };

        let mut missing = Vec::new();
        if !table_sql.contains("faq_question_un") {
            missing.push("UNIQUE(question) -> faq_question_un");
        }
        if !table_sql.contains("ck_faq_active") {
            missing.push("CHECK active IN (0,1) -> ck_faq_active");
        }

        let has_index: bool = self
            .conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'index' AND name = 'idx_faq_categ_up')",
                [],
                |row| row.get(0),
            )
            .map_err(classify_error)?;
        if !has_index {
            missing.push("INDEX upper(category) -> idx_faq_categ_up");
        }

        Ok(missing)
    }

    fn log_schema_health(&self) {
        match self.check_schema() {
            Ok(missing) if missing.is_empty() => info!("faq schema OK (UNIQUE, CHECK, INDEX)"),
            Ok(missing) => warn!("faq schema is missing: {}", missing.join("; ")),
            Err(e) => warn!("failed to check faq schema: {}", e),
        }
    }

    /// Close the connection, reporting any error instead of dropping it silently
    pub fn close(self) -> AppResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| AppError::Store(format!("failed to close connection: {}", e)))?;
        info!("database connection closed");
        Ok(())
    }
}

fn row_to_faq(row: &Row<'_>) -> rusqlite::Result<Faq> {
    let raw_updated: String = row.get(4)?;
    let updated_at = parse_datetime(&raw_updated).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let active: i64 = row.get(3)?;

    Ok(Faq {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        active: active == 1,
        updated_at,
        category: row.get(5)?,
    })
}

/// Map a SQLite failure onto the application's error taxonomy
pub fn classify_error(err: rusqlite::Error) -> AppError {
    if let rusqlite::Error::SqliteFailure(failure, msg) = &err {
        let msg = msg.clone().unwrap_or_default();
        if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            || msg.contains("UNIQUE constraint failed")
        {
            return AppError::Duplicate(msg);
        }
        if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_CHECK && msg.contains("_len") {
            return AppError::ValueTooLong(msg);
        }
    }
    AppError::Store(err.to_string())
}

impl FaqRepository for SqliteStore {
    fn add(&mut self, input: &FaqInput) -> AppResult<i64> {
        let tx = self.conn.transaction().map_err(classify_error)?;
        tx.execute(
            SQL_INSERT,
            params![input.question, input.answer, input.active, input.category],
        )
        .map_err(classify_error)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(classify_error)?;
        debug!(id, "faq inserted");
        Ok(id)
    }

    fn list(&self, filter: &ListFilter) -> AppResult<Vec<Faq>> {
        // SQLite treats a negative LIMIT as "no limit"
        let limit = filter
            .limit
            .map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));

        let faqs = match filter.normalized_category() {
            Some(category) => {
                let sql = format!(
                    "{} WHERE upper(category) = upper(?1) ORDER BY id DESC LIMIT ?2",
                    SQL_SELECT
                );
                let mut stmt = self.conn.prepare(&sql).map_err(classify_error)?;
                let rows = stmt
                    .query_map(params![category, limit], row_to_faq)
                    .map_err(classify_error)?
                    .collect::<rusqlite::Result<Vec<_>>>();
                rows
            }
            None => {
                let sql = format!("{} ORDER BY id DESC LIMIT ?1", SQL_SELECT);
                let mut stmt = self.conn.prepare(&sql).map_err(classify_error)?;
                let rows = stmt
                    .query_map(params![limit], row_to_faq)
                    .map_err(classify_error)?
                    .collect::<rusqlite::Result<Vec<_>>>();
                rows
            }
        };

        faqs.map_err(classify_error)
    }

    fn update(&mut self, id: i64, input: &FaqInput) -> AppResult<bool> {
        let tx = self.conn.transaction().map_err(classify_error)?;
        let affected = tx
            .execute(
                SQL_UPDATE,
                params![input.question, input.answer, input.active, input.category, id],
            )
            .map_err(classify_error)?;
        tx.commit().map_err(classify_error)?;
        Ok(affected > 0)
    }

    fn delete(&mut self, id: i64) -> AppResult<bool> {
        let tx = self.conn.transaction().map_err(classify_error)?;
        let affected = tx.execute(SQL_DELETE, params![id]).map_err(classify_error)?;
        tx.commit().map_err(classify_error)?;
        Ok(affected > 0)
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Faq>> {
        let sql = format!("{} WHERE id = ?1", SQL_SELECT);
        self.conn
            .query_row(&sql, params![id], row_to_faq)
            .optional()
            .map_err(classify_error)
    }

    fn list_categories(&self) -> AppResult<Vec<String>> {
        let mut stmt = self.conn.prepare(SQL_DISTINCT_CATEGORIES).map_err(classify_error)?;
        let categories = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(classify_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(classify_error)?;
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    fn input(question: &str, category: &str) -> FaqInput {
        FaqInput::new(question, "Answer", 1, category)
    }

    #[test]
    fn test_add_then_find() {
        let mut store = store();
        let id = store.add(&FaqInput::new("Qual o horário?", "8h-18h", 1, "GERAL")).unwrap();
        assert_eq!(id, 1);

        let faq = store.find_by_id(id).unwrap().unwrap();
        assert_eq!(faq.question, "Qual o horário?");
        assert_eq!(faq.answer, "8h-18h");
        assert!(faq.active);
        assert_eq!(faq.category, "GERAL");
    }

    #[test]
    fn test_duplicate_question_is_classified() {
        let mut store = store();
        store.add(&input("Same question", "GERAL")).unwrap();
        let err = store.add(&input("Same question", "OUTRA")).unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)), "got {:?}", err);

        // The failed insert was rolled back
        assert_eq!(store.list(&ListFilter::default()).unwrap().len(), 1);
    }

    #[test]
    fn test_store_level_length_check_is_classified() {
        let mut store = store();
        let err = store.add(&input(&"q".repeat(151), "GERAL")).unwrap_err();
        assert!(matches!(err, AppError::ValueTooLong(_)), "got {:?}", err);
    }

    #[test]
    fn test_store_level_active_check_is_generic() {
        let mut store = store();
        let err = store.add(&FaqInput::new("q", "a", 5, "GERAL")).unwrap_err();
        assert!(matches!(err, AppError::Store(_)), "got {:?}", err);
    }

    #[test]
    fn test_list_order_filter_and_limit() {
        let mut store = store();
        store.add(&input("First", "GERAL")).unwrap();
        store.add(&input("Second", "AGENDA")).unwrap();
        store.add(&input("Third", "GERAL")).unwrap();

        let all = store.list(&ListFilter::default()).unwrap();
        assert_eq!(all.iter().map(|f| f.id).collect::<Vec<_>>(), vec![3, 2, 1]);

        let geral = store.list(&ListFilter::category("geral")).unwrap();
        assert_eq!(geral.iter().map(|f| f.id).collect::<Vec<_>>(), vec![3, 1]);

        let capped = store.list(&ListFilter::category("GERAL").with_limit(1)).unwrap();
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].question, "Third");

        let capped_all = store.list(&ListFilter::default().with_limit(2)).unwrap();
        assert_eq!(capped_all.len(), 2);
    }

    #[test]
    fn test_update_missing_id_returns_false() {
        let mut store = store();
        assert!(!store.update(42, &input("Nope", "GERAL")).unwrap());
    }

    #[test]
    fn test_update_replaces_fields_and_refreshes_timestamp() {
        let mut store = store();
        let id = store.add(&input("Before", "GERAL")).unwrap();
        let before = store.find_by_id(id).unwrap().unwrap();

        assert!(store.update(id, &FaqInput::new("After", "New", 0, "AGENDA")).unwrap());
        let after = store.find_by_id(id).unwrap().unwrap();
        assert_eq!(after.question, "After");
        assert_eq!(after.answer, "New");
        assert!(!after.active);
        assert_eq!(after.category, "AGENDA");
        assert!(after.updated_at >= before.updated_at);
    }

    #[test]
    fn test_update_into_duplicate_question_fails() {
        let mut store = store();
        store.add(&input("One", "GERAL")).unwrap();
        let id = store.add(&input("Two", "GERAL")).unwrap();
        let err = store.update(id, &input("One", "GERAL")).unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(store.find_by_id(id).unwrap().unwrap().question, "Two");
    }

    #[test]
    fn test_delete_and_ids_are_not_reused() {
        let mut store = store();
        store.add(&input("One", "GERAL")).unwrap();
        let id = store.add(&input("Two", "GERAL")).unwrap();

        assert!(store.delete(id).unwrap());
        assert!(store.find_by_id(id).unwrap().is_none());
        assert!(!store.delete(id).unwrap());

        let next = store.add(&input("Three", "GERAL")).unwrap();
        assert!(next > id);
    }

    #[test]
    fn test_list_categories_distinct_sorted() {
        let mut store = store();
        store.add(&input("One", "GERAL")).unwrap();
        store.add(&input("Two", "AGENDA")).unwrap();
        store.add(&input("Three", "GERAL")).unwrap();
        assert_eq!(store.list_categories().unwrap(), vec!["AGENDA", "GERAL"]);
    }

    #[test]
    fn test_schema_check_reports_ok() {
        let store = store();
        assert!(store.check_schema().unwrap().is_empty());
    }

    #[test]
    fn test_open_file_and_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("faq.db");

        let mut store = SqliteStore::open(&path).unwrap();
        store.add(&input("Persisted", "GERAL")).unwrap();
        store.close().unwrap();

        let reopened = SqliteStore::open(&path).unwrap();
        let faqs = reopened.list(&ListFilter::default()).unwrap();
        assert_eq!(faqs.len(), 1);
        assert_eq!(faqs[0].question, "Persisted");
    }

    #[test]
    fn test_open_unreachable_path_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a database file
        let err = SqliteStore::open(dir.path()).err().unwrap();
        assert!(matches!(err, AppError::Connection(_)), "got {:?}", err);
    }
}
