//! Best-effort JSON mirror of a FAQ collection.
//!
//! Export overwrites the file with a flat array of records. Import never
//! fails: a missing, empty or malformed file yields an empty collection.
//! A malformed file is moved aside to `<file>.corrupt` before the next
//! export can overwrite it.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::data::Faq;
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct JsonSync {
    path: PathBuf,
}

impl JsonSync {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full collection, reporting instead of propagating failures
    pub fn export(&self, records: &[Faq]) -> bool {
        match self.try_export(records) {
            Ok(()) => {
                debug!(path = %self.path.display(), count = records.len(), "faqs exported");
                true
            }
            Err(e) => {
                warn!(path = %self.path.display(), "failed to export faqs: {}", e);
                false
            }
        }
    }

    pub fn try_export(&self, records: &[Faq]) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| AppError::Sync(format!("failed to serialize faqs: {}", e)))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Read the collection back; empty on any problem
    pub fn import(&self) -> Vec<Faq> {
        match self.try_import() {
            Ok(Some(records)) => {
                info!(path = %self.path.display(), count = records.len(), "faqs imported");
                records
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "no faq file to import");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), "ignoring unreadable faq file: {}", e);
                self.quarantine();
                Vec::new()
            }
        }
    }

    /// `Ok(None)` for a missing or blank file, `Err` for anything unreadable
    pub fn try_import(&self) -> AppResult<Option<Vec<Faq>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let records: Vec<Faq> = serde_json::from_str(&content)
            .map_err(|e| AppError::Sync(format!("malformed faq file: {}", e)))?;
        Ok(Some(records))
    }

    /// Path the corrupt file is moved to
    pub fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    fn quarantine(&self) {
        if !self.path.exists() {
            return;
        }
        let target = self.corrupt_path();
        match std::fs::rename(&self.path, &target) {
            Ok(()) => warn!(backup = %target.display(), "corrupt faq file moved aside"),
            Err(e) => warn!("failed to move corrupt faq file aside: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::now_timestamp;

    fn faq(id: i64, question: &str) -> Faq {
        Faq {
            id,
            question: question.to_string(),
            answer: "Resposta".to_string(),
            active: id % 2 == 0,
            updated_at: now_timestamp(),
            category: "GERAL".to_string(),
        }
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let sync = JsonSync::new(dir.path().join("memoria").join("faq_export.json"));
        let records = vec![faq(2, "Qual o horário?"), faq(1, "Onde fica?")];

        assert!(sync.export(&records));
        assert_eq!(sync.import(), records);
    }

    #[test]
    fn test_export_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let sync = JsonSync::new(dir.path().join("faq.json"));

        assert!(sync.export(&[faq(1, "A"), faq(2, "B")]));
        assert!(sync.export(&[faq(3, "C")]));
        let imported = sync.import();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].id, 3);
    }

    #[test]
    fn test_import_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sync = JsonSync::new(dir.path().join("absent.json"));
        assert!(sync.import().is_empty());
        assert!(matches!(sync.try_import(), Ok(None)));
    }

    #[test]
    fn test_import_empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faq.json");
        std::fs::write(&path, "  \n").unwrap();
        assert!(JsonSync::new(&path).import().is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_import_malformed_file_is_empty_and_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faq.json");
        std::fs::write(&path, "{ not json").unwrap();
        let sync = JsonSync::new(&path);

        assert!(sync.import().is_empty());
        assert!(!path.exists());
        let backup = std::fs::read_to_string(sync.corrupt_path()).unwrap();
        assert_eq!(backup, "{ not json");
    }

    #[test]
    fn test_import_non_array_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faq.json");
        std::fs::write(&path, r#"{"id": 1}"#).unwrap();
        let sync = JsonSync::new(&path);

        assert!(matches!(sync.try_import(), Err(AppError::Sync(_))));
        assert!(sync.import().is_empty());
    }

    #[test]
    fn test_export_to_unwritable_path_reports_false() {
        let dir = tempfile::tempdir().unwrap();
        // The target path is an existing directory
        let sync = JsonSync::new(dir.path());
        assert!(!sync.export(&[faq(1, "A")]));
    }
}
