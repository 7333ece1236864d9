//! Core operations implementation
//!
//! `FaqOperations` wraps any `FaqRepository` and is the single entry point
//! the command handlers use. Input is normalized and validated here before
//! a store is touched, and store failures are logged once on the way out.

use tracing::{debug, error, info, warn};

use crate::core::data::{Faq, FaqInput, FaqPatch, FaqStats, ListFilter};
use crate::core::traits::FaqRepository;
use crate::sync::JsonSync;
use crate::utils::error::{AppError, AppResult};

/// Result of toggling the active flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Changed,
    Unchanged,
    NotFound,
}

/// Result of a confirmed deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Faq),
    Cancelled,
    NotFound,
}

/// Counts from a JSON import
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub skipped: usize,
}

pub struct FaqOperations<R: FaqRepository> {
    repository: R,
}

impl<R: FaqRepository> FaqOperations<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_inner(self) -> R {
        self.repository
    }

    fn prepare(input: FaqInput) -> AppResult<FaqInput> {
        let input = input.normalized();
        input.validate().inspect_err(|e| debug!("rejected input: {}", e))?;
        Ok(input)
    }

    fn log_failure(action: &str, err: &AppError) {
        if err.is_constraint() {
            warn!("{} rejected by store: {}", action, err);
        } else {
            error!("{} failed: {}", action, err);
        }
    }

    pub fn add(&mut self, input: FaqInput) -> AppResult<i64> {
        let input = Self::prepare(input)?;
        let id = self
            .repository
            .add(&input)
            .inspect_err(|e| Self::log_failure("add", e))?;
        info!(id, category = %input.category, "faq added");
        Ok(id)
    }

    /// Replace every field of a record. `Ok(false)` when the id is unknown.
    pub fn update(&mut self, id: i64, input: FaqInput) -> AppResult<bool> {
        let input = Self::prepare(input)?;
        let updated = self
            .repository
            .update(id, &input)
            .inspect_err(|e| Self::log_failure("update", e))?;
        if updated {
            info!(id, "faq updated");
        } else {
            debug!(id, "update matched no faq");
        }
        Ok(updated)
    }

    /// Change only the fields present in the patch. An empty patch still
    /// rewrites the record and refreshes `updated_at`.
    pub fn update_fields(&mut self, id: i64, patch: FaqPatch) -> AppResult<bool> {
        let Some(current) = self.find_by_id(id)? else {
            return Ok(false);
        };
        self.update(id, patch.apply(&current))
    }

    pub fn update_question(&mut self, id: i64, question: impl Into<String>) -> AppResult<bool> {
        self.update_fields(
            id,
            FaqPatch {
                question: Some(question.into()),
                ..Default::default()
            },
        )
    }

    pub fn update_answer(&mut self, id: i64, answer: impl Into<String>) -> AppResult<bool> {
        self.update_fields(
            id,
            FaqPatch {
                answer: Some(answer.into()),
                ..Default::default()
            },
        )
    }

    pub fn update_category(&mut self, id: i64, category: impl Into<String>) -> AppResult<bool> {
        self.update_fields(
            id,
            FaqPatch {
                category: Some(category.into()),
                ..Default::default()
            },
        )
    }

    /// An unchanged status leaves the record and its timestamp alone
    pub fn set_active(&mut self, id: i64, active: i64) -> AppResult<StatusChange> {
        if active != 0 && active != 1 {
            return Err(AppError::Validation(format!(
                "active must be 0 or 1 ({} given)",
                active
            )));
        }
        let Some(current) = self.find_by_id(id)? else {
            return Ok(StatusChange::NotFound);
        };
        if i64::from(current.active) == active {
            return Ok(StatusChange::Unchanged);
        }

        let patch = FaqPatch {
            active: Some(active),
            ..Default::default()
        };
        if self.update(id, patch.apply(&current))? {
            Ok(StatusChange::Changed)
        } else {
            Ok(StatusChange::NotFound)
        }
    }

    pub fn delete(&mut self, id: i64) -> AppResult<bool> {
        let deleted = self
            .repository
            .delete(id)
            .inspect_err(|e| Self::log_failure("delete", e))?;
        if deleted {
            info!(id, "faq deleted");
        }
        Ok(deleted)
    }

    /// Show the record to `confirm` and delete it only on a yes
    pub fn delete_with_confirmation<F>(&mut self, id: i64, confirm: F) -> AppResult<DeleteOutcome>
    where
        F: FnOnce(&Faq) -> AppResult<bool>,
    {
        let Some(faq) = self.find_by_id(id)? else {
            return Ok(DeleteOutcome::NotFound);
        };
        if !confirm(&faq)? {
            debug!(id, "deletion cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }
        if self.delete(id)? {
            Ok(DeleteOutcome::Deleted(faq))
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }

    pub fn find_by_id(&self, id: i64) -> AppResult<Option<Faq>> {
        self.repository
            .find_by_id(id)
            .inspect_err(|e| Self::log_failure("lookup", e))
    }

    pub fn list(&self, filter: &ListFilter) -> AppResult<Vec<Faq>> {
        self.repository
            .list(filter)
            .inspect_err(|e| Self::log_failure("list", e))
    }

    pub fn list_categories(&self) -> AppResult<Vec<String>> {
        self.repository
            .list_categories()
            .inspect_err(|e| Self::log_failure("category listing", e))
    }

    pub fn stats(&self) -> AppResult<FaqStats> {
        let faqs = self.list(&ListFilter::default())?;
        Ok(FaqStats::from_faqs(&faqs))
    }

    /// Write the whole collection to a JSON file
    pub fn export_to(&self, target: &JsonSync) -> AppResult<bool> {
        let faqs = self.list(&ListFilter::default())?;
        Ok(target.export(&faqs))
    }

    /// Add every record found in a JSON file. Ids in the file are ignored;
    /// invalid and duplicate records are skipped.
    pub fn import_from(&mut self, source: &JsonSync) -> AppResult<ImportReport> {
        let Some(mut records) = source.try_import()? else {
            return Ok(ImportReport::default());
        };
        // Oldest first so relative order survives re-numbering
        records.sort_by_key(|f| f.id);

        let mut report = ImportReport::default();
        for faq in &records {
            match self.add(FaqInput::from(faq)) {
                Ok(_) => report.added += 1,
                Err(e) if e.is_constraint() || matches!(e, AppError::Validation(_)) => {
                    debug!(question = %faq.question, "skipped on import: {}", e);
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        info!(added = report.added, skipped = report.skipped, "import finished");
        Ok(report)
    }
}
