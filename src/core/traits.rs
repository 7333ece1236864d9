//! Core trait definitions for FAQ management
//!
//! Every store (relational, in-memory) implements the same contract so
//! callers never need to know which backend they are talking to.

use crate::core::data::{Faq, FaqInput, ListFilter};
use crate::utils::error::AppResult;

/// CRUD contract shared by all FAQ stores
///
/// Inputs reaching a repository are already normalized and validated by
/// the operations layer. Implementations still enforce their own
/// constraints (uniqueness, lengths) and report violations as
/// `AppError::Duplicate` / `AppError::ValueTooLong`.
pub trait FaqRepository {
    /// Insert a new FAQ and return the id assigned by the store
    fn add(&mut self, input: &FaqInput) -> AppResult<i64>;

    /// List FAQs newest first, optionally filtered by category and capped
    fn list(&self, filter: &ListFilter) -> AppResult<Vec<Faq>>;

    /// Replace every field of an existing FAQ; `Ok(false)` if the id is unknown
    fn update(&mut self, id: i64, input: &FaqInput) -> AppResult<bool>;

    /// Remove a FAQ; `Ok(false)` if nothing matched
    fn delete(&mut self, id: i64) -> AppResult<bool>;

    /// Look up a single FAQ
    fn find_by_id(&self, id: i64) -> AppResult<Option<Faq>>;

    /// Distinct categories, sorted
    fn list_categories(&self) -> AppResult<Vec<String>>;
}
