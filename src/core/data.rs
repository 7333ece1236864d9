//! Core data structures for FAQ management
//!
//! This module contains the FAQ record, the input shapes accepted by the
//! operations layer and the validation rules shared by every store.

use crate::utils::error::{AppError, AppResult};
use crate::utils::format;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_QUESTION_LEN: usize = 150;
pub const MAX_ANSWER_LEN: usize = 600;
pub const MAX_CATEGORY_LEN: usize = 50;

/// A single FAQ entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(alias = "id_faq")]
    pub id: i64,
    #[serde(alias = "pergunta")]
    pub question: String,
    #[serde(alias = "resposta")]
    pub answer: String,
    #[serde(alias = "ativo", with = "format::active_flag")]
    pub active: bool,
    #[serde(alias = "atualizado_em", with = "format")]
    pub updated_at: DateTime<Utc>,
    #[serde(alias = "categoria")]
    pub category: String,
}

/// Field values for creating or fully replacing a FAQ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqInput {
    pub question: String,
    pub answer: String,
    pub active: i64,
    pub category: String,
}

/// A partial update; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub active: Option<i64>,
    pub category: Option<String>,
}

/// Filter for listing queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

/// Statistics about the FAQ collection
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FaqStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub category_counts: BTreeMap<String, usize>,
}

/// Categories are always stored and compared uppercased
pub fn normalize_category(category: &str) -> String {
    category.trim().to_uppercase()
}

/// Current time at the precision timestamps are persisted with
pub fn now_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

fn check_len(field: &str, value: &str, max: usize) -> AppResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(AppError::Validation(format!(
            "{} exceeds {} characters ({} given)",
            field, max, len
        )));
    }
    Ok(())
}

impl Faq {
    pub fn is_in_category(&self, category: &str) -> bool {
        self.category.to_uppercase() == normalize_category(category)
    }
}

impl FaqInput {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        active: i64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            active,
            category: category.into(),
        }
    }

    /// Trim text fields and uppercase the category
    pub fn normalized(self) -> Self {
        Self {
            question: self.question.trim().to_string(),
            answer: self.answer.trim().to_string(),
            active: self.active,
            category: normalize_category(&self.category),
        }
    }

    /// Validation applied before any store is touched
    pub fn validate(&self) -> AppResult<()> {
        if self.active != 0 && self.active != 1 {
            return Err(AppError::Validation(format!(
                "active must be 0 or 1 ({} given)",
                self.active
            )));
        }

        for (field, value) in [
            ("question", &self.question),
            ("answer", &self.answer),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} is required", field)));
            }
        }

        check_len("question", &self.question, MAX_QUESTION_LEN)?;
        check_len("answer", &self.answer, MAX_ANSWER_LEN)?;
        check_len("category", &self.category, MAX_CATEGORY_LEN)?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active == 1
    }
}

impl From<&Faq> for FaqInput {
    fn from(faq: &Faq) -> Self {
        Self {
            question: faq.question.clone(),
            answer: faq.answer.clone(),
            active: i64::from(faq.active),
            category: faq.category.clone(),
        }
    }
}

impl FaqPatch {
    pub fn is_empty(&self) -> bool {
        self.question.is_none()
            && self.answer.is_none()
            && self.active.is_none()
            && self.category.is_none()
    }

    /// Merge the patch over the current record
    pub fn apply(&self, current: &Faq) -> FaqInput {
        let base = FaqInput::from(current);
        FaqInput {
            question: self.question.clone().unwrap_or(base.question),
            answer: self.answer.clone().unwrap_or(base.answer),
            active: self.active.unwrap_or(base.active),
            category: self.category.clone().unwrap_or(base.category),
        }
    }
}

impl ListFilter {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Blank categories mean "no filter"
    pub fn normalized_category(&self) -> Option<String> {
        self.category
            .as_deref()
            .map(normalize_category)
            .filter(|c| !c.is_empty())
    }

    /// Apply the filter to an in-memory slice, newest id first
    pub fn apply(&self, faqs: &[Faq]) -> Vec<Faq> {
        let category = self.normalized_category();
        let mut result: Vec<Faq> = faqs
            .iter()
            .filter(|f| category.as_deref().is_none_or(|c| f.is_in_category(c)))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.id.cmp(&a.id));
        if let Some(limit) = self.limit {
            result.truncate(limit);
        }
        result
    }
}

impl FaqStats {
    pub fn from_faqs(faqs: &[Faq]) -> Self {
        let mut stats = FaqStats {
            total: faqs.len(),
            ..Default::default()
        };
        for faq in faqs {
            if faq.active {
                stats.active += 1;
            } else {
                stats.inactive += 1;
            }
            *stats.category_counts.entry(faq.category.clone()).or_insert(0) += 1;
        }
        stats
    }
}

impl std::fmt::Display for Faq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} [{}]", self.id, self.question, self.category)
    }
}
