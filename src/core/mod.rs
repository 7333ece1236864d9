//! Core business logic layer
//!
//! This module contains the FAQ data structures, the repository contract
//! every store implements, and the operations layer built on top of it.

pub mod data;
pub mod operations;
pub mod traits;

// Re-export for easier access
pub use data::{Faq, FaqInput, FaqPatch, FaqStats, ListFilter};
pub use operations::{DeleteOutcome, FaqOperations, ImportReport, StatusChange};
pub use traits::FaqRepository;
