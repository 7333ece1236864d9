//! FAQ Desk - a FAQ knowledge base manager
//!
//! This library provides FAQ storage on SQLite or in memory, a JSON
//! mirror for exporting and importing collections, and the operations
//! layer the command line tool is built on.

pub mod cli;
pub mod config;
pub mod core;
pub mod manager;
pub mod store;
pub mod sync;
pub mod utils;

// Re-export core types and traits for easier use
pub use core::{
    data::{Faq, FaqInput, FaqPatch, FaqStats, ListFilter},
    operations::{DeleteOutcome, FaqOperations, ImportReport, StatusChange},
    traits::FaqRepository,
};
pub use store::{Backend, MemoryStore, SqliteStore};
pub use sync::JsonSync;
pub use utils::error::{AppError, AppResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
