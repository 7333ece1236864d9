//! FAQ stores and the backend switch used by the CLI.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::config::{Config, StoreMode};
use crate::core::data::{Faq, FaqInput, ListFilter};
use crate::core::traits::FaqRepository;
use crate::sync::JsonSync;
use crate::utils::error::AppResult;

/// The store selected for this process
pub enum Backend {
    Database(SqliteStore),
    Memory(MemoryStore),
}

impl Backend {
    /// Open the configured store. Failing to reach the database is the
    /// caller's signal to stop.
    pub fn open(config: &Config, mode: StoreMode) -> AppResult<Self> {
        match mode {
            StoreMode::Database => Ok(Backend::Database(SqliteStore::open(&config.database.path)?)),
            StoreMode::Memory => Ok(Backend::Memory(MemoryStore::with_mirror(JsonSync::new(
                &config.memory.json_file,
            )))),
        }
    }

    pub fn mode(&self) -> StoreMode {
        match self {
            Backend::Database(_) => StoreMode::Database,
            Backend::Memory(_) => StoreMode::Memory,
        }
    }

    /// Memory mode deletes always ask before touching the collection
    pub fn requires_delete_confirmation(&self) -> bool {
        matches!(self, Backend::Memory(_))
    }

    pub fn close(self) -> AppResult<()> {
        match self {
            Backend::Database(store) => store.close(),
            Backend::Memory(_) => Ok(()),
        }
    }
}

impl FaqRepository for Backend {
    fn add(&mut self, input: &FaqInput) -> AppResult<i64> {
        match self {
            Backend::Database(store) => store.add(input),
            Backend::Memory(store) => store.add(input),
        }
    }

    fn list(&self, filter: &ListFilter) -> AppResult<Vec<Faq>> {
        match self {
            Backend::Database(store) => store.list(filter),
            Backend::Memory(store) => store.list(filter),
        }
    }

    fn update(&mut self, id: i64, input: &FaqInput) -> AppResult<bool> {
        match self {
            Backend::Database(store) => store.update(id, input),
            Backend::Memory(store) => store.update(id, input),
        }
    }

    fn delete(&mut self, id: i64) -> AppResult<bool> {
        match self {
            Backend::Database(store) => store.delete(id),
            Backend::Memory(store) => store.delete(id),
        }
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Faq>> {
        match self {
            Backend::Database(store) => store.find_by_id(id),
            Backend::Memory(store) => store.find_by_id(id),
        }
    }

    fn list_categories(&self) -> AppResult<Vec<String>> {
        match self {
            Backend::Database(store) => store.list_categories(),
            Backend::Memory(store) => store.list_categories(),
        }
    }
}
