// Command handlers
pub mod config;    // Configuration management
pub mod crud;      // Add, show, update, delete
pub mod document;  // CPF / CEP checks
pub mod query;     // Listing, categories, statistics
pub mod sync;      // JSON export / import

pub use config::handle_config_command;
pub use crud::{handle_add_command, handle_delete_command, handle_show_command, handle_update_command};
pub use document::{handle_cep_command, handle_cpf_command};
pub use query::handle_list_command;
pub use sync::{handle_export_command, handle_import_command};

use crate::config::{Config, StoreMode};
use crate::core::operations::FaqOperations;
use crate::store::Backend;
use crate::utils::error::AppResult;

/// Open the selected store and wrap it for the handlers
pub fn open_operations(config: &Config, mode: StoreMode) -> AppResult<FaqOperations<Backend>> {
    Ok(FaqOperations::new(Backend::open(config, mode)?))
}
