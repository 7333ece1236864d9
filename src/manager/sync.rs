// JSON export and import for the active store

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::{ExportArgs, ImportArgs};
use crate::config::{Config, StoreMode};
use crate::core::operations::FaqOperations;
use crate::store::Backend;
use crate::sync::JsonSync;
use crate::utils::{handle_flow, print_warning, report_error, FlowResult};

/// Export target when no file is given on the command line
pub fn default_export_file(config: &Config, mode: StoreMode) -> PathBuf {
    match mode {
        StoreMode::Database => config.database.export_file.clone(),
        StoreMode::Memory => config.memory.json_file.clone(),
    }
}

pub fn handle_export_command(ops: &FaqOperations<Backend>, config: &Config, args: &ExportArgs) -> Result<()> {
    let file = args
        .file
        .clone()
        .unwrap_or_else(|| default_export_file(config, ops.repository().mode()));
    let target = JsonSync::new(&file);

    match ops.export_to(&target) {
        Ok(true) => {
            handle_flow(FlowResult::Success(format!("FAQs exported to {}", file.display())))
        }
        Ok(false) => print_warning(&format!("Could not write {}", file.display())),
        Err(e) => report_error(&e),
    }
    Ok(())
}

pub fn handle_import_command(ops: &mut FaqOperations<Backend>, args: &ImportArgs) -> Result<()> {
    if !args.file.exists() {
        handle_flow(FlowResult::NotFound {
            item_type: "File".to_string(),
            search_term: args.file.display().to_string(),
        });
        return Ok(());
    }

    match ops.import_from(&JsonSync::new(&args.file)) {
        Ok(report) => handle_flow(FlowResult::Success(format!(
            "{} FAQs imported, {} skipped.",
            report.added, report.skipped
        ))),
        Err(e) => report_error(&e),
    }
    Ok(())
}
