// Query operations - List, categories and statistics

use anyhow::Result;

use crate::cli::{ListArgs, ListFormat};
use crate::config::Config;
use crate::core::data::ListFilter;
use crate::core::operations::FaqOperations;
use crate::store::Backend;
use crate::utils::{report_on_err, DisplayFormatter};

pub fn handle_list_command(ops: &FaqOperations<Backend>, config: &Config, args: &ListArgs) -> Result<()> {
    if args.categories {
        if let Some(categories) = report_on_err(ops.list_categories()) {
            DisplayFormatter::print_categories(&categories);
        }
        return Ok(());
    }

    if args.stats {
        if let Some(stats) = report_on_err(ops.stats()) {
            DisplayFormatter::print_stats(&stats);
        }
        return Ok(());
    }

    let filter = ListFilter {
        category: args.category.clone(),
        limit: args.limit,
    };
    let Some(faqs) = report_on_err(ops.list(&filter)) else {
        return Ok(());
    };

    let format = args
        .format
        .unwrap_or_else(|| ListFormat::from_config(config.general.format.as_deref()));
    DisplayFormatter::format_list(&faqs, &format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreMode;
    use crate::manager::open_operations;

    fn list_args() -> ListArgs {
        ListArgs {
            category: None,
            limit: None,
            format: Some(ListFormat::Json),
            categories: false,
            stats: false,
        }
    }

    #[test]
    fn test_store_errors_are_reported_not_returned() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.path = dir.path().join("faq.db");

        let ops = open_operations(&config, StoreMode::Database).unwrap();
        // Break the store behind the open connection
        rusqlite::Connection::open(&config.database.path)
            .unwrap()
            .execute_batch("DROP TABLE faq;")
            .unwrap();
        assert!(ops.list(&ListFilter::default()).is_err());

        assert!(handle_list_command(&ops, &config, &list_args()).is_ok());
        let categories = ListArgs { categories: true, ..list_args() };
        assert!(handle_list_command(&ops, &config, &categories).is_ok());
        let stats = ListArgs { stats: true, ..list_args() };
        assert!(handle_list_command(&ops, &config, &stats).is_ok());
    }
}
