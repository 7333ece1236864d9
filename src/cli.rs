use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use anyhow::Result;
use crate::config::{Config, StoreMode};
use crate::manager::{self, open_operations};
use crate::utils::report_error;

#[derive(Parser)]
#[command(name = "faqdesk")]
#[command(about = "Manage a FAQ knowledge base in SQLite or in memory")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub debug: bool,

    #[arg(short, long, value_enum, help = "Store to use (overrides config)")]
    pub mode: Option<StoreMode>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Commands {
    pub fn execute(self, config: &Config, mode: StoreMode, config_path: &Path) -> Result<()> {
        match self {
            Commands::Cpf(args) => manager::handle_cpf_command(&args),
            Commands::Cep(args) => manager::handle_cep_command(&args),
            Commands::Config(args) => manager::handle_config_command(config, mode, config_path, args.command),
            // Everything else works on FAQ records and needs a store
            command => {
                let mut ops = open_operations(config, mode)?;
                let result = match command {
                    Commands::Add(args) => manager::handle_add_command(&mut ops, &args),
                    Commands::List(args) => manager::handle_list_command(&ops, config, &args),
                    Commands::Show(args) => manager::handle_show_command(&ops, &args),
                    Commands::Update(args) => manager::handle_update_command(&mut ops, &args),
                    Commands::Delete(args) => manager::handle_delete_command(&mut ops, &args),
                    Commands::Export(args) => manager::handle_export_command(&ops, config, &args),
                    Commands::Import(args) => manager::handle_import_command(&mut ops, &args),
                    Commands::Cpf(_) | Commands::Cep(_) | Commands::Config(_) => Ok(()),
                };
                if let Err(e) = ops.into_inner().close() {
                    report_error(&e);
                }
                result
            }
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new FAQ
    Add(AddArgs),

    /// List FAQs, newest first
    List(ListArgs),

    /// Show one FAQ
    Show(ShowArgs),

    /// Change fields of an existing FAQ
    Update(UpdateArgs),

    /// Delete a FAQ
    Delete(DeleteArgs),

    /// Export all FAQs to a JSON file
    Export(ExportArgs),

    /// Import FAQs from a JSON file
    Import(ImportArgs),

    /// Validate and format a CPF
    Cpf(DocumentArgs),

    /// Validate and format a CEP
    Cep(DocumentArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub question: Option<String>,

    #[arg(short, long)]
    pub answer: Option<String>,

    #[arg(short = 'c', long)]
    pub category: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=1), help = "1 = active, 0 = inactive")]
    pub active: Option<i64>,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(short = 'c', long)]
    pub category: Option<String>,

    #[arg(short = 'n', long, help = "Show at most this many FAQs")]
    pub limit: Option<usize>,

    #[arg(short, long)]
    pub format: Option<ListFormat>,

    #[arg(long, help = "Show all available categories")]
    pub categories: bool,

    #[arg(long)]
    pub stats: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(help = "FAQ id")]
    pub id: i64,
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(help = "FAQ id")]
    pub id: i64,

    #[arg(short, long)]
    pub question: Option<String>,

    #[arg(short, long)]
    pub answer: Option<String>,

    #[arg(short = 'c', long)]
    pub category: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=1), help = "1 = active, 0 = inactive")]
    pub active: Option<i64>,
}

impl UpdateArgs {
    pub fn has_field_flags(&self) -> bool {
        self.question.is_some()
            || self.answer.is_some()
            || self.category.is_some()
            || self.active.is_some()
    }
}

#[derive(Args)]
pub struct DeleteArgs {
    #[arg(help = "FAQ id")]
    pub id: i64,

    #[arg(short, long, help = "Skip confirmation (database mode only)")]
    pub force: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(help = "File to export to (defaults to the configured export file)")]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[arg(help = "JSON file to import from")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct DocumentArgs {
    pub value: String,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListFormat {
    Simple,
    Detailed,
    Table,
    Json,
}

impl ListFormat {
    /// Parse the `general.format` config value, falling back to simple
    pub fn from_config(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("detailed") => ListFormat::Detailed,
            Some("table") => ListFormat::Table,
            Some("json") => ListFormat::Json,
            _ => ListFormat::Simple,
        }
    }
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_args_parse() {
        let cli = Cli::try_parse_from([
            "faqdesk", "add", "-q", "Qual o horário?", "-a", "8h-18h", "-c", "geral", "--active", "1",
        ])
        .unwrap();

        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.question.as_deref(), Some("Qual o horário?"));
        assert_eq!(args.answer.as_deref(), Some("8h-18h"));
        assert_eq!(args.category.as_deref(), Some("geral"));
        assert_eq!(args.active, Some(1));
    }

    #[test]
    fn test_active_outside_range_rejected() {
        assert!(Cli::try_parse_from(["faqdesk", "add", "--active", "5"]).is_err());
        assert!(Cli::try_parse_from(["faqdesk", "update", "3", "--active", "-1"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["faqdesk", "--mode", "memory", "--debug", "list", "-n", "5"])
            .unwrap();
        assert_eq!(cli.mode, Some(StoreMode::Memory));
        assert!(cli.debug);
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.limit, Some(5));
        assert!(args.format.is_none());
    }

    #[test]
    fn test_list_format_and_flags() {
        let cli = Cli::try_parse_from(["faqdesk", "list", "-f", "table", "--stats", "-c", "GERAL"])
            .unwrap();
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.format, Some(ListFormat::Table));
        assert!(args.stats);
        assert!(!args.categories);
        assert_eq!(args.category.as_deref(), Some("GERAL"));
    }

    #[test]
    fn test_update_without_flags_is_interactive() {
        let cli = Cli::try_parse_from(["faqdesk", "update", "7"]).unwrap();
        let Commands::Update(args) = cli.command else {
            panic!("expected update");
        };
        assert_eq!(args.id, 7);
        assert!(!args.has_field_flags());
    }

    #[test]
    fn test_list_format_from_config() {
        assert_eq!(ListFormat::from_config(Some("Table")), ListFormat::Table);
        assert_eq!(ListFormat::from_config(Some("unknown")), ListFormat::Simple);
        assert_eq!(ListFormat::from_config(None), ListFormat::Simple);
    }
}
