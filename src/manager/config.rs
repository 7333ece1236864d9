// Configuration operations

use anyhow::Result;
use std::path::Path;

use crate::cli::ConfigCommands;
use crate::config::{Config, StoreMode};
use crate::utils::{self, handle_flow, FlowResult};

pub fn handle_config_command(
    config: &Config,
    mode: StoreMode,
    config_path: &Path,
    command: Option<ConfigCommands>,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(config, mode, config_path),
        Some(ConfigCommands::Reset) => handle_reset_command(config_path),
        None => handle_config_help(config_path),
    }
}

fn handle_show_command(config: &Config, mode: StoreMode, config_path: &Path) -> Result<()> {
    println!("⚙️  FAQ Desk Configuration");
    println!("==========================");
    println!("File: {}", config_path.display());

    println!("General:");
    println!("  Mode: {}", config.general.mode);
    if mode != config.general.mode {
        println!("  Mode (this run): {}", mode);
    }
    println!("  Log level: {}", config.general.log_level);
    println!("  Color: {}", config.general.color);
    if let Some(format) = &config.general.format {
        println!("  Default format: {}", format);
    }

    println!("Database:");
    println!("  Path: {}", config.database.path.display());
    println!("  Export file: {}", config.database.export_file.display());

    println!("Memory:");
    println!("  JSON file: {}", config.memory.json_file.display());

    Ok(())
}

fn handle_config_help(config_path: &Path) -> Result<()> {
    println!("⚙️  Configuration Management");
    println!("==========================");
    println!("Available configuration commands:");
    println!("  faqdesk config show    - Show current configuration");
    println!("  faqdesk config reset   - Reset configuration to defaults");
    println!();
    println!("Configuration file location: {}", config_path.display());
    Ok(())
}

fn handle_reset_command(config_path: &Path) -> Result<()> {
    if utils::prompt_yes_no(
        "Are you sure you want to reset configuration to defaults? This will overwrite your current settings.",
    )? {
        Config::default().save_to(config_path)?;
        handle_flow(FlowResult::Success("Configuration reset to defaults!".to_string()));
    } else {
        handle_flow(FlowResult::Cancelled("Reset cancelled.".to_string()));
    }
    Ok(())
}
