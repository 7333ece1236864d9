use anyhow::Result;
use clap::Parser;
use tracing::debug;

use faqdesk::cli::Cli;
use faqdesk::config::Config;
use faqdesk::utils::logging::init_logging;
use faqdesk::utils::report_error;
use faqdesk::AppError;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, writing the defaults on first run
    let config_path = cli.config.clone().unwrap_or_else(Config::config_file_path);
    let config = Config::load_custom(&config_path)?;

    init_logging(&config.general.log_level, cli.debug);
    if !config.general.color {
        colored::control::set_override(false);
    }

    let mode = cli.mode.unwrap_or(config.general.mode);
    debug!(%mode, version = faqdesk::VERSION, "starting");

    // Execute command
    if let Err(e) = cli.command.execute(&config, mode, &config_path) {
        // An unreachable store is the one fatal condition
        if let Some(app_err) = e.downcast_ref::<AppError>()
            && matches!(app_err, AppError::Connection(_))
        {
            report_error(app_err);
            std::process::exit(1);
        }
        return Err(e);
    }

    Ok(())
}
