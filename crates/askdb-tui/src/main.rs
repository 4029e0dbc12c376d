//! askdb TUI - ask your database questions from the terminal.

use anyhow::Result;
use askdb_core::build_info::BUILD_INFO;
use askdb_core::{paths, Config};
use clap::Parser;

#[derive(Parser)]
#[command(name = "askdb-tui")]
#[command(about = "Terminal UI for natural-language database questions", long_about = None)]
struct Cli {
    /// Query server base URL (overrides config and ASKDB_SERVER)
    #[arg(short, long)]
    server: Option<String>,
}

fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version" || arg == "-V") {
        println!("{}", BUILD_INFO.version_line("askdb-tui"));
        return Ok(());
    }

    let cli = Cli::parse();

    // The terminal belongs to the UI, so logs go to a file.
    askdb_core::logging::init_to_file(&paths::tui_log_path())?;

    let mut config = Config::load_or_default(&paths::config_path())?;
    if let Some(server) = cli.server {
        config.set_server_url(&server);
    }
    tracing::info!(
        server = %config.server_url,
        "{}",
        BUILD_INFO.version_line("askdb-tui")
    );

    // Run the TUI
    askdb_tui::run(config)
}
