//! askdb-cli: ask a database questions in plain language from the shell.

mod console;

use anyhow::Context;
use askdb_core::table::terminal_safe;
use askdb_core::{paths, Config, HealthStatus, HttpClient, QueryController};
use clap::{Parser, Subcommand};
use console::{ConsoleView, OutputFormat};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(name = "askdb")]
#[command(about = "Ask your database questions in plain language", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question and print the generated SQL and its result
    Ask {
        /// The question, in plain language
        question: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Server base URL (overrides config and ASKDB_SERVER)
        #[arg(long)]
        server: Option<String>,
    },

    /// Check whether the server is reachable
    Health {
        /// Server base URL (overrides config and ASKDB_SERVER)
        #[arg(long)]
        server: Option<String>,
    },

    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.verbose {
        askdb_core::logging::init_with_level("debug");
    } else if std::env::var_os("RUST_LOG").is_some() {
        askdb_core::logging::init();
    } else {
        // Keep stderr quiet unless something goes wrong.
        askdb_core::logging::init_with_level("warn");
    }

    match cli.command {
        Some(Commands::Ask {
            question,
            format,
            server,
        }) => ask(&question, format, server.as_deref()).await,
        Some(Commands::Health { server }) => health(server.as_deref()).await,
        Some(Commands::Config { init }) => config(init),
        None => {
            println!(
                "{}",
                askdb_core::build_info::BUILD_INFO.version_line("askdb")
            );
            println!("Use --help for usage information");
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn ask(
    question: &str,
    format: OutputFormat,
    server: Option<&str>,
) -> anyhow::Result<ExitCode> {
    let config = load_config(server)?;
    let client = HttpClient::from_config(&config)?;
    debug!(server = %client.server_url(), "asking");

    let mut view = ConsoleView::new(question).with_progress(format == OutputFormat::Table);
    let mut controller = QueryController::new();

    let Some(outcome) = controller.submit(&mut view, &client).await else {
        eprintln!("Error: the question is empty");
        return Ok(ExitCode::from(2));
    };

    print!("{}", view.render(format, std::io::stdout().is_terminal()));
    if format == OutputFormat::Plain {
        if let Some(error) = view.error() {
            eprintln!("{}", terminal_safe(error, true));
        }
    }

    if outcome.is_failure() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

async fn health(server: Option<&str>) -> anyhow::Result<ExitCode> {
    let config = load_config(server)?;
    let client = HttpClient::from_config(&config)?;
    let color = std::io::stdout().is_terminal();

    let status = client.health().await;
    let label = match &status {
        HealthStatus::Online => "online".to_string(),
        HealthStatus::Degraded(status) => format!("degraded ({status})"),
        HealthStatus::Offline(reason) => format!("offline ({reason})"),
    };
    let label = match (&status, color) {
        (_, false) => label,
        (HealthStatus::Online, true) => label.green().to_string(),
        (HealthStatus::Degraded(_), true) => label.yellow().to_string(),
        (HealthStatus::Offline(_), true) => label.red().to_string(),
    };
    println!("{}: {label}", client.server_url());

    if status.is_online() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn config(init: bool) -> anyhow::Result<ExitCode> {
    let path = paths::config_path();

    if init {
        if path.exists() {
            println!("Config already exists: {}", path.display());
        } else {
            Config::default()
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote default config: {}", path.display());
        }
    }

    let config = load_config(None)?;
    let toml = toml::to_string_pretty(&config).context("serializing config")?;
    println!("# {}", path.display());
    print!("{toml}");
    Ok(ExitCode::SUCCESS)
}

fn load_config(server: Option<&str>) -> anyhow::Result<Config> {
    let path = paths::config_path();
    let mut config = Config::load_or_default(&path)
        .with_context(|| format!("loading {}", path.display()))?;
    if let Some(server) = server {
        config.set_server_url(server);
    }
    Ok(config)
}
