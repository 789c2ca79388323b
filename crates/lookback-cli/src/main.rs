mod cmd;
mod config_path;
mod output;

use clap::{Parser, Subcommand};
use lookback_core::config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lookback",
    about = "Generate periodic review projects in Things, ranked by how overdue each project is",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./lookback.json, then ~/.config/lookback/)
    #[arg(long, global = true, env = "LOOKBACK_CONFIG")]
    config: Option<PathBuf>,

    /// Things database path (default: the standard Things 3 location)
    #[arg(long, global = true, env = "THINGSDB")]
    db: Option<PathBuf>,

    /// Print creation URLs instead of opening Things
    #[arg(long, global = true)]
    dry_run: bool,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a configured review and create its summary project
    Run {
        /// Review name from the config file
        name: String,

        /// Keep only the N least-recently-reviewed projects
        #[arg(short = 'n', long = "limit", allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// List configured reviews
    List,

    /// Walk through the full GTD review checklist
    Full,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Full => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_file = config_path::resolve(cli.config.as_deref());
    let config = Config::load(&config_file)?;

    match cli.command {
        Commands::Run { name, limit } => cmd::run::run(
            &config,
            cli.db.as_deref(),
            &name,
            limit,
            cli.dry_run,
            cli.json,
        ),
        Commands::List => cmd::list::run(&config, cli.json),
        Commands::Full => cmd::full::run(&config, cli.dry_run),
    }
}
