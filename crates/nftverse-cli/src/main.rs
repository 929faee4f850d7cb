use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nftverse_core::{market::SortMode, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "nftverse")]
#[command(author, version, about = "A terminal NFT marketplace browser")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Print marketplace listings
    List {
        /// Zero-based page to fetch
        #[arg(short, long, default_value_t = 0, conflicts_with = "all")]
        page: u32,
        /// Fetch every page
        #[arg(short, long)]
        all: bool,
        /// Only show records whose name or creator contains this text
        #[arg(short, long)]
        query: Option<String>,
        /// newest, oldest, price-asc or price-desc
        #[arg(short, long, default_value = "newest")]
        sort: SortMode,
    },
    /// Load records from a JSON file into the local SQLite store
    Seed {
        /// JSON array of listing records
        file: PathBuf,
    },
    /// Print the configuration file path and effective configuration
    Config,
}

/// Initialize logging. The TUI owns the terminal, so it logs to a file.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        std::fs::create_dir_all(config.data_dir())?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, tui)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::List {
            page,
            all,
            query,
            sort,
        }) => commands::list::run(&config, page, all, query.as_deref(), sort).await,
        Some(Commands::Seed { file }) => commands::seed::run(&config, &file).await,
        Some(Commands::Config) => commands::config::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_page_conflicts_with_all() {
        assert!(Cli::try_parse_from(["nftverse", "list", "--page", "2", "--all"]).is_err());

        let cli = Cli::try_parse_from(["nftverse", "list", "--all"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::List { page: 0, all: true, .. })
        ));

        let cli = Cli::try_parse_from(["nftverse", "list", "--page", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::List { page: 2, all: false, .. })
        ));
    }
}
