//! playdeck CLI
//!
//! Command-line interface for crawling third-party game feeds and importing
//! them into the playdeck catalog.

mod commands;
mod error;

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use playdeck_feed::{FeedKind, SortKey};

pub(crate) use error::CliError;

#[derive(Parser)]
#[command(name = "playdeck")]
#[command(about = "Import third-party game feeds into the playdeck catalog", long_about = None)]
struct Cli {
    /// Catalog database path (defaults to the user data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Show per-item detail
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Which feed page to start from and how to narrow it down.
#[derive(Args, Clone)]
pub(crate) struct FeedArgs {
    /// Feed to crawl (gamepix, gamemonetize)
    #[arg(long, default_value = "gamepix")]
    pub(crate) feed: FeedKind,

    /// 1-based page to start the sweep from
    #[arg(long, default_value_t = 1)]
    pub(crate) page: u32,

    /// Sort order (quality, recency)
    #[arg(long, default_value = "quality")]
    pub(crate) sort: SortKey,

    /// Only keep candidates whose title or description contains this text
    #[arg(long)]
    pub(crate) filter: Option<String>,

    /// Items per page (overrides settings)
    #[arg(long)]
    pub(crate) page_size: Option<u32>,

    /// Give up after scanning this many pages without finding new games
    #[arg(long)]
    pub(crate) max_pages: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum StatusArg {
    Published,
    Draft,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the next feed page with games not yet in the catalog
    Crawl {
        #[command(flatten)]
        feed: FeedArgs,
    },

    /// Import new games from a feed page
    Import {
        #[command(flatten)]
        feed: FeedArgs,

        /// Import only these external ids (default: every listed candidate)
        #[arg(long = "id", value_delimiter = ',')]
        ids: Vec<String>,
    },

    /// Check whether games with these titles are already in the catalog
    Exists {
        #[arg(required = true)]
        titles: Vec<String>,
    },

    /// Load categories and games from a YAML seed directory
    Seed {
        /// Directory containing categories/ and games/
        dir: PathBuf,
    },

    /// List games in the catalog
    Games {
        /// Category slug
        #[arg(long)]
        category: Option<String>,

        /// Text to search for in titles and descriptions
        #[arg(long)]
        search: Option<String>,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// Only featured games
        #[arg(long)]
        featured: bool,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 20)]
        limit: u32,
    },

    /// List categories with game counts
    Categories,

    /// Show catalog statistics
    Stats,

    /// Show recent import runs
    History {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },

    /// Manage feed settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show resolved feed settings and their sources
    Show,

    /// Print the settings file path
    Path,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let db = cli.db;
    let result = match cli.command {
        Commands::Crawl { feed } => commands::crawl::run_crawl(db, feed),
        Commands::Import { feed, ids } => commands::import::run_import(db, feed, ids, cli.quiet),
        Commands::Exists { titles } => commands::exists::run_exists(db, titles),
        Commands::Seed { dir } => commands::seed::run_seed(db, dir),
        Commands::Games {
            category,
            search,
            status,
            featured,
            page,
            limit,
        } => commands::games::run_games(db, category, search, status, featured, page, limit),
        Commands::Categories => commands::categories::run_categories(db),
        Commands::Stats => commands::stats::run_stats(db),
        Commands::History { limit } => commands::history::run_history(db, limit),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Message-only logger. `RUST_LOG` still overrides the level per module.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| match record.level() {
            log::Level::Error => writeln!(buf, "Error: {}", record.args()),
            log::Level::Warn => writeln!(buf, "Warning: {}", record.args()),
            _ => writeln!(buf, "{}", record.args()),
        })
        .init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
