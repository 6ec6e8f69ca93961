//! podfinder - find podcasts and read their reviews from the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};
use podfinder::commands::{PodcastCommand, SearchCommand, TopCommand};
use podfinder::config::{Config, OutputFormat};
use podfinder::itunes::Region;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "podfinder",
    version,
    about = "Find podcasts and read their reviews",
    long_about = "Browse top charts, search and read reviews from the iTunes podcast directory."
)]
struct Cli {
    /// Store region (fi, ru, gb, us); unknown codes fall back to us
    #[arg(short, long, global = true, env = "PODFINDER_REGION")]
    region: Option<String>,

    /// Upstream base URL
    #[arg(long, global = true, env = "PODFINDER_BASE_URL")]
    base_url: Option<String>,

    /// Disable the upstream call limiter
    #[arg(long, global = true)]
    no_limit: bool,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the top podcasts chart
    #[command(alias = "t")]
    Top,

    /// Search for podcasts
    #[command(alias = "s")]
    Search {
        /// Search query
        query: String,
    },

    /// Show a podcast with its reviews
    #[command(alias = "p")]
    Podcast {
        /// Podcast id(s) to look up
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// List supported regions
    Regions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(region) = cli.region {
        config.region = region;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.no_limit {
        config.limiter_enabled = false;
    }

    let limiter = config.build_limiter()?;

    match cli.command {
        Commands::Top => {
            let output = TopCommand::new(config, limiter).execute().await?;
            println!("{}", output);
        }

        Commands::Search { query } => {
            let output = SearchCommand::new(config, limiter).execute(&query).await?;
            println!("{}", output);
        }

        Commands::Podcast { ids } => {
            let cmd = PodcastCommand::new(config, limiter);

            let output = if ids.len() == 1 {
                cmd.execute(&ids[0]).await?
            } else {
                cmd.execute_batch(&ids).await?
            };

            println!("{}", output);
        }

        Commands::Regions => {
            println!("Supported regions:\n");
            println!("{:<6} {:<20}", "Code", "Name");
            println!("{:-<6} {:-<20}", "", "");

            for region in Region::all() {
                let marker = if *region == Region::default() { " (default)" } else { "" };
                println!("{:<6} {}{}", region.code(), region.display_name(), marker);
            }
        }
    }

    Ok(())
}
