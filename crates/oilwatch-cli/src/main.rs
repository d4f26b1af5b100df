mod collect;
mod prices;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "oilwatch")]
#[command(about = "Heating-oil supplier price tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch every configured supplier's page, extract and store current prices
    Collect {
        /// Restrict collection to a specific supplier (by slug)
        #[arg(long)]
        supplier: Option<String>,

        /// Preview which suppliers would be fetched without touching the network
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the most recently stored prices
    Prices {
        /// Restrict output to a specific supplier (by slug)
        #[arg(long)]
        supplier: Option<String>,

        /// Maximum number of rows to print
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = oilwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Collect { supplier, dry_run } => {
            collect::run_collect(&config, supplier.as_deref(), dry_run).await
        }
        Commands::Prices { supplier, limit } => {
            prices::run_prices(&config, supplier.as_deref(), limit).await
        }
    }
}
