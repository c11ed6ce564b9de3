mod api;
mod app;
mod cache;
mod config;
mod db;
mod error;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::api::types::{SearchCriteria, SortCriteria, SortOrder};

#[derive(Parser, Debug)]
#[command(name = "pantry")]
#[command(about = "An offline-first command-line recipe browser")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/pantry/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Browse the recipe list, fetching pages as needed
  List {
    /// How many list positions to show
    #[arg(short = 'n', long, default_value_t = 30)]
    count: usize,
    #[arg(long, value_enum, default_value_t = SortCriteria::Relevance)]
    sort: SortCriteria,
    #[arg(long, value_enum, default_value_t = SortOrder::Descending)]
    order: SortOrder,
  },
  /// Re-fetch page one, replacing the cached list
  Refresh {
    #[arg(long, value_enum, default_value_t = SortCriteria::Relevance)]
    sort: SortCriteria,
    #[arg(long, value_enum, default_value_t = SortOrder::Descending)]
    order: SortOrder,
  },
  /// Search recipes by name or by ingredients
  Search {
    query: String,
    /// Match the query against ingredients instead of recipe names
    #[arg(long)]
    by_ingredients: bool,
    #[arg(long, value_enum, default_value_t = SortCriteria::Relevance)]
    sort: SortCriteria,
    #[arg(long, value_enum, default_value_t = SortOrder::Descending)]
    order: SortOrder,
  },
  /// Show full details for one recipe
  Show {
    id: i64,
    /// Fetch from the remote API even when cached locally
    #[arg(long)]
    refresh: bool,
  },
  /// Mark a recipe as a favorite
  Favorite {
    id: i64,
    /// Remove the favorite mark instead
    #[arg(long)]
    unset: bool,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_env("PANTRY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  let config = config::Config::load(args.config.as_deref())?;
  let app = app::App::new(&config).await?;

  match args.command {
    Command::List { count, sort, order } => app.list(count, sort, order).await,
    Command::Refresh { sort, order } => app.refresh(sort, order).await,
    Command::Search {
      query,
      by_ingredients,
      sort,
      order,
    } => {
      let criteria = if by_ingredients {
        SearchCriteria::Ingredients
      } else {
        SearchCriteria::Name
      };
      app.search(&query, criteria, sort, order).await
    }
    Command::Show { id, refresh } => app.show(id, refresh).await,
    Command::Favorite { id, unset } => app.favorite(id, !unset),
  }
}
