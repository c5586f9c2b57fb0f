#![forbid(unsafe_code)]

//! lustre command-line entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lustre_api::{AppConfig, Server};
use lustre_core::expand_path;
use lustre_search::{Catalog, IndexBuilder};

/// lustre catalog search server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./lustre.toml when present)
    #[arg(short, long, global = true, env = "LUSTRE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Override the listen address
        #[arg(long)]
        bind: Option<String>,
    },
    /// Rebuild the search index from a catalog JSON file
    Index {
        /// Catalog file (defaults to search.catalog_path)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Index directory (defaults to search.index_path)
        #[arg(long)]
        index_path: Option<PathBuf>,
    },
    /// Print an Argon2 hash for use as auth.password_hash
    HashPassword {
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lustre=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            let server = Server::new(config).await?;
            server.serve().await?;
        }
        Command::Index {
            catalog,
            index_path,
        } => {
            let catalog_path = catalog
                .or_else(|| config.search.catalog_path.as_deref().map(expand_path))
                .context("no catalog given: pass --catalog or set search.catalog_path")?;
            let index_path = index_path
                .or_else(|| config.search.index_path.as_deref().map(expand_path))
                .context("no index path given: pass --index-path or set search.index_path")?;

            let stats = tokio::task::spawn_blocking(move || {
                let catalog = Catalog::from_path(&catalog_path)?;
                IndexBuilder::new().build(&catalog, &index_path)
            })
            .await??;

            tracing::info!(
                products = stats.products_indexed,
                skipped = stats.products_skipped,
                categories = stats.categories_indexed,
                "index rebuilt"
            );
        }
        Command::HashPassword { password } => {
            println!("{}", lustre_auth::hash_password(&password)?);
        }
    }

    Ok(())
}
