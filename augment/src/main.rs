//! search-augment CLI
//!
//! Runs the augmentation pipeline, the classifier or a single source from
//! the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};

use search_augment::sources::fetch_or_none;
use search_augment::{classifier, Config, SearchOrchestrator, SearchServiceType};

#[derive(Parser)]
#[command(name = "search-augment")]
#[command(about = "Information augmentation pipeline for chat queries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and print the augmentation (may be empty)
    Search {
        /// The user query
        query: String,
    },
    /// Show the keyword verdict and the selected service
    Classify {
        /// The user query
        query: String,
    },
    /// Run a single source and print its raw result
    Fetch {
        /// Service name (weather, wikipedia, news, search, github_trending, github_repo, url_content)
        service: String,
        /// The user query
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    augment_common::init_tracing("search_augment")?;

    let cli = Cli::parse();
    let config = Config::load()?;
    let orchestrator = SearchOrchestrator::from_config(&config)?;

    match cli.command {
        Commands::Search { query } => {
            let answer = orchestrator.intelligent_search(&query).await;
            println!("{}", answer);
        }
        Commands::Classify { query } => {
            let keyword = classifier::needs_search(&query);
            println!("keyword match: {}", keyword);
            match classifier::local_service(&query) {
                Some(service) => println!("service (local): {}", service),
                None => {
                    let service: SearchServiceType =
                        orchestrator.oracle().determine_service(&query).await;
                    println!("service (model): {}", service);
                }
            }
        }
        Commands::Fetch { service, query } => {
            let Some(adapter) = orchestrator.sources().by_name(&service) else {
                anyhow::bail!("Unknown service: {}", service);
            };
            match fetch_or_none(adapter.as_ref(), &query).await {
                Some(result) => println!(
                    "[{} | confidence {:.2}]\n{}",
                    result.source, result.confidence, result.content
                ),
                None => println!("(no result)"),
            }
        }
    }

    Ok(())
}
