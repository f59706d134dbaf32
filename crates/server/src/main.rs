//! CineRecs HTTP server.
//!
//! Loads both stores, connects to the scoring service, and serves the
//! recommendation API. Data loading failures are fatal; the process never
//! serves traffic with absent stores.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use data_loader::load_dataset;
use ml_client::CfScorerClient;
use server::{create_router, RecommendationService};

/// CineRecs - movie recommendation service
#[derive(Parser)]
#[command(name = "cine-recs-server")]
#[command(about = "Serves movie recommendations from a collaborative-filtering model", long_about = None)]
struct Args {
    /// Path to the movie catalog CSV
    #[arg(long, default_value = "data/movies_with_tmdb_data.csv")]
    catalog: PathBuf,

    /// Path to the ratings CSV
    #[arg(long, default_value = "data/ratings_clean.csv")]
    ratings: PathBuf,

    /// Address of the scoring gRPC service
    #[arg(long, default_value = "http://localhost:50051")]
    scorer_addr: String,

    /// Address to bind the HTTP server on
    #[arg(long, default_value = "0.0.0.0:3000")]
    bind: String,

    /// Directory with the static front-end
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("Loading catalog and ratings...");
    let (catalog, interactions) =
        load_dataset(&args.catalog, &args.ratings).context("Failed to load data files")?;

    info!("Connecting to scoring service at {}", args.scorer_addr);
    let scorer = CfScorerClient::connect(args.scorer_addr)
        .await
        .context("Failed to connect to scoring service")?;

    let service = RecommendationService::new(Arc::new(catalog), Arc::new(interactions), scorer);
    let app = create_router(service, &args.static_dir);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!("Serving on http://{}", args.bind);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
