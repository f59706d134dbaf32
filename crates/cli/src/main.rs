use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{load_dataset, UserId};
use ml_client::CfScorerClient;
use server::RecommendationService;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// CineRecs - movie recommendation engine
#[derive(Parser)]
#[command(name = "cine-recs")]
#[command(about = "Movie recommendations from a collaborative-filtering model", long_about = None)]
struct Cli {
    /// Path to the movie catalog CSV
    #[arg(long, default_value = "data/movies_with_tmdb_data.csv")]
    catalog: PathBuf,

    /// Path to the ratings CSV
    #[arg(long, default_value = "data/ratings_clean.csv")]
    ratings: PathBuf,

    /// Address of the scoring gRPC service
    #[arg(long, default_value = "http://localhost:50051")]
    scorer_addr: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get top-10 movie recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: UserId,
    },

    /// Show raw (movieId, score) pairs for the top-20 candidates
    Debug {
        /// User ID to score candidates for
        #[arg(long)]
        user_id: UserId,
    },

    /// Show a user's rated history
    Profile {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading catalog and ratings...");
    let start = Instant::now();
    let (catalog, interactions) =
        load_dataset(&cli.catalog, &cli.ratings).context("Failed to load data files")?;
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    let catalog = Arc::new(catalog);
    let interactions = Arc::new(interactions);

    match cli.command {
        Commands::Recommend { user_id } => {
            let service = connect_service(catalog, interactions, &cli.scorer_addr).await?;
            let recs = service.recommend(user_id).await?;

            println!("{}", format!("Recommendations for user {user_id}:").bold().blue());
            if recs.is_empty() {
                println!("  (no unrated movies left to recommend)");
            }
            for (i, rec) in recs.iter().enumerate() {
                println!(
                    "{}. {} [{}]",
                    (i + 1).to_string().green(),
                    rec.fetched_title,
                    rec.movie_id
                );
            }
        }
        Commands::Debug { user_id } => {
            let service = connect_service(catalog, interactions, &cli.scorer_addr).await?;
            let scored = service.recommend_debug(user_id).await?;

            println!("{}", format!("Raw scores for user {user_id}:").bold().blue());
            for c in &scored {
                println!("  {}: {}", c.movie_id, c.score);
            }
        }
        Commands::Profile { user_id } => {
            let profile = recommender::user_profile(&catalog, &interactions, user_id);

            println!("{}", format!("User {user_id} rated {} movies:", profile.count).bold().blue());
            for r in &profile.ratings {
                println!(
                    "  {} {} ({:.1})",
                    "•".cyan(),
                    r.fetched_title,
                    r.rating
                );
            }
        }
    }

    Ok(())
}

/// Connect the scoring client and assemble the service. Only the commands
/// that actually score need the model to be reachable.
async fn connect_service(
    catalog: Arc<data_loader::Catalog>,
    interactions: Arc<data_loader::Interactions>,
    scorer_addr: &str,
) -> Result<RecommendationService> {
    let scorer = CfScorerClient::connect(scorer_addr.to_string())
        .await
        .context("Failed to connect to scoring service")?;
    Ok(RecommendationService::new(catalog, interactions, scorer))
}
