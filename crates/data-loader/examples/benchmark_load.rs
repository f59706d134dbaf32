use data_loader::load_dataset;
use std::path::Path;
use std::time::Instant;

fn main() {
    println!("Loading catalog and ratings...\n");

    let start = Instant::now();
    let (catalog, interactions) = load_dataset(
        Path::new("data/movies_with_tmdb_data.csv"),
        Path::new("data/ratings_clean.csv"),
    )
    .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Users: {}", interactions.user_count());
    println!("Ratings: {}", interactions.len());
    println!(
        "\nPerformance: {:.0} ratings/second",
        interactions.len() as f64 / elapsed.as_secs_f64()
    );
}
