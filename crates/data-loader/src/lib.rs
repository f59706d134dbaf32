//! # Data Loader Crate
//!
//! Loads the movie catalog and the historical rating interactions from CSV
//! into two in-memory, read-only stores.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, Catalog, Interactions)
//! - **parser**: Parse the CSV files into the stores
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::load_dataset;
//! use std::path::Path;
//!
//! let (catalog, interactions) = load_dataset(
//!     Path::new("data/movies_with_tmdb_data.csv"),
//!     Path::new("data/ratings_clean.csv"),
//! )?;
//!
//! let movie = catalog.get(1).unwrap();
//! let ratings = interactions.ratings_for(1);
//! ```

// Public modules
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Movie,
    Rating,
    Catalog,
    Interactions,
    // Sentinels
    PLACEHOLDER_POSTER,
    UNKNOWN_TITLE,
};

use std::path::Path;
use tracing::info;

/// Load both stores from their CSV files.
///
/// This is the startup entry point. The two files are parsed in parallel;
/// a failure in either is fatal, since the service must not serve traffic
/// with an absent store.
pub fn load_dataset(catalog_path: &Path, ratings_path: &Path) -> Result<(Catalog, Interactions)> {
    let (catalog, interactions) = rayon::join(
        || parser::parse_catalog(catalog_path),
        || parser::parse_ratings(ratings_path),
    );
    let catalog = catalog?;
    let interactions = interactions?;

    info!(
        movies = catalog.len(),
        ratings = interactions.len(),
        users = interactions.user_count(),
        "loaded catalog and interaction stores"
    );
    Ok((catalog, interactions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stores() {
        let catalog = Catalog::new();
        let interactions = Interactions::new();

        assert!(catalog.is_empty());
        assert!(catalog.get(1).is_none());
        assert!(interactions.is_empty());
        assert!(interactions.ratings_for(1).is_empty());
    }

    #[test]
    fn test_load_dataset_missing_files_is_fatal() {
        let result = load_dataset(
            Path::new("/nonexistent/movies.csv"),
            Path::new("/nonexistent/ratings.csv"),
        );
        assert!(result.is_err());
    }
}
