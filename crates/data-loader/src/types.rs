//! Core domain types: the catalog of recommendable movies and the
//! historical rating interactions.
//!
//! Both stores are built once at startup and shared read-only across
//! requests, so none of the types here carry interior mutability.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

/// Substituted for a missing or empty poster reference.
pub const PLACEHOLDER_POSTER: &str = "/static/images/placeholder.jpg";

/// Substituted for a missing or empty title.
pub const UNKNOWN_TITLE: &str = "Unknown Movie";

/// A catalog entry: one recommendable movie with its display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub poster_url: String,
    pub overview: String,
}

/// A single historical (user, movie, rating) observation.
///
/// Duplicates, if the data contains them, are preserved as-is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value as given by the user (typically 0.5 to 5.0)
    pub rating: f32,
}

/// The catalog store: all movies, read-only after load.
///
/// Movies are kept in source-file row order so that iteration is
/// deterministic; candidate selection and therefore tie-breaking in the
/// ranker depend on this order being stable across requests.
#[derive(Debug, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    by_id: HashMap<MovieId, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a movie. A duplicate id replaces the earlier entry in place,
    /// keeping the first occurrence's position in traversal order.
    pub fn insert(&mut self, movie: Movie) {
        match self.by_id.get(&movie.id) {
            Some(&idx) => self.movies[idx] = movie,
            None => {
                self.by_id.insert(movie.id, self.movies.len());
                self.movies.push(movie);
            }
        }
    }

    /// Look up a movie by id
    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.by_id.get(&id).map(|&idx| &self.movies[idx])
    }

    /// Iterate over all movies in load order
    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// The interaction store: all historical ratings, indexed by user,
/// read-only after load.
#[derive(Debug, Default)]
pub struct Interactions {
    user_ratings: HashMap<UserId, Vec<Rating>>,
    total: usize,
}

impl Interactions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rating: Rating) {
        self.user_ratings
            .entry(rating.user_id)
            .or_default()
            .push(rating);
        self.total += 1;
    }

    /// All ratings made by a user, in file order. Empty slice for users
    /// with no history — that is a valid state, not an error.
    pub fn ratings_for(&self, user_id: UserId) -> &[Rating] {
        self.user_ratings
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of ratings across all users
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct users with at least one rating
    pub fn user_count(&self) -> usize {
        self.user_ratings.len()
    }
}
