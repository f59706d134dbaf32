//! Candidate selection: the set of movies a user has not rated yet.

use data_loader::{Catalog, Interactions, MovieId, UserId};
use std::collections::HashSet;
use tracing::debug;

/// Select all catalog movies the user has not rated, in catalog order.
///
/// Pure read over the immutable stores. A user with no history (including
/// ids absent from the interaction store entirely) gets the full catalog;
/// a user who has rated everything gets an empty vec, which callers must
/// treat as a valid outcome.
///
/// The returned order is the catalog's load order. It is what makes the
/// whole pipeline reproducible: the ranker breaks score ties by input
/// position, so identical stores and model always yield identical output.
pub fn select_candidates(
    catalog: &Catalog,
    interactions: &Interactions,
    user_id: UserId,
) -> Vec<MovieId> {
    let seen: HashSet<MovieId> = interactions
        .ratings_for(user_id)
        .iter()
        .map(|r| r.movie_id)
        .collect();

    let candidates: Vec<MovieId> = catalog
        .iter()
        .map(|m| m.id)
        .filter(|id| !seen.contains(id))
        .collect();

    debug!(
        user_id,
        seen = seen.len(),
        candidates = candidates.len(),
        "selected candidates"
    );
    candidates
}
