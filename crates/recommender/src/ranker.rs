//! Top-K ranking of scored candidates.

use data_loader::MovieId;
use serde::Serialize;

/// One candidate with its model score. Lives only for the duration of a
/// single request; the debug endpoint serializes it as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredCandidate {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub score: f32,
}

/// Sort candidates descending by score and truncate to the top `k`.
///
/// The sort is stable: candidates with equal scores keep their relative
/// input order, which mirrors the candidate selector's catalog traversal
/// and makes results reproducible given identical data. NaN scores compare
/// as equal and therefore also fall back to input order. No randomization,
/// no re-scoring.
pub fn rank(mut scored: Vec<ScoredCandidate>, k: usize) -> Vec<ScoredCandidate> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(k);
    scored
}
