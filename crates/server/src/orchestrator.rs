//! # Recommendation Service
//!
//! Coordinates one ranking request end to end:
//! 1. Select candidates (catalog minus the user's rated movies)
//! 2. Score the whole candidate set in one batched model call
//! 3. Rank descending, truncate to top-K
//! 4. Join catalog metadata onto the winners
//!
//! The production and debug paths share steps 1-3 through
//! `score_candidates`, so their outputs are directly comparable.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use data_loader::{Catalog, Interactions, MovieId, UserId};
use ml_client::{CfScorerClient, ScoringError};
use recommender::{rank, select_candidates, user_profile, ScoredCandidate, UserProfile};
use serde::Serialize;

/// Recommendations returned by the production endpoint.
pub const TOP_K: usize = 10;

/// Raw scored pairs returned by the debug endpoint.
pub const DEBUG_TOP_K: usize = 20;

/// Final recommendation returned to the user.
#[derive(Debug, Clone, Serialize)]
pub struct MovieRecommendation {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub fetched_title: String,
    pub poster_url: String,
}

/// The recommendation service: two immutable stores plus a long-lived
/// scoring handle, all cheap to clone and shared across requests. Requests
/// are independent and stateless, so no locking anywhere.
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<Catalog>,
    interactions: Arc<Interactions>,
    scorer: CfScorerClient,
}

impl RecommendationService {
    pub fn new(
        catalog: Arc<Catalog>,
        interactions: Arc<Interactions>,
        scorer: CfScorerClient,
    ) -> Self {
        Self {
            catalog,
            interactions,
            scorer,
        }
    }

    /// Top-10 recommendations with display metadata for `/recs/{uid}`.
    ///
    /// An empty result (user has rated the whole catalog) is a valid
    /// outcome, not an error.
    pub async fn recommend(
        &self,
        user_id: UserId,
    ) -> Result<Vec<MovieRecommendation>, ScoringError> {
        let start = Instant::now();

        let scored = self.score_candidates(user_id).await?;
        let top = rank(scored, TOP_K);

        let recommendations: Vec<MovieRecommendation> = top
            .into_iter()
            .filter_map(|c| {
                let movie = self.catalog.get(c.movie_id)?;
                Some(MovieRecommendation {
                    movie_id: c.movie_id,
                    fetched_title: movie.title.clone(),
                    poster_url: movie.poster_url.clone(),
                })
            })
            .collect();

        info!(
            user_id,
            returned = recommendations.len(),
            elapsed = ?start.elapsed(),
            "served recommendations"
        );
        Ok(recommendations)
    }

    /// Raw top-20 `(movieId, score)` pairs for `/recs_debug/{uid}`.
    ///
    /// Runs the exact same selection and scoring call as `recommend`, only
    /// skipping the metadata join, so scores here line up with what the
    /// production path ranked on.
    pub async fn recommend_debug(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ScoredCandidate>, ScoringError> {
        let scored = self.score_candidates(user_id).await?;
        Ok(rank(scored, DEBUG_TOP_K))
    }

    /// The user's rated history for `/user/{uid}`. Pure read, infallible.
    pub fn profile(&self, user_id: UserId) -> UserProfile {
        user_profile(&self.catalog, &self.interactions, user_id)
    }

    /// Shared scoring path: select candidates, one batched model call,
    /// zip ids with scores positionally.
    async fn score_candidates(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ScoredCandidate>, ScoringError> {
        let candidates = select_candidates(&self.catalog, &self.interactions, user_id);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let scores = self.scorer.score_batch(user_id, &candidates).await?;

        // score_batch guarantees scores.len() == candidates.len()
        Ok(candidates
            .into_iter()
            .zip(scores)
            .map(|(movie_id, score)| ScoredCandidate { movie_id, score })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Movie, Rating};
    use ml_client::scoring::cf_scorer_server::{CfScorer, CfScorerServer};
    use ml_client::scoring::{BatchScoreRequest, BatchScoreResponse};
    use tokio::net::TcpListener;
    use tokio_stream::wrappers::TcpListenerStream;
    use tonic::transport::Server;
    use tonic::{Request, Response, Status};

    // ========================================================================
    // Test fixtures
    // ========================================================================

    fn build_test_stores() -> (Arc<Catalog>, Arc<Interactions>) {
        let mut catalog = Catalog::new();
        for (id, title) in [
            (1, "The Matrix"),
            (2, "Toy Story"),
            (3, "Pulp Fiction"),
            (4, "Forrest Gump"),
            (5, "The Shawshank Redemption"),
        ] {
            catalog.insert(Movie {
                id,
                title: title.to_string(),
                poster_url: format!("/posters/{id}.jpg"),
                overview: String::new(),
            });
        }

        let mut interactions = Interactions::new();
        interactions.insert(Rating {
            user_id: 1,
            movie_id: 1,
            rating: 5.0,
        });
        interactions.insert(Rating {
            user_id: 1,
            movie_id: 2,
            rating: 4.0,
        });
        // User 2 has rated the entire catalog
        for movie_id in 1..=5 {
            interactions.insert(Rating {
                user_id: 2,
                movie_id,
                rating: 3.0,
            });
        }

        (Arc::new(catalog), Arc::new(interactions))
    }

    /// Deterministic mock: score = movie_id / 10, so higher ids rank first.
    /// With `fail` set every call errors, to exercise propagation.
    struct MockScorer {
        fail: bool,
    }

    #[tonic::async_trait]
    impl CfScorer for MockScorer {
        async fn predict_batch(
            &self,
            request: Request<BatchScoreRequest>,
        ) -> Result<Response<BatchScoreResponse>, Status> {
            if self.fail {
                return Err(Status::internal("model unavailable"));
            }
            let scores = request
                .into_inner()
                .movie_ids
                .iter()
                .map(|&id| id as f32 / 10.0)
                .collect();
            Ok(Response::new(BatchScoreResponse { scores }))
        }
    }

    async fn start_mock_scorer(fail: bool) -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock scorer");
        let addr = listener.local_addr().expect("local addr");

        let handle = tokio::spawn(async move {
            Server::builder()
                .add_service(CfScorerServer::new(MockScorer { fail }))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("mock scorer failed");
        });

        (format!("http://{}", addr), handle)
    }

    async fn build_test_service(fail: bool) -> (RecommendationService, tokio::task::JoinHandle<()>) {
        let (catalog, interactions) = build_test_stores();
        let (addr, handle) = start_mock_scorer(fail).await;
        let scorer = CfScorerClient::connect(addr).await.expect("connect");

        (
            RecommendationService::new(catalog, interactions, scorer),
            handle,
        )
    }

    // ========================================================================
    // recommend
    // ========================================================================

    #[tokio::test]
    async fn test_recommend_excludes_rated_and_ranks_descending() {
        let (service, handle) = build_test_service(false).await;

        let recs = service.recommend(1).await.expect("recommend");

        // User 1 rated movies 1 and 2; mock scores favor high ids
        let ids: Vec<MovieId> = recs.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
        assert_eq!(recs[0].fetched_title, "The Shawshank Redemption");
        assert_eq!(recs[0].poster_url, "/posters/5.jpg");

        handle.abort();
    }

    #[tokio::test]
    async fn test_recommend_fully_rated_user_gets_empty_list() {
        let (service, handle) = build_test_service(false).await;

        let recs = service.recommend(2).await.expect("recommend");
        assert!(recs.is_empty());

        handle.abort();
    }

    #[tokio::test]
    async fn test_recommend_unknown_user_gets_full_catalog_ranked() {
        let (service, handle) = build_test_service(false).await;

        let recs = service.recommend(999).await.expect("recommend");
        let ids: Vec<MovieId> = recs.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);

        handle.abort();
    }

    #[tokio::test]
    async fn test_recommend_is_idempotent() {
        let (service, handle) = build_test_service(false).await;

        let first = service.recommend(1).await.expect("first call");
        let second = service.recommend(1).await.expect("second call");

        let first_ids: Vec<MovieId> = first.iter().map(|r| r.movie_id).collect();
        let second_ids: Vec<MovieId> = second.iter().map(|r| r.movie_id).collect();
        assert_eq!(first_ids, second_ids);

        handle.abort();
    }

    #[tokio::test]
    async fn test_recommend_scoring_failure_propagates() {
        let (service, handle) = build_test_service(true).await;

        let err = service.recommend(1).await.unwrap_err();
        assert!(matches!(err, ScoringError::Rpc(_)));

        handle.abort();
    }

    #[tokio::test]
    async fn test_scoring_failure_skipped_when_no_candidates() {
        // User 2 has rated everything: the model is never invoked, so a
        // broken model does not fail the request.
        let (service, handle) = build_test_service(true).await;

        let recs = service.recommend(2).await.expect("recommend");
        assert!(recs.is_empty());

        handle.abort();
    }

    // ========================================================================
    // recommend_debug
    // ========================================================================

    #[tokio::test]
    async fn test_debug_returns_raw_scored_pairs() {
        let (service, handle) = build_test_service(false).await;

        let debug = service.recommend_debug(1).await.expect("debug");

        let ids: Vec<MovieId> = debug.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
        assert!((debug[0].score - 0.5).abs() < 1e-6);
        assert!(debug.windows(2).all(|w| w[0].score >= w[1].score));

        handle.abort();
    }

    #[tokio::test]
    async fn test_debug_matches_production_ordering() {
        let (service, handle) = build_test_service(false).await;

        let recs = service.recommend(1).await.expect("recommend");
        let debug = service.recommend_debug(1).await.expect("debug");

        let rec_ids: Vec<MovieId> = recs.iter().map(|r| r.movie_id).collect();
        let debug_ids: Vec<MovieId> = debug.iter().take(TOP_K).map(|c| c.movie_id).collect();
        assert_eq!(rec_ids, debug_ids);

        handle.abort();
    }

    // ========================================================================
    // profile
    // ========================================================================

    #[tokio::test]
    async fn test_profile_lists_rated_history() {
        let (service, handle) = build_test_service(false).await;

        let profile = service.profile(1);
        assert_eq!(profile.count, 2);
        assert_eq!(profile.ratings[0].movie_id, 1);
        assert_eq!(profile.ratings[0].fetched_title, "The Matrix");

        handle.abort();
    }

    #[tokio::test]
    async fn test_profile_unknown_user_is_empty() {
        let (service, handle) = build_test_service(false).await;

        let profile = service.profile(999);
        assert_eq!(profile.count, 0);
        assert!(profile.ratings.is_empty());

        handle.abort();
    }
}
