//! HTTP surface: route table and request handlers.

use std::path::Path;

use axum::{
    extract::{Path as UrlPath, State},
    routing::get,
    Json, Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::error::AppResult;
use crate::orchestrator::{MovieRecommendation, RecommendationService};
use data_loader::UserId;
use recommender::{ScoredCandidate, UserProfile};

/// Creates the main router with all routes.
///
/// `static_dir` holds the front-end entry point and assets; everything
/// under it is plumbing, the JSON routes are the service.
pub fn create_router(service: RecommendationService, static_dir: &Path) -> Router {
    Router::new()
        .route("/user/:uid", get(get_profile))
        .route("/recs/:uid", get(get_recommendations))
        .route("/recs_debug/:uid", get(get_recommendations_debug))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// `GET /user/{uid}` — the user's full rated history.
async fn get_profile(
    State(service): State<RecommendationService>,
    UrlPath(uid): UrlPath<UserId>,
) -> Json<UserProfile> {
    Json(service.profile(uid))
}

/// `GET /recs/{uid}` — top-10 recommendations.
async fn get_recommendations(
    State(service): State<RecommendationService>,
    UrlPath(uid): UrlPath<UserId>,
) -> AppResult<Json<Vec<MovieRecommendation>>> {
    let recs = service.recommend(uid).await?;
    Ok(Json(recs))
}

/// `GET /recs_debug/{uid}` — raw top-20 (movieId, score) pairs.
async fn get_recommendations_debug(
    State(service): State<RecommendationService>,
    UrlPath(uid): UrlPath<UserId>,
) -> AppResult<Json<Vec<ScoredCandidate>>> {
    let scored = service.recommend_debug(uid).await?;
    Ok(Json(scored))
}
