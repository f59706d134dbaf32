//! Server crate for the CineRecs recommendation service.
//!
//! `orchestrator` wires the stores, the scoring client, and the ranking
//! logic into one service; `routes` exposes it over HTTP.

pub mod error;
pub mod orchestrator;
pub mod routes;

pub use error::{AppError, AppResult};
pub use orchestrator::{MovieRecommendation, RecommendationService};
pub use routes::create_router;
