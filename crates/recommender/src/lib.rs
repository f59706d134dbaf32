//! # Recommender Crate
//!
//! The decision logic of the recommendation service, pure over the two
//! read-only stores:
//!
//! - **candidates**: which movies are eligible for a user (everything the
//!   user has not rated yet, in catalog order)
//! - **ranker**: order scored candidates descending and cut to top-K
//! - **profile**: a user's rated history joined with catalog metadata
//!
//! Nothing here talks to the scoring model; callers run the candidate ids
//! through `ml-client` and hand the scores back to the ranker.

pub mod candidates;
pub mod profile;
pub mod ranker;

pub use candidates::select_candidates;
pub use profile::{user_profile, RatedMovie, UserProfile};
pub use ranker::{rank, ScoredCandidate};
