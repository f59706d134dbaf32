//! Batch scoring client for the external collaborative-filtering model.
//!
//! The trained model is served out-of-process and exposed over gRPC in
//! inference-only mode. This crate wraps the generated client behind a
//! single capability: score one batch of (user, movie) pairs per call.
//! The whole candidate set for a request goes out in one invocation, so
//! external round-trips stay O(1) regardless of candidate count.

use anyhow::{Context, Result};
use thiserror::Error;
use tonic::transport::Channel;
use tracing::{debug, error, info};

// Include the generated protobuf code
pub mod scoring {
    tonic::include_proto!("scoring");
}

use scoring::{cf_scorer_client::CfScorerClient as GrpcCfScorerClient, BatchScoreRequest};

/// Errors that can occur when invoking the scoring model.
///
/// A scoring failure is surfaced to the caller as-is: no retries, and
/// never a partially filled score vector.
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Scoring call failed: {0}")]
    Rpc(String),

    #[error("Model returned {got} scores for {expected} movies")]
    LengthMismatch { expected: usize, got: usize },
}

/// Client for the collaborative-filtering scoring service.
///
/// Cheap to clone (tonic channels are reference-counted), so a single
/// connected instance is created at startup and shared across requests.
#[derive(Clone)]
pub struct CfScorerClient {
    client: GrpcCfScorerClient<Channel>,
    service_addr: String,
}

impl CfScorerClient {
    /// Connect to the scoring service.
    ///
    /// # Arguments
    /// * `addr` - Address of the gRPC service (e.g., "http://localhost:50051")
    pub async fn connect(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        info!("Connecting to scoring service at {}", addr);

        let channel = Channel::from_shared(addr.clone())
            .context("Creating channel from address")?
            .connect()
            .await
            .context("Connecting to scoring service")?;

        let client = GrpcCfScorerClient::new(channel);
        Ok(CfScorerClient {
            client,
            service_addr: addr,
        })
    }

    /// Score a batch of movies for a given user.
    ///
    /// Builds two equal-length vectors — the user id repeated, and the
    /// movie ids — and submits them as one batch call. The returned scores
    /// mirror the input order position by position; the ranker depends on
    /// that contract.
    ///
    /// An empty `movie_ids` short-circuits to an empty result without
    /// invoking the model, whose behavior on empty batches is unspecified.
    pub async fn score_batch(
        &self,
        user_id: u32,
        movie_ids: &[u32],
    ) -> Result<Vec<f32>, ScoringError> {
        if movie_ids.is_empty() {
            return Ok(Vec::new());
        }

        let expected_len = movie_ids.len();
        debug!("Scoring {} movies for user {}", expected_len, user_id);
        let request = tonic::Request::new(BatchScoreRequest {
            user_ids: vec![user_id; expected_len],
            movie_ids: movie_ids.to_vec(),
        });

        let mut client = self.client.clone();
        let response = client.predict_batch(request).await.map_err(|e| {
            error!("gRPC error while scoring batch: {}", e);
            ScoringError::Rpc(e.to_string())
        })?;

        let scores = response.into_inner().scores;

        if scores.len() != expected_len {
            error!(
                "Mismatch in number of scores returned: expected {}, got {}",
                expected_len,
                scores.len()
            );
            return Err(ScoringError::LengthMismatch {
                expected: expected_len,
                got: scores.len(),
            });
        }
        Ok(scores)
    }

    /// Get the address of the scoring service this client is connected to.
    pub fn service_address(&self) -> &str {
        &self.service_addr
    }
}
