//! Shared LLM client and the oracle seam
//!
//! The engine talks to the LLM through the [`AssessmentOracle`] trait so
//! the extraction and assessment services can be exercised without a
//! network. [`LlmClient`] is the production implementation backed by the
//! rig-core OpenAI provider.

use std::time::Duration;

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::providers::openai;
use thiserror::Error;

use crate::model::assessment::RawAssessmentPayload;
use crate::model::claims::ExtractedClaimsPayload;

/// Environment variable for the claim extraction model
const ENV_EXTRACTION_MODEL: &str = "CLAIM_EXTRACTION_MODEL";

/// Environment variable for the criterion assessment model
const ENV_ASSESSMENT_MODEL: &str = "ASSESSMENT_MODEL";

/// Default model for both phases
const DEFAULT_MODEL: &str = openai::GPT_4O_MINI;

/// Failures observable at the oracle boundary. Both variants are retryable;
/// a malformed response is treated the same as a transport failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OracleError {
    #[error("oracle call failed: {0}")]
    CallFailed(String),

    #[error("oracle call timed out after {0:?}")]
    Timeout(Duration),
}

/// External LLM service treated as an untrusted, retryable black box
#[async_trait]
pub trait AssessmentOracle: Send + Sync {
    /// Extract every environmental claim from a document in one request
    async fn extract_claims(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<ExtractedClaimsPayload, OracleError>;

    /// Assess one criterion against the claim set
    async fn assess_criterion(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<RawAssessmentPayload, OracleError>;
}

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
    extraction_model: String,
    assessment_model: String,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key.
    ///
    /// Model names come from the `CLAIM_EXTRACTION_MODEL` and
    /// `ASSESSMENT_MODEL` env vars (both default to gpt-4o-mini).
    pub fn new(api_key: &str) -> Result<Self, String> {
        let client = openai::Client::new(api_key);

        let extraction_model =
            std::env::var(ENV_EXTRACTION_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let assessment_model =
            std::env::var(ENV_ASSESSMENT_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        tracing::info!(
            extraction_model = %extraction_model,
            assessment_model = %assessment_model,
            "LLM client initialized"
        );

        Ok(Self {
            client,
            extraction_model,
            assessment_model,
        })
    }

    /// Create a client from the `OPENAI_API_KEY` environment variable,
    /// loading a `.env` file first when one is present
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| "OPENAI_API_KEY is not set".to_string())?;
        Self::new(&api_key)
    }
}

#[async_trait]
impl AssessmentOracle for LlmClient {
    async fn extract_claims(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<ExtractedClaimsPayload, OracleError> {
        // temperature=0.0 and a fixed seed for reproducible outputs
        let extractor = self
            .client
            .extractor::<ExtractedClaimsPayload>(&self.extraction_model)
            .preamble(system)
            .additional_params(serde_json::json!({
                "temperature": 0.0,
                "seed": 42
            }))
            .build();

        extractor
            .extract(prompt)
            .await
            .map_err(|e| OracleError::CallFailed(e.to_string()))
    }

    async fn assess_criterion(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<RawAssessmentPayload, OracleError> {
        let extractor = self
            .client
            .extractor::<RawAssessmentPayload>(&self.assessment_model)
            .preamble(system)
            .additional_params(serde_json::json!({
                "temperature": 0.0,
                "seed": 42
            }))
            .build();

        extractor
            .extract(prompt)
            .await
            .map_err(|e| OracleError::CallFailed(e.to_string()))
    }
}
