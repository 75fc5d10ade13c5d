//! Per-criterion assessment service
//!
//! One invocation assesses one criterion against the full claim set. Oracle
//! calls go through the shared concurrency limiter and, inside the held
//! slot, the backoff executor. Retry exhaustion degrades to a neutral
//! fallback result; it never aborts the batch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::model::assessment::CriterionResult;
use crate::model::claims::Claim;
use crate::model::config::EngineConfig;
use crate::model::criteria::CriterionConfig;
use crate::service::limiter::ConcurrencyLimiter;
use crate::service::llm::{AssessmentOracle, OracleError};
use crate::service::retry::{RetryPolicy, run_with_retry};

pub mod converters;
pub mod prompts;

use converters::result_from_payload;
use prompts::{build_assessment_prompt, build_assessor_system_prompt};

/// Service assessing a single criterion against the shared claim set
pub struct CriterionAssessor {
    oracle: Arc<dyn AssessmentOracle>,
    limiter: Arc<ConcurrencyLimiter>,
    retry: RetryPolicy,
    timeout: Duration,
    max_claims: usize,
    max_context_chars: usize,
}

impl CriterionAssessor {
    pub fn new(
        oracle: Arc<dyn AssessmentOracle>,
        limiter: Arc<ConcurrencyLimiter>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            oracle,
            limiter,
            retry: RetryPolicy::new(config.max_retries, config.retry_base_delay),
            timeout: config.assessment_timeout,
            max_claims: config.max_claims_per_prompt,
            max_context_chars: config.max_context_chars,
        }
    }

    /// Assess one criterion. Infallible by construction: oracle failure
    /// after retries yields the fallback result with `error` set.
    pub async fn assess(
        &self,
        criterion: &CriterionConfig,
        claims: &[Claim],
        document_context: &str,
    ) -> CriterionResult {
        let start = Instant::now();

        // Deliberate neutral default: an empty claim set neither rewards
        // absence of evidence nor penalizes it as a violation
        if claims.is_empty() {
            tracing::debug!(
                criterion = %criterion.id,
                "No claims available, returning neutral assessment"
            );
            return CriterionResult::no_claims(criterion, start.elapsed());
        }

        let system = build_assessor_system_prompt(criterion);
        let prompt = build_assessment_prompt(
            criterion,
            claims,
            document_context,
            self.max_claims,
            self.max_context_chars,
        );

        tracing::debug!(
            criterion = %criterion.id,
            claims_count = claims.len(),
            prompt_length = prompt.len(),
            "Initiating oracle call for criterion assessment"
        );

        let operation_name = format!("assess_{}", criterion.id);

        // The slot is held across retries; a persistently failing criterion
        // can reduce effective concurrency for up to the full backoff window
        let outcome = self
            .limiter
            .acquire(run_with_retry(&operation_name, self.retry, || {
                let system = &system;
                let prompt = &prompt;
                async move {
                    match tokio::time::timeout(
                        self.timeout,
                        self.oracle.assess_criterion(system, prompt),
                    )
                    .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(OracleError::Timeout(self.timeout)),
                    }
                }
            }))
            .await;

        let duration = start.elapsed();

        match outcome {
            Ok(payload) => {
                let result = result_from_payload(criterion, payload, duration);
                tracing::info!(
                    criterion = %criterion.id,
                    score = result.score,
                    findings = result.findings.len(),
                    elapsed_ms = duration.as_millis() as u64,
                    "Criterion assessment completed"
                );
                result
            }
            Err(e) => {
                tracing::error!(
                    criterion = %criterion.id,
                    elapsed_ms = duration.as_millis() as u64,
                    error = %e,
                    "Criterion assessment failed after retries, using fallback"
                );
                CriterionResult::fallback(criterion, e.to_string(), duration)
            }
        }
    }
}
