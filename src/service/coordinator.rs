//! Parallel assessment coordinator
//!
//! Fans out one criterion assessment per configured criterion. All N are
//! scheduled immediately; actual oracle concurrency is capped only by the
//! shared limiter. Settle-all semantics: every task's outcome is observed
//! individually and join failures become fallback results, so no criterion
//! ever silently vanishes from the batch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::model::assessment::CriterionResult;
use crate::model::claims::Claim;
use crate::model::criteria::CriterionConfig;
use crate::service::assessor::CriterionAssessor;

/// Callback invoked as criteria complete: `(fraction_complete, step_label)`
pub type BatchProgressFn = dyn Fn(f64, String) + Send + Sync;

/// Outcome of one parallel assessment batch
#[derive(Debug, Clone)]
pub struct AssessmentBatch {
    /// Exactly one result per configured criterion
    pub results: Vec<CriterionResult>,
    /// Results without an `error`
    pub succeeded: usize,
    /// Fallback results; `succeeded + failed == results.len()`
    pub failed: usize,
    pub duration: Duration,
}

/// Coordinates concurrent assessment of all configured criteria
pub struct AssessmentCoordinator {
    assessor: Arc<CriterionAssessor>,
}

impl AssessmentCoordinator {
    pub fn new(assessor: Arc<CriterionAssessor>) -> Self {
        Self { assessor }
    }

    /// Assess every criterion concurrently over the shared, read-only claim
    /// set. Waits for all outcomes; never lets one failure cancel siblings.
    pub async fn assess_all(
        &self,
        criteria: &[CriterionConfig],
        claims: &[Claim],
        document_context: &str,
        progress: Option<&(dyn Fn(f64, String) + Send + Sync)>,
    ) -> AssessmentBatch {
        let start = Instant::now();
        let total = criteria.len();

        tracing::info!(
            criteria = total,
            claims = claims.len(),
            "Starting parallel criterion assessment"
        );

        // Claims and context are shared by reference across all tasks;
        // no assessor mutates them
        let claims: Arc<[Claim]> = Arc::from(claims.to_vec());
        let context: Arc<str> = Arc::from(document_context);

        let mut handles = Vec::with_capacity(total);
        for criterion in criteria {
            let assessor = Arc::clone(&self.assessor);
            let claims = Arc::clone(&claims);
            let context = Arc::clone(&context);
            let task_criterion = criterion.clone();
            let handle = tokio::spawn(async move {
                assessor
                    .assess(&task_criterion, &claims, &context)
                    .await
            });
            handles.push((criterion.clone(), handle));
        }

        let mut results = Vec::with_capacity(total);
        let mut succeeded = 0;
        let mut failed = 0;

        for (completed, (criterion, handle)) in handles.into_iter().enumerate() {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(
                        criterion = %criterion.id,
                        error = %e,
                        "Assessment task aborted, substituting fallback result"
                    );
                    CriterionResult::fallback(
                        &criterion,
                        format!("assessment task aborted: {e}"),
                        Duration::ZERO,
                    )
                }
            };

            if result.error.is_none() {
                succeeded += 1;
            } else {
                failed += 1;
            }

            if let Some(report) = progress {
                let fraction = (completed + 1) as f64 / total.max(1) as f64;
                report(fraction, format!("Assessed {}", result.criterion_name));
            }

            results.push(result);
        }

        let duration = start.elapsed();
        tracing::info!(
            succeeded,
            failed,
            elapsed_ms = duration.as_millis() as u64,
            "Parallel criterion assessment completed"
        );

        AssessmentBatch {
            results,
            succeeded,
            failed,
            duration,
        }
    }
}
