//! End-to-end analysis pipeline
//!
//! Runs extraction, parallel assessment, and aggregation in order and maps
//! each phase onto the coarse progress scale reported to callers. The
//! pipeline is infallible: every phase degrades internally, so a report is
//! always produced.

use std::sync::Arc;

use crate::model::claims::Claim;
use crate::model::config::EngineConfig;
use crate::model::criteria::CriterionConfig;
use crate::model::report::AggregatedReport;
use crate::service::aggregator::aggregate;
use crate::service::assessor::CriterionAssessor;
use crate::service::coordinator::AssessmentCoordinator;
use crate::service::extraction::ClaimExtractionService;
use crate::service::limiter::ConcurrencyLimiter;
use crate::service::llm::AssessmentOracle;
use crate::service::truncate_chars;

/// Pipeline phase a progress update belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Extraction,
    Assessment,
    Aggregation,
}

/// Coarse progress report emitted at phase boundaries and after each
/// completed criterion
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub phase: AnalysisPhase,
    pub percent_complete: u8,
    pub step_label: String,
}

/// Callback receiving progress updates as the pipeline advances
pub type ProgressFn = dyn Fn(ProgressUpdate) + Send + Sync;

// Progress milestones: extraction occupies 45-55, assessment 55-90,
// aggregation the rest
const PERCENT_EXTRACTION_START: u8 = 45;
const PERCENT_ASSESSMENT_START: u8 = 55;
const PERCENT_ASSESSMENT_SPAN: f64 = 35.0;
const PERCENT_AGGREGATION: u8 = 92;
const PERCENT_DONE: u8 = 98;

/// The full analysis engine: extraction, assessment, aggregation
pub struct AnalysisService {
    extraction: ClaimExtractionService,
    coordinator: AssessmentCoordinator,
    max_context_chars: usize,
}

impl AnalysisService {
    /// Build the pipeline around one oracle. All criterion assessments share
    /// a single concurrency limiter sized from the config.
    pub fn new(oracle: Arc<dyn AssessmentOracle>, config: &EngineConfig) -> Self {
        let limiter = Arc::new(ConcurrencyLimiter::new(config.max_concurrent_requests));
        tracing::info!(
            max_concurrent_requests = limiter.limit(),
            max_retries = config.max_retries,
            "Analysis service initialized"
        );
        let assessor = Arc::new(CriterionAssessor::new(
            Arc::clone(&oracle),
            limiter,
            config,
        ));

        Self {
            extraction: ClaimExtractionService::new(oracle, config),
            coordinator: AssessmentCoordinator::new(assessor),
            max_context_chars: config.max_context_chars,
        }
    }

    /// Analyze a document against the given criteria and produce the final
    /// report. `document_context` overrides the context excerpt given to
    /// assessors; when absent, the document prefix is used.
    pub async fn run(
        &self,
        document_text: &str,
        criteria: &[CriterionConfig],
        document_context: Option<&str>,
        progress: Option<&ProgressFn>,
    ) -> AggregatedReport {
        let report = move |phase: AnalysisPhase, percent_complete: u8, step_label: String| {
            if let Some(callback) = progress {
                callback(ProgressUpdate {
                    phase,
                    percent_complete,
                    step_label,
                });
            }
        };

        tracing::info!(
            document_chars = document_text.len(),
            criteria = criteria.len(),
            "Starting document analysis"
        );

        report(
            AnalysisPhase::Extraction,
            PERCENT_EXTRACTION_START,
            "Extracting environmental claims...".to_string(),
        );
        let extraction = self.extraction.extract(document_text).await;
        let claims: Vec<Claim> = extraction.claims;

        report(
            AnalysisPhase::Assessment,
            PERCENT_ASSESSMENT_START,
            format!(
                "Found {} claims. Assessing against {} criteria...",
                claims.len(),
                criteria.len()
            ),
        );

        let context = document_context
            .unwrap_or_else(|| truncate_chars(document_text, self.max_context_chars));

        let batch_progress = move |fraction: f64, label: String| {
            let percent = PERCENT_ASSESSMENT_START
                + (fraction * PERCENT_ASSESSMENT_SPAN).round() as u8;
            report(AnalysisPhase::Assessment, percent, label);
        };
        let batch = self
            .coordinator
            .assess_all(criteria, &claims, context, Some(&batch_progress))
            .await;

        report(
            AnalysisPhase::Aggregation,
            PERCENT_AGGREGATION,
            "Aggregating results...".to_string(),
        );
        let report_out = aggregate(&claims, batch.results, extraction.duration, batch.duration);

        report(
            AnalysisPhase::Aggregation,
            PERCENT_DONE,
            "Analysis complete".to_string(),
        );

        tracing::info!(
            overall_score = report_out.overall_score,
            claims = report_out.total_claims_analyzed,
            criteria_succeeded = report_out.metadata.criteria_succeeded,
            criteria_failed = report_out.metadata.criteria_failed,
            "Document analysis completed"
        );

        report_out
    }
}
