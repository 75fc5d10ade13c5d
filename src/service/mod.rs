//! Analysis engine services
//!
//! The pipeline is extraction -> parallel assessment -> aggregation, wired
//! together by [`analysis::AnalysisService`]. Everything below it depends on
//! the LLM only through the [`llm::AssessmentOracle`] seam.

pub mod aggregator;
pub mod analysis;
pub mod assessor;
pub mod coordinator;
pub mod extraction;
pub mod limiter;
pub mod llm;
pub mod retry;

pub use aggregator::aggregate;
pub use analysis::{AnalysisPhase, AnalysisService, ProgressFn, ProgressUpdate};
pub use assessor::CriterionAssessor;
pub use coordinator::{AssessmentBatch, AssessmentCoordinator, BatchProgressFn};
pub use extraction::{ClaimExtractionResult, ClaimExtractionService};
pub use limiter::ConcurrencyLimiter;
pub use llm::{AssessmentOracle, LlmClient, OracleError};
pub use retry::RetryPolicy;

/// Truncate a string to at most `max_chars` characters, never splitting a
/// code point
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;

    use crate::model::assessment::RawAssessmentPayload;
    use crate::model::claims::ExtractedClaimsPayload;
    use crate::service::llm::{AssessmentOracle, OracleError};

    /// Install a per-test log subscriber honoring `RUST_LOG`. Idempotent:
    /// later calls are no-ops once a subscriber is set.
    pub(crate) fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// Canned oracle for driving the services without a network
    pub(crate) struct MockOracle {
        extraction: Option<ExtractedClaimsPayload>,
        assessment: Option<RawAssessmentPayload>,
        fail_all: bool,
        fail_when_prompt_contains: Option<String>,
    }

    impl MockOracle {
        pub(crate) fn with_extraction(payload: ExtractedClaimsPayload) -> Self {
            Self {
                extraction: Some(payload),
                assessment: None,
                fail_all: false,
                fail_when_prompt_contains: None,
            }
        }

        pub(crate) fn with_assessment(payload: RawAssessmentPayload) -> Self {
            Self {
                extraction: None,
                assessment: Some(payload),
                fail_all: false,
                fail_when_prompt_contains: None,
            }
        }

        pub(crate) fn always_failing() -> Self {
            Self {
                extraction: None,
                assessment: None,
                fail_all: true,
                fail_when_prompt_contains: None,
            }
        }

        /// Fail any call whose prompt contains `needle`; other calls keep
        /// the canned responses
        pub(crate) fn failing_when_prompt_contains(mut self, needle: &str) -> Self {
            self.fail_when_prompt_contains = Some(needle.to_string());
            self
        }

        fn should_fail(&self, prompt: &str) -> bool {
            if self.fail_all {
                return true;
            }
            self.fail_when_prompt_contains
                .as_deref()
                .is_some_and(|needle| prompt.contains(needle))
        }
    }

    #[async_trait]
    impl AssessmentOracle for MockOracle {
        async fn extract_claims(
            &self,
            _system: &str,
            prompt: &str,
        ) -> Result<ExtractedClaimsPayload, OracleError> {
            if self.should_fail(prompt) {
                return Err(OracleError::CallFailed("mock extraction failure".to_string()));
            }
            Ok(self.extraction.clone().unwrap_or_default())
        }

        async fn assess_criterion(
            &self,
            _system: &str,
            prompt: &str,
        ) -> Result<RawAssessmentPayload, OracleError> {
            if self.should_fail(prompt) {
                return Err(OracleError::CallFailed("mock assessment failure".to_string()));
            }
            Ok(self.assessment.clone().unwrap_or_default())
        }
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(super::truncate_chars("héllo", 2), "hé");
        assert_eq!(super::truncate_chars("short", 100), "short");
        assert_eq!(super::truncate_chars("", 10), "");
    }
}
