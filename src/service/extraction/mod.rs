//! Claim extraction service
//!
//! Sends the document text to the oracle once and normalizes the untrusted
//! payload into an immutable claim set. Extraction failure after retries is
//! non-fatal: the run continues with zero claims and downstream assessment
//! takes its neutral zero-claim branch.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::model::claims::{Claim, ExtractedClaimPayload, SourceLocation};
use crate::model::config::EngineConfig;
use crate::service::llm::{AssessmentOracle, OracleError};
use crate::service::retry::{RetryPolicy, run_with_retry};
use crate::service::truncate_chars;

pub mod prompts;
pub mod validation;

use prompts::{EXTRACTION_SYSTEM_PROMPT, build_extraction_prompt};
use validation::{missed_vague_terms, validate_claims};

/// Coverage label used when extraction fails after all retries
const COVERAGE_FAILED: &str = "Extraction failed";

/// Outcome of one extraction run
#[derive(Debug, Clone)]
pub struct ClaimExtractionResult {
    pub claims: Vec<Claim>,
    pub total_claims_found: usize,
    /// Oracle's summary of the sustainability topics covered
    pub document_coverage: String,
    pub duration: Duration,
}

/// Service for extracting environmental claims from document text
pub struct ClaimExtractionService {
    oracle: Arc<dyn AssessmentOracle>,
    retry: RetryPolicy,
    timeout: Duration,
    max_document_chars: usize,
}

impl ClaimExtractionService {
    pub fn new(oracle: Arc<dyn AssessmentOracle>, config: &EngineConfig) -> Self {
        Self {
            oracle,
            retry: RetryPolicy::new(config.max_retries, config.retry_base_delay),
            timeout: config.extraction_timeout,
            max_document_chars: config.max_document_chars,
        }
    }

    /// Extract every environmental claim from `document_text` in a single
    /// oracle request. Never fails: retry exhaustion yields an empty claim
    /// set with a failure coverage label.
    pub async fn extract(&self, document_text: &str) -> ClaimExtractionResult {
        let start = Instant::now();

        let truncated = truncate_chars(document_text, self.max_document_chars);
        let prompt = build_extraction_prompt(truncated);

        tracing::debug!(
            prompt_length = prompt.len(),
            content_length = truncated.len(),
            "Initiating oracle call for claim extraction"
        );

        let outcome = run_with_retry("claim_extraction", self.retry, || {
            let prompt = &prompt;
            async move {
                match tokio::time::timeout(
                    self.timeout,
                    self.oracle.extract_claims(EXTRACTION_SYSTEM_PROMPT, prompt),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => Err(OracleError::Timeout(self.timeout)),
                }
            }
        })
        .await;

        let duration = start.elapsed();

        match outcome {
            Ok(payload) => {
                let reported_total = payload.total_claims_found;
                let document_coverage = payload
                    .document_coverage
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| "Unknown".to_string());

                let mut claims = normalize_claims(payload.claims);

                // Grounding and quality checks are advisory only
                let validation = validate_claims(&claims, document_text);
                for warning in &validation.warnings {
                    tracing::warn!(warning = %warning, "Claim extraction quality warning");
                }

                // Catch vague marketing terms the oracle did not flag
                for claim in &mut claims {
                    let missed = missed_vague_terms(claim);
                    if !missed.is_empty() {
                        tracing::debug!(
                            claim_id = %claim.id,
                            terms = ?missed,
                            "Flagging vague terms missed by the oracle"
                        );
                        claim.vagueness_flags.extend(missed);
                    }
                }

                let total_claims_found = reported_total
                    .map(|n| n as usize)
                    .unwrap_or(claims.len())
                    .max(claims.len());

                tracing::info!(
                    claims_extracted = claims.len(),
                    elapsed_ms = duration.as_millis() as u64,
                    "Claim extraction completed"
                );

                ClaimExtractionResult {
                    claims,
                    total_claims_found,
                    document_coverage,
                    duration,
                }
            }
            Err(e) => {
                tracing::error!(
                    elapsed_ms = duration.as_millis() as u64,
                    error = %e,
                    "Claim extraction failed after retries, continuing with zero claims"
                );
                ClaimExtractionResult {
                    claims: Vec::new(),
                    total_claims_found: 0,
                    document_coverage: COVERAGE_FAILED.to_string(),
                    duration,
                }
            }
        }
    }
}

/// Normalize raw payload claims into domain claims: drop entries without
/// text, guarantee unique ids, and default every absent field.
fn normalize_claims(raw_claims: Vec<ExtractedClaimPayload>) -> Vec<Claim> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut claims = Vec::with_capacity(raw_claims.len());

    for (index, raw) in raw_claims.into_iter().enumerate() {
        let text = match raw.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                tracing::debug!(index, "Dropping extracted claim without text");
                continue;
            }
        };

        let provided = raw.id.filter(|id| !id.trim().is_empty());
        let id = match provided {
            Some(id) if !seen_ids.contains(&id) => id,
            _ => {
                let mut n = index + 1;
                let mut candidate = format!("claim_{n}");
                while seen_ids.contains(&candidate) {
                    n += 1;
                    candidate = format!("claim_{n}");
                }
                candidate
            }
        };
        seen_ids.insert(id.clone());

        claims.push(Claim {
            id,
            text,
            location: raw
                .page
                .map(SourceLocation::Page)
                .unwrap_or(SourceLocation::Visual),
            section: raw
                .section
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Unspecified".to_string()),
            category: raw.category.unwrap_or_default(),
            kind: raw.claim_type.unwrap_or_default(),
            vagueness_flags: raw.vagueness_flags,
        });
    }

    claims
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::claims::{ClaimCategory, ExtractedClaimsPayload};
    use crate::service::test_support::MockOracle;

    fn raw_claim(id: Option<&str>, text: &str) -> ExtractedClaimPayload {
        ExtractedClaimPayload {
            id: id.map(str::to_string),
            text: Some(text.to_string()),
            page: Some(1),
            section: Some("Environment".to_string()),
            ..ExtractedClaimPayload::default()
        }
    }

    #[test]
    fn normalization_guarantees_unique_ids() {
        let claims = normalize_claims(vec![
            raw_claim(Some("claim_1"), "We cut emissions by 10%"),
            raw_claim(Some("claim_1"), "We use 40% renewable energy"),
            raw_claim(None, "We are ISO 14001 certified"),
        ]);

        assert_eq!(claims.len(), 3);
        let ids: HashSet<_> = claims.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(claims[0].id, "claim_1");
    }

    #[test]
    fn normalization_drops_textless_claims_and_defaults_fields() {
        let mut no_text = ExtractedClaimPayload::default();
        no_text.id = Some("claim_9".to_string());

        let mut minimal = ExtractedClaimPayload::default();
        minimal.text = Some("Carbon neutral since 2020".to_string());

        let claims = normalize_claims(vec![no_text, minimal]);
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].location, SourceLocation::Visual);
        assert_eq!(claims[0].section, "Unspecified");
        assert_eq!(claims[0].category, ClaimCategory::GeneralSustainability);
    }

    #[tokio::test]
    async fn successful_extraction_normalizes_payload() {
        let payload = ExtractedClaimsPayload {
            claims: vec![raw_claim(Some("claim_1"), "Our green packaging cut waste by 30%")],
            total_claims_found: None,
            document_coverage: Some("Waste reduction".to_string()),
        };
        let oracle = Arc::new(MockOracle::with_extraction(payload));
        let service = ClaimExtractionService::new(oracle, &EngineConfig::default());

        let result = service
            .extract("Our green packaging cut waste by 30% this year.")
            .await;

        assert_eq!(result.claims.len(), 1);
        assert_eq!(result.total_claims_found, 1);
        assert_eq!(result.document_coverage, "Waste reduction");
        // "green" was not flagged by the oracle but appears in the text
        assert!(
            result.claims[0]
                .vagueness_flags
                .contains(&"green".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn failed_extraction_degrades_to_empty_claims() {
        crate::service::test_support::init_tracing();
        let oracle = Arc::new(MockOracle::always_failing());
        let service = ClaimExtractionService::new(oracle, &EngineConfig::default());

        let result = service.extract("Any document text at all.").await;

        assert!(result.claims.is_empty());
        assert_eq!(result.total_claims_found, 0);
        assert_eq!(result.document_coverage, "Extraction failed");
    }
}
