//! Conversion of untrusted oracle payloads into criterion results
//!
//! Every field of the raw payload is explicitly defaulted here so the rest
//! of the engine never sees a partially-specified assessment.

use std::time::Duration;

use crate::model::assessment::{
    ComplianceStatus, CriterionResult, Evidence, Finding, NEUTRAL_SCORE, RawAssessmentPayload,
    RawEvidence, RawFinding, Severity,
};
use crate::model::criteria::CriterionConfig;

/// Clamp an untrusted score to [0, 100], defaulting non-finite values to
/// the neutral midpoint
fn clamp_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return NEUTRAL_SCORE;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

fn convert_finding(raw: RawFinding) -> Option<Finding> {
    let issue = raw.issue.filter(|i| !i.trim().is_empty())?;
    Some(Finding {
        claim_id: raw.claim_id.unwrap_or_default(),
        issue,
        severity: raw.severity.unwrap_or(Severity::Medium),
    })
}

fn convert_evidence(raw: RawEvidence) -> Option<Evidence> {
    let quote = raw.quote.filter(|q| !q.trim().is_empty())?;
    Some(Evidence {
        quote,
        page_reference: raw.page_reference.unwrap_or_default(),
        context: raw.context.unwrap_or_default(),
    })
}

/// Build a criterion result from a successfully parsed oracle payload.
///
/// The numeric score is authoritative: when the oracle omits its own status
/// classification the status is derived from the score.
pub fn result_from_payload(
    criterion: &CriterionConfig,
    payload: RawAssessmentPayload,
    duration: Duration,
) -> CriterionResult {
    let score = payload.score.map(clamp_score).unwrap_or(NEUTRAL_SCORE);
    let status = payload
        .status
        .unwrap_or_else(|| ComplianceStatus::from_score(score));

    CriterionResult {
        criterion_id: criterion.id.clone(),
        criterion_name: criterion.name.clone(),
        category_id: criterion.category_id.clone(),
        category_name: criterion.category_name.clone(),
        score,
        status,
        rationale: payload
            .rationale
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| "Assessment completed".to_string()),
        findings: payload.findings.into_iter().filter_map(convert_finding).collect(),
        recommendations: payload
            .recommendations
            .into_iter()
            .filter(|r| !r.trim().is_empty())
            .collect(),
        evidence: payload
            .evidence_used
            .into_iter()
            .filter_map(convert_evidence)
            .collect(),
        weight: criterion.weight,
        duration,
        error: None,
    }
}
