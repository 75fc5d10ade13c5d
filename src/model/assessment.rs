//! Per-criterion assessment results and the raw oracle payload they are
//! decoded from

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::criteria::CriterionConfig;

/// Neutral midpoint score used whenever the oracle cannot provide one
pub const NEUTRAL_SCORE: u8 = 50;

/// Compliance status tiers derived from a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ComplianceStatus {
    Compliant,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl ComplianceStatus {
    /// Fixed three-tier thresholding: >= 75 compliant, >= 50 needs
    /// attention, otherwise high risk
    pub fn from_score(score: u8) -> Self {
        if score >= 75 {
            Self::Compliant
        } else if score >= 50 {
            Self::NeedsAttention
        } else {
            Self::HighRisk
        }
    }
}

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// One issue identified while assessing a criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Id of the claim the issue refers to; may be empty if the oracle did
    /// not attribute it
    pub claim_id: String,
    pub issue: String,
    pub severity: Severity,
}

/// Supporting evidence cited by an assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub quote: String,
    pub page_reference: String,
    /// Why this quote is relevant to the criterion
    pub context: String,
}

/// Outcome of assessing one criterion against the claim set.
///
/// Immutable once returned; consumed only by the aggregator. When `error`
/// is set the result is a synthesized neutral fallback, not a real
/// assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion_id: String,
    pub criterion_name: String,
    pub category_id: String,
    pub category_name: String,
    /// Always within [0, 100]
    pub score: u8,
    pub status: ComplianceStatus,
    pub rationale: String,
    pub findings: Vec<Finding>,
    pub recommendations: Vec<String>,
    pub evidence: Vec<Evidence>,
    /// Copied from the criterion configuration
    pub weight: f64,
    pub duration: Duration,
    /// Set when the oracle could not be reached or parsed after retries
    pub error: Option<String>,
}

impl CriterionResult {
    /// Neutral result shell carrying the criterion identity and weight
    fn neutral(criterion: &CriterionConfig, rationale: String, duration: Duration) -> Self {
        Self {
            criterion_id: criterion.id.clone(),
            criterion_name: criterion.name.clone(),
            category_id: criterion.category_id.clone(),
            category_name: criterion.category_name.clone(),
            score: NEUTRAL_SCORE,
            status: ComplianceStatus::NeedsAttention,
            rationale,
            findings: Vec::new(),
            recommendations: Vec::new(),
            evidence: Vec::new(),
            weight: criterion.weight,
            duration,
            error: None,
        }
    }

    /// Deliberate neutral default for a run where no claims were extracted:
    /// absence of evidence is neither rewarded nor penalized.
    pub fn no_claims(criterion: &CriterionConfig, duration: Duration) -> Self {
        let mut result = Self::neutral(
            criterion,
            "No environmental claims were extracted from this document. Unable to \
             assess compliance. Manual review recommended."
                .to_string(),
            duration,
        );
        result.recommendations = vec![
            "Manual review of document recommended".to_string(),
            "Ensure document contains extractable text".to_string(),
        ];
        result
    }

    /// Fallback produced when the oracle fails after all retries. Identical
    /// in shape to a real assessment but distinguishable via `error`.
    pub fn fallback(criterion: &CriterionConfig, error: String, duration: Duration) -> Self {
        let mut result = Self::neutral(
            criterion,
            "Assessment failed due to technical error. Manual review recommended."
                .to_string(),
            duration,
        );
        result.recommendations = vec!["Manual review recommended due to assessment error".to_string()];
        result.error = Some(error);
        result
    }
}

/// Raw per-criterion assessment payload returned by the oracle.
///
/// Untrusted and partially specified: every field is explicitly defaulted
/// when converting into a [`CriterionResult`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RawAssessmentPayload {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub status: Option<ComplianceStatus>,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default)]
    pub findings: Vec<RawFinding>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub evidence_used: Vec<RawEvidence>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RawFinding {
    #[serde(default)]
    pub claim_id: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RawEvidence {
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub page_reference: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_thresholds_are_inclusive() {
        assert_eq!(ComplianceStatus::from_score(100), ComplianceStatus::Compliant);
        assert_eq!(ComplianceStatus::from_score(75), ComplianceStatus::Compliant);
        assert_eq!(
            ComplianceStatus::from_score(74),
            ComplianceStatus::NeedsAttention
        );
        assert_eq!(
            ComplianceStatus::from_score(50),
            ComplianceStatus::NeedsAttention
        );
        assert_eq!(ComplianceStatus::from_score(49), ComplianceStatus::HighRisk);
        assert_eq!(ComplianceStatus::from_score(0), ComplianceStatus::HighRisk);
    }

    #[test]
    fn status_serializes_with_display_names() {
        assert_eq!(
            serde_json::to_value(ComplianceStatus::NeedsAttention).unwrap(),
            serde_json::json!("Needs Attention")
        );
        let status: ComplianceStatus =
            serde_json::from_value(serde_json::json!("High Risk")).unwrap();
        assert_eq!(status, ComplianceStatus::HighRisk);
    }

    #[test]
    fn raw_payload_defaults_every_field() {
        let payload: RawAssessmentPayload =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(payload.score.is_none());
        assert!(payload.status.is_none());
        assert!(payload.findings.is_empty());
        assert!(payload.recommendations.is_empty());
        assert!(payload.evidence_used.is_empty());
    }
}
