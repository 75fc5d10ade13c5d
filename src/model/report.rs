//! Aggregated compliance report produced at the end of a run

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::assessment::{ComplianceStatus, CriterionResult, Severity};

/// Overall risk tier for the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskTier {
    /// Same thresholds as [`ComplianceStatus`], inclusive at the boundaries
    pub fn from_score(score: u8) -> Self {
        if score >= 75 {
            Self::Low
        } else if score >= 50 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        };
        f.write_str(label)
    }
}

/// Enforcement risk tier in the legal assessment block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnforcementRisk {
    Low,
    Medium,
    High,
}

/// Weighted rollup of all criterion results sharing a parent category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub id: String,
    pub name: String,
    /// Weighted mean of constituent scores, rounded to nearest integer
    pub score: u8,
    pub status: ComplianceStatus,
    pub summary: String,
    pub criteria: Vec<CriterionResult>,
}

/// A notable area of strong compliance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strength {
    pub title: String,
    pub description: String,
    pub evidence: String,
    pub page_reference: String,
}

/// A high-severity issue surfaced for the report's critical-issue list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalIssue {
    pub title: String,
    pub description: String,
    /// Name of the category the originating criterion belongs to
    pub category: String,
    /// Text of the referenced claim, if the claim id resolved
    pub evidence: String,
    pub page_reference: String,
    pub recommendation: String,
    pub severity: Severity,
}

/// Deterministic legal and operational risk block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalRiskAssessment {
    pub penalty_exposure: String,
    pub enforcement_risk: EnforcementRisk,
    /// Prioritized remediation actions, at most five
    pub priority_actions: Vec<String>,
}

/// Timing and success/failure accounting for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub extraction_duration: Duration,
    pub assessment_duration: Duration,
    pub aggregation_duration: Duration,
    /// Sum of the three phase durations
    pub total_duration: Duration,
    pub criteria_succeeded: usize,
    pub criteria_failed: usize,
}

/// Final output of a run. Produced once by the aggregator from immutable
/// criterion results and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedReport {
    /// Unweighted mean of category scores; categories are peers
    pub overall_score: u8,
    pub risk_tier: RiskTier,
    pub executive_summary: String,
    pub total_claims_analyzed: usize,
    /// Sorted ascending by category id for deterministic ordering
    pub category_scores: Vec<CategoryScore>,
    pub key_strengths: Vec<Strength>,
    /// Capped at ten entries
    pub critical_issues: Vec<CriticalIssue>,
    pub legal_risk: LegalRiskAssessment,
    pub metadata: ReportMetadata,
    pub generated_at: DateTime<Utc>,
}
