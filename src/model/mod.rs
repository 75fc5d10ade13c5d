pub mod assessment;
pub mod claims;
pub mod config;
pub mod criteria;
pub mod report;

pub use assessment::{
    ComplianceStatus, CriterionResult, Evidence, Finding, NEUTRAL_SCORE, RawAssessmentPayload,
    RawEvidence, RawFinding, Severity,
};
pub use claims::{
    Claim, ClaimCategory, ClaimKind, ExtractedClaimPayload, ExtractedClaimsPayload, SourceLocation,
};
pub use config::{ConfigFile, EngineConfig};
pub use criteria::{CriterionConfig, default_criteria};
pub use report::{
    AggregatedReport, CategoryScore, CriticalIssue, EnforcementRisk, LegalRiskAssessment,
    ReportMetadata, RiskTier, Strength,
};
