//! Greenwashing compliance analysis engine
//!
//! Analyzes corporate sustainability documents against the Competition
//! Bureau's six principles for environmental claims (Bill C-59). The
//! pipeline extracts every environmental claim in one LLM request, assesses
//! each configured criterion concurrently under a shared rate limit, and
//! deterministically aggregates the per-criterion results into a scored
//! compliance report.
//!
//! The engine never fails outright: extraction errors degrade to an empty
//! claim set, assessment errors degrade to neutral fallback results, and
//! aggregation is pure. Callers always receive a report, with failures
//! recorded per criterion in its metadata.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use greenwash_intel::model::config::EngineConfig;
//! use greenwash_intel::model::criteria::default_criteria;
//! use greenwash_intel::service::{AnalysisService, LlmClient};
//!
//! # async fn run() -> Result<(), String> {
//! let oracle = Arc::new(LlmClient::from_env()?);
//! let service = AnalysisService::new(oracle, &EngineConfig::default());
//! let report = service
//!     .run("document text", &default_criteria(), None, None)
//!     .await;
//! println!("overall: {}/100 ({})", report.overall_score, report.risk_tier);
//! # Ok(())
//! # }
//! ```

pub mod model;
pub mod service;

pub use model::assessment::{ComplianceStatus, CriterionResult, Severity};
pub use model::claims::{Claim, ClaimCategory, ClaimKind, SourceLocation};
pub use model::config::EngineConfig;
pub use model::criteria::{CriterionConfig, default_criteria};
pub use model::report::{AggregatedReport, RiskTier};
pub use service::{AnalysisService, AssessmentOracle, LlmClient, OracleError};
