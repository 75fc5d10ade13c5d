//! Claim domain model and LLM extraction payloads

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fixed set of environmental claim categories.
///
/// Unknown category strings returned by the LLM fall back to
/// `GeneralSustainability` rather than failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClaimCategory {
    CarbonEmissions,
    NetZero,
    RenewableEnergy,
    WasteReduction,
    WaterConservation,
    Biodiversity,
    SustainableSourcing,
    Certifications,
    #[serde(other)]
    GeneralSustainability,
}

impl Default for ClaimCategory {
    fn default() -> Self {
        Self::GeneralSustainability
    }
}

/// Kind of assertion a claim makes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    Factual,
    Commitment,
    Comparison,
}

impl Default for ClaimKind {
    fn default() -> Self {
        Self::Factual
    }
}

/// Where in the source document a claim was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLocation {
    /// Page number in the extracted text
    Page(u32),
    /// Claim came from a visual element (chart, image) rather than page text
    Visual,
}

impl SourceLocation {
    /// Human-readable label used in reports and evidence references
    pub fn label(&self) -> String {
        match self {
            Self::Page(page) => format!("Page {page}"),
            Self::Visual => "Visual element".to_string(),
        }
    }
}

/// An atomic extracted environmental assertion.
///
/// Created once per extraction run and never mutated; every criterion
/// assessment reads the same shared claim set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique within one extraction run
    pub id: String,
    /// Exact quote from the document
    pub text: String,
    pub location: SourceLocation,
    /// Section header or surrounding context label
    pub section: String,
    pub category: ClaimCategory,
    pub kind: ClaimKind,
    /// Vague or undefined marketing terms flagged in the claim text
    pub vagueness_flags: Vec<String>,
}

/// Raw claim extraction payload returned by the oracle.
///
/// Untrusted: every field is optional or defaulted and normalized into
/// [`Claim`] values at the extraction boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedClaimsPayload {
    #[serde(default)]
    pub claims: Vec<ExtractedClaimPayload>,
    #[serde(default)]
    pub total_claims_found: Option<u32>,
    #[serde(default)]
    pub document_coverage: Option<String>,
}

/// One raw claim as returned by the oracle
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedClaimPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Page number; absent for claims derived from visual elements
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub category: Option<ClaimCategory>,
    #[serde(default)]
    pub claim_type: Option<ClaimKind>,
    #[serde(default)]
    pub vagueness_flags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_defaults_to_general_sustainability() {
        let category: ClaimCategory =
            serde_json::from_value(serde_json::json!("regenerative_agriculture")).unwrap();
        assert_eq!(category, ClaimCategory::GeneralSustainability);
    }

    #[test]
    fn known_category_round_trips() {
        let category: ClaimCategory =
            serde_json::from_value(serde_json::json!("carbon_emissions")).unwrap();
        assert_eq!(category, ClaimCategory::CarbonEmissions);
        assert_eq!(
            serde_json::to_value(category).unwrap(),
            serde_json::json!("carbon_emissions")
        );
    }

    #[test]
    fn payload_tolerates_missing_fields() {
        let payload: ExtractedClaimsPayload = serde_json::from_value(serde_json::json!({
            "claims": [{ "text": "We are carbon neutral" }]
        }))
        .unwrap();

        assert_eq!(payload.claims.len(), 1);
        assert!(payload.claims[0].id.is_none());
        assert!(payload.claims[0].page.is_none());
        assert!(payload.claims[0].vagueness_flags.is_empty());
        assert!(payload.document_coverage.is_none());
    }

    #[test]
    fn source_location_labels() {
        assert_eq!(SourceLocation::Page(3).label(), "Page 3");
        assert_eq!(SourceLocation::Visual.label(), "Visual element");
    }
}
