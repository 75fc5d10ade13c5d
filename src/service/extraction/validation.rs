//! Quality checks for LLM-extracted claims
//!
//! The oracle's quotes and flags are untrusted: grounding checks verify
//! that each quote actually appears in the source document, and the vague
//! term scan catches marketing language the oracle forgot to flag.
//! Problems here are warnings, never fatal to the run.

use crate::model::claims::Claim;

/// Canonical vague marketing terms that require substantiation
pub const VAGUE_TERMS: &[&str] = &[
    "sustainable",
    "eco-friendly",
    "green",
    "natural",
    "clean",
    "environmentally friendly",
    "earth-friendly",
    "non-toxic",
    "nature-positive",
];

/// Result of validating one extraction run
#[derive(Debug, Default)]
pub struct ExtractionValidation {
    /// Quality issues worth logging; the claims remain usable
    pub warnings: Vec<String>,
}

/// Validate extracted claims against the source document.
///
/// Checks:
/// 1. Claim text appears in the document (grounding, whitespace-normalized)
/// 2. Claim text is substantive (>= 10 characters)
pub fn validate_claims(claims: &[Claim], document_text: &str) -> ExtractionValidation {
    let mut validation = ExtractionValidation::default();
    let normalized_doc = normalize_whitespace(&document_text.to_lowercase());

    for claim in claims {
        if claim.text.trim().len() < 10 {
            validation.warnings.push(format!(
                "Claim {} text is too short to be a meaningful assertion: '{}'",
                claim.id, claim.text
            ));
            continue;
        }

        let normalized_text = normalize_whitespace(&claim.text.to_lowercase());
        if !normalized_doc.contains(&normalized_text) {
            validation.warnings.push(format!(
                "Claim {} quote not found in document: '{}'",
                claim.id,
                claim.text.chars().take(100).collect::<String>()
            ));
        }
    }

    validation
}

/// Vague terms present in the claim text that the oracle did not flag
pub fn missed_vague_terms(claim: &Claim) -> Vec<String> {
    let text_lower = claim.text.to_lowercase();
    let flagged_lower: Vec<String> = claim
        .vagueness_flags
        .iter()
        .map(|f| f.to_lowercase())
        .collect();

    VAGUE_TERMS
        .iter()
        .filter(|term| {
            contains_word(&text_lower, term) && !flagged_lower.iter().any(|f| f.contains(*term))
        })
        .map(|term| term.to_string())
        .collect()
}

/// Whole-word containment check so "green" does not match "evergreen"
fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric() && c != '-')
        .any(|token| token == word)
        || (word.contains(' ') && text.contains(word))
}

/// Collapse runs of whitespace for comparison
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::claims::{ClaimCategory, ClaimKind, SourceLocation};

    fn claim(text: &str, flags: Vec<String>) -> Claim {
        Claim {
            id: "claim_1".to_string(),
            text: text.to_string(),
            location: SourceLocation::Page(1),
            section: "Sustainability".to_string(),
            category: ClaimCategory::GeneralSustainability,
            kind: ClaimKind::Factual,
            vagueness_flags: flags,
        }
    }

    #[test]
    fn grounded_claim_produces_no_warnings() {
        let document = "Our operations reduced   Scope 1 emissions by 23% since 2019.";
        let claims = vec![claim("Our operations reduced Scope 1 emissions by 23%", vec![])];
        let validation = validate_claims(&claims, document);
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn ungrounded_quote_is_flagged() {
        let document = "Completely unrelated content.";
        let claims = vec![claim("We achieved net-zero across all facilities", vec![])];
        let validation = validate_claims(&claims, document);
        assert_eq!(validation.warnings.len(), 1);
        assert!(validation.warnings[0].contains("not found in document"));
    }

    #[test]
    fn unflagged_vague_terms_are_detected() {
        let c = claim("Our green packaging is fully sustainable", vec![]);
        let missed = missed_vague_terms(&c);
        assert!(missed.contains(&"green".to_string()));
        assert!(missed.contains(&"sustainable".to_string()));
    }

    #[test]
    fn already_flagged_terms_are_not_repeated() {
        let c = claim(
            "Our green packaging is fully sustainable",
            vec!["green".to_string(), "sustainable".to_string()],
        );
        assert!(missed_vague_terms(&c).is_empty());
    }

    #[test]
    fn vague_term_matching_is_whole_word() {
        let c = claim("Our evergreen product line expanded this year", vec![]);
        assert!(!missed_vague_terms(&c).contains(&"green".to_string()));
    }
}
