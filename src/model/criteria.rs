//! Assessment criteria configuration
//!
//! A criterion is one evaluable question belonging to a parent category
//! (a "principle"). The default set covers the Competition Bureau's six
//! principles for environmental claims under Bill C-59.

use serde::{Deserialize, Serialize};

fn default_weight() -> f64 {
    1.0
}

/// Static configuration for one evaluable criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionConfig {
    /// Unique within a configuration set
    pub id: String,
    pub name: String,
    /// Identifier of the parent category ("principle")
    pub category_id: String,
    pub category_name: String,
    /// Prompt body describing what the criterion evaluates
    pub description: String,
    /// Relative weight within the parent category, must be positive
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn criterion(
    id: &str,
    name: &str,
    category_id: &str,
    category_name: &str,
    description: &str,
) -> CriterionConfig {
    CriterionConfig {
        id: id.to_string(),
        name: name.to_string(),
        category_id: category_id.to_string(),
        category_name: category_name.to_string(),
        description: description.to_string(),
        weight: 1.0,
    }
}

/// Default criteria set: the Competition Bureau's six principles for
/// environmental claims, three criteria each.
pub fn default_criteria() -> Vec<CriterionConfig> {
    const P1: (&str, &str) = ("principle1_truthful", "Principle 1: Be Truthful");
    const P2: (&str, &str) = ("principle2_substantiated", "Principle 2: Be Substantiated");
    const P3: (&str, &str) = (
        "principle3_specific",
        "Principle 3: Be Specific About Comparisons",
    );
    const P4: (&str, &str) = ("principle4_proportionate", "Principle 4: Be Proportionate");
    const P5: (&str, &str) = (
        "principle5_clear",
        "Principle 5: When in Doubt, Spell it Out",
    );
    const P6: (&str, &str) = (
        "principle6_future",
        "Principle 6: Substantiate Future Claims",
    );

    vec![
        criterion(
            "literal_accuracy",
            "Literal Accuracy",
            P1.0,
            P1.1,
            "The literal meaning of all environmental claims must be accurate and \
             verifiable. Under Bill C-59, businesses face penalties up to $10M \
             (individuals) or $15M (corporations) for false claims.",
        ),
        criterion(
            "general_impression",
            "General Impression",
            P1.0,
            P1.1,
            "The overall impression created by environmental claims must match actual \
             environmental performance. The Competition Bureau assesses both literal \
             meaning and the general impression conveyed to consumers.",
        ),
        criterion(
            "no_exaggeration",
            "No Exaggeration",
            P1.0,
            P1.1,
            "Claims must not overstate environmental benefits or achievements. Even \
             technically true statements can mislead if they create an exaggerated \
             impression.",
        ),
        criterion(
            "adequate_testing",
            "Adequate Testing",
            P2.0,
            P2.1,
            "Environmental claims must be based on adequate and proper testing \
             conducted before the claim was made. Testing must be fit, apt, and \
             suitable for the circumstances of the claim.",
        ),
        criterion(
            "recognized_methodology",
            "Recognized Methodology",
            P2.0,
            P2.1,
            "Business activity claims such as emissions reductions or net-zero \
             commitments must use internationally recognized methodology such as the \
             GHG Protocol, ISO standards, or Science Based Targets.",
        ),
        criterion(
            "third_party_verification",
            "Third-Party Verification",
            P2.0,
            P2.1,
            "Where internationally recognized methodology requires third-party \
             verification, such verification must be obtained. Independent \
             verification adds credibility and reduces legal risk.",
        ),
        criterion(
            "comparison_basis",
            "Clear Comparison Basis",
            P3.0,
            P3.1,
            "Comparative claims such as \"50% less emissions\" must clearly specify \
             what is being compared: previous version, competitor product, industry \
             average, or regulatory baseline.",
        ),
        criterion(
            "extent_of_difference",
            "Extent of Difference",
            P3.0,
            P3.1,
            "Claims must clearly state the extent of environmental difference or \
             improvement. Vague comparisons like \"better for the environment\" \
             without quantification are problematic.",
        ),
        criterion(
            "fair_comparisons",
            "Fair Comparisons",
            P3.0,
            P3.1,
            "Comparisons should be against relevant alternatives, not outdated \
             products, cherry-picked competitors, or irrelevant benchmarks.",
        ),
        criterion(
            "proportionate_claims",
            "Proportionate Claims",
            P4.0,
            P4.1,
            "Environmental marketing should be proportionate to actual environmental \
             benefit. A 2% reduction should not be marketed as a major environmental \
             achievement.",
        ),
        criterion(
            "materiality",
            "Materiality of Claims",
            P4.0,
            P4.1,
            "Claims should focus on material environmental improvements that make a \
             meaningful difference, not trivial changes with negligible impact.",
        ),
        criterion(
            "no_cherry_picking",
            "No Cherry-Picking",
            P4.0,
            P4.1,
            "Organizations should not highlight minor environmental positives while \
             ignoring significant environmental negatives or trade-offs in their \
             operations.",
        ),
        criterion(
            "avoid_vague_terms",
            "Avoid Vague Terms",
            P5.0,
            P5.1,
            "Avoid vague terms like \"eco-friendly\", \"green\", or \"sustainable\" \
             without specific substantiation. ISO 14021 explicitly prohibits such \
             unqualified claims.",
        ),
        criterion(
            "scope_clarity",
            "Scope Clarity",
            P5.0,
            P5.1,
            "Be transparent about whether environmental claims apply to the whole \
             product or business or just part of it. Claims about packaging should \
             not imply the entire product is environmentally friendly.",
        ),
        criterion(
            "accessible_information",
            "Accessible Information",
            P5.0,
            P5.1,
            "Supporting information and substantiation should be readily accessible \
             to consumers, not buried in fine print or hard-to-find documents.",
        ),
        criterion(
            "concrete_plan",
            "Concrete Plan",
            P6.0,
            P6.1,
            "Net-zero and other future environmental commitments must be supported by \
             a clear, concrete plan showing how the goal will be achieved, not just \
             aspirational statements.",
        ),
        criterion(
            "interim_targets",
            "Interim Targets",
            P6.0,
            P6.1,
            "Long-term environmental commitments should include interim targets and \
             milestones that allow progress to be tracked and verified over time.",
        ),
        criterion(
            "meaningful_steps",
            "Meaningful Steps Underway",
            P6.0,
            P6.1,
            "Organizations making future environmental claims should demonstrate \
             meaningful steps already underway, not just future intentions.",
        ),
    ]
}
