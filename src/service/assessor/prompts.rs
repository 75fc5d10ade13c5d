//! Prompts for per-criterion assessment

use crate::model::claims::Claim;
use crate::model::criteria::CriterionConfig;
use crate::service::truncate_chars;

/// Fixed 0-100 scoring rubric shared by every criterion
const SCORING_RUBRIC: &str = r#"SCORING GUIDE (0-100 scale):
- 90-100: Fully compliant, exemplary practices with strong evidence
- 75-89: Generally compliant with minor improvements needed
- 50-74: Needs attention, several issues identified
- 25-49: High risk, significant compliance gaps
- 0-24: Critical issues, likely non-compliant with Bill C-59"#;

/// System prompt scoped to one criterion
pub fn build_assessor_system_prompt(criterion: &CriterionConfig) -> String {
    format!(
        "You are an expert in Canadian environmental law, Bill C-59 greenwashing \
         provisions, and the Competition Bureau's guidelines for environmental \
         claims. Focus specifically on assessing {} for \"{}\". Your output must \
         be structured JSON only and conform to the requested schema.",
        criterion.name, criterion.category_name
    )
}

/// Build the assessment prompt for one criterion over the shared claim set.
///
/// Claims are truncated to `max_claims` and the document context to
/// `max_context_chars` to respect oracle input limits.
pub fn build_assessment_prompt(
    criterion: &CriterionConfig,
    claims: &[Claim],
    document_context: &str,
    max_claims: usize,
    max_context_chars: usize,
) -> String {
    let bounded: Vec<&Claim> = claims.iter().take(max_claims).collect();
    let claims_json =
        serde_json::to_string_pretty(&bounded).unwrap_or_else(|_| "[]".to_string());
    let context = truncate_chars(document_context, max_context_chars);

    format!(
        r#"TASK: Assess the following environmental claims against ONE specific criterion.

PRINCIPLE: {category_name}
CRITERION: {name} (id: {id})
DESCRIPTION: {description}

{rubric}

EVALUATION STEPS (Chain of Thought):
1. Review each claim against this specific criterion
2. Identify any issues or concerns related to {name}
3. Note supporting evidence or lack thereof
4. Consider the severity of any violations under Canadian law
5. Assign a score with detailed justification

CLAIMS TO EVALUATE:
{claims_json}

ADDITIONAL DOCUMENT CONTEXT:
{context}

Return JSON:
{{
  "score": 0,
  "status": "Compliant|Needs Attention|High Risk",
  "rationale": "detailed explanation of the score with specific references to claims",
  "findings": [
    {{
      "claim_id": "reference to claim id",
      "issue": "description of the issue",
      "severity": "High|Medium|Low"
    }}
  ],
  "recommendations": ["specific actionable recommendations"],
  "evidence_used": [
    {{
      "quote": "supporting quote from claims",
      "page_reference": "Page X",
      "context": "why this is relevant"
    }}
  ]
}}"#,
        category_name = criterion.category_name,
        name = criterion.name,
        id = criterion.id,
        description = criterion.description,
        rubric = SCORING_RUBRIC,
        claims_json = claims_json,
        context = context,
    )
}
