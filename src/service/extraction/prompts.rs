//! Prompts for claim extraction

/// System prompt for claim extraction
pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are an expert at extracting environmental and sustainability claims from corporate documents.

Be thorough and extract ALL claims, even minor ones. Quote claim text exactly
as it appears in the document. Your output must be structured JSON only and
conform to the requested schema."#;

/// Build the extraction prompt over the (already truncated) document text
pub fn build_extraction_prompt(document_text: &str) -> String {
    format!(
        r#"TASK: Extract ALL environmental and sustainability claims from the following document text.

WHAT TO EXTRACT (be thorough - extract EVERY claim you find):
- Emission reduction claims (carbon, GHG, CO2, methane, Scope 1/2/3)
- Net-zero or carbon neutral commitments
- Renewable energy usage or targets
- Recycling, waste reduction, circular economy claims
- Water conservation claims
- Biodiversity or nature-positive claims
- Sustainable sourcing claims
- ESG performance claims
- Percentage improvements or reductions
- Future commitments or targets with dates
- Certifications (ISO 14001, B Corp, LEED, SBTi, etc.)
- Awards or recognition for sustainability
- Environmental impact statements and climate-related disclosures
- Sustainability goals and targets

WHAT TO EXCLUDE:
- General company values without specific claims
- Purely aspirational statements without any commitment
- Non-environmental business claims

FOR EACH CLAIM:
1. Quote the EXACT text from the document
2. Note the page number if available; omit it for claims taken from charts or images
3. Identify the section/header context
4. Categorize the claim: carbon_emissions, net_zero, renewable_energy, waste_reduction, water_conservation, biodiversity, sustainable_sourcing, certifications, or general_sustainability
5. Classify the claim type: factual, commitment, or comparison
6. Flag any vague or undefined terms (like "sustainable", "eco-friendly", "green", "natural", "clean")

IMPORTANT: Even if a claim seems well-substantiated, EXTRACT IT. We need ALL claims for assessment.

DOCUMENT TEXT:
{document_text}

Return JSON:
{{
  "claims": [
    {{
      "id": "claim_1",
      "text": "exact quote from document",
      "page": 1,
      "section": "section header or context",
      "category": "carbon_emissions",
      "claim_type": "factual",
      "vagueness_flags": ["list any vague terms used"]
    }}
  ],
  "total_claims_found": 1,
  "document_coverage": "brief summary of sustainability topics covered"
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_document_text() {
        let prompt = build_extraction_prompt("We reduced Scope 1 emissions by 23%.");
        assert!(prompt.contains("We reduced Scope 1 emissions by 23%."));
        assert!(prompt.contains("vagueness_flags"));
    }
}
