//! Derived report narrative: category summaries, strengths, critical
//! issues, legal risk, and the executive summary

use crate::model::assessment::{CriterionResult, Severity};
use crate::model::claims::Claim;
use crate::model::report::{
    CategoryScore, CriticalIssue, EnforcementRisk, LegalRiskAssessment, RiskTier, Strength,
};

/// Criterion score that qualifies as a strength
const STRENGTH_THRESHOLD: u8 = 80;

/// At most this many strengths appear in the report
const MAX_STRENGTHS: usize = 3;

/// At most this many high-severity findings are taken per criterion
const MAX_FINDINGS_PER_CRITERION: usize = 2;

/// Hard cap on the critical-issue list
const MAX_CRITICAL_ISSUES: usize = 10;

/// Hard cap on the priority-action list
const MAX_PRIORITY_ACTIONS: usize = 5;

/// Character-boundary-safe prefix of a string
fn prefix_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// One-line summary for a category from its constituent results
pub fn category_summary(results: &[CriterionResult]) -> String {
    if results.is_empty() {
        return "No criteria were assessed for this principle.".to_string();
    }

    let avg_score =
        results.iter().map(|r| r.score as f64).sum::<f64>() / results.len() as f64;
    let high_issues = results
        .iter()
        .flat_map(|r| &r.findings)
        .filter(|f| f.severity == Severity::High)
        .count();

    if avg_score >= 75.0 {
        format!(
            "Generally compliant with {} criteria assessed. {} high-severity issues identified.",
            results.len(),
            high_issues
        )
    } else if avg_score >= 50.0 {
        format!(
            "Needs attention across {} criteria. {} high-severity issues require immediate action.",
            results.len(),
            high_issues
        )
    } else {
        format!(
            "High risk identified across {} criteria. {} critical issues require urgent remediation.",
            results.len(),
            high_issues
        )
    }
}

/// Strengths: high-scoring criteria that cited at least one evidence item,
/// capped at three, each carrying its first evidence quote
pub fn extract_strengths(results: &[CriterionResult]) -> Vec<Strength> {
    results
        .iter()
        .filter(|r| r.score >= STRENGTH_THRESHOLD && !r.evidence.is_empty())
        .take(MAX_STRENGTHS)
        .map(|result| {
            let evidence = &result.evidence[0];
            Strength {
                title: format!("Strong {}", result.criterion_name),
                description: prefix_chars(&result.rationale, 200),
                evidence: evidence.quote.clone(),
                page_reference: evidence.page_reference.clone(),
            }
        })
        .collect()
}

/// Critical issues: up to two High findings per criterion, each resolved
/// back to its originating claim for page and quote context, capped at ten.
/// Insertion order (criterion iteration order) is preserved.
pub fn extract_critical_issues(results: &[CriterionResult], claims: &[Claim]) -> Vec<CriticalIssue> {
    let mut issues = Vec::new();

    for result in results {
        let high_findings = result
            .findings
            .iter()
            .filter(|f| f.severity == Severity::High)
            .take(MAX_FINDINGS_PER_CRITERION);

        for finding in high_findings {
            let related_claim = claims.iter().find(|c| c.id == finding.claim_id);

            issues.push(CriticalIssue {
                title: prefix_chars(&finding.issue, 100),
                description: finding.issue.clone(),
                category: result.category_name.clone(),
                evidence: related_claim.map(|c| c.text.clone()).unwrap_or_default(),
                page_reference: related_claim
                    .map(|c| c.location.label())
                    .unwrap_or_default(),
                recommendation: result
                    .recommendations
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Review and address this issue".to_string()),
                severity: finding.severity,
            });

            if issues.len() == MAX_CRITICAL_ISSUES {
                return issues;
            }
        }
    }

    issues
}

/// Compose the executive summary from the headline numbers
pub fn executive_summary(
    overall_score: u8,
    risk_tier: RiskTier,
    claims_count: usize,
    categories: &[CategoryScore],
    critical_issues: &[CriticalIssue],
) -> String {
    let strong: Vec<&str> = categories
        .iter()
        .filter(|c| c.score >= 75)
        .map(|c| c.name.as_str())
        .collect();
    let weak: Vec<&str> = categories
        .iter()
        .filter(|c| c.score < 50)
        .map(|c| c.name.as_str())
        .collect();

    let mut summary = format!(
        "This document was assessed against the Competition Bureau's 6 Principles \
         for environmental claims, analyzing {claims_count} environmental claims. \
         The overall compliance score is {overall_score}/100, indicating {risk_tier}. "
    );

    if !strong.is_empty() {
        summary.push_str(&format!(
            "Strong compliance was found in {}. ",
            strong.join(", ")
        ));
    }

    if !weak.is_empty() {
        summary.push_str(&format!(
            "Areas requiring immediate attention include {}. ",
            weak.join(", ")
        ));
    }

    if !critical_issues.is_empty() {
        summary.push_str(&format!(
            "{} critical issues were identified that may expose the organization \
             to enforcement action under Bill C-59.",
            critical_issues.len()
        ));
    }

    summary.trim_end().to_string()
}

/// Deterministic legal-risk block keyed on the overall score and the
/// high-severity issue count
pub fn assess_legal_risk(
    overall_score: u8,
    critical_issues: &[CriticalIssue],
) -> LegalRiskAssessment {
    let high_severity_count = critical_issues
        .iter()
        .filter(|i| i.severity == Severity::High)
        .count();

    let (penalty_exposure, enforcement_risk) = if overall_score >= 75 && high_severity_count == 0 {
        (
            "Low - No significant violations identified".to_string(),
            EnforcementRisk::Low,
        )
    } else if overall_score >= 50 || high_severity_count <= 2 {
        (
            "Moderate - Potential for administrative penalties up to $10M for corporations"
                .to_string(),
            EnforcementRisk::Medium,
        )
    } else {
        (
            "High - Potential for significant penalties under Bill C-59, including up \
             to $10M for corporations and $750K for individuals"
                .to_string(),
            EnforcementRisk::High,
        )
    };

    let mut priority_actions = Vec::new();

    if high_severity_count > 0 {
        priority_actions
            .push("Immediately review and revise high-risk environmental claims".to_string());
    }

    if overall_score < 75 {
        priority_actions.push(
            "Conduct comprehensive review of all environmental marketing materials".to_string(),
        );
        priority_actions.push(
            "Ensure all claims are substantiated with adequate and proper testing".to_string(),
        );
    }

    if overall_score < 50 {
        priority_actions
            .push("Engage legal counsel specializing in Canadian competition law".to_string());
        priority_actions.push(
            "Consider voluntary disclosure to Competition Bureau if violations are identified"
                .to_string(),
        );
    }

    priority_actions.push(
        "Implement ongoing monitoring and compliance program for environmental claims".to_string(),
    );
    priority_actions.truncate(MAX_PRIORITY_ACTIONS);

    LegalRiskAssessment {
        penalty_exposure,
        enforcement_risk,
        priority_actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::assessment::{ComplianceStatus, Evidence, Finding};
    use crate::model::claims::{ClaimCategory, ClaimKind, SourceLocation};
    use std::time::Duration;

    fn result(id: &str, score: u8, findings: Vec<Finding>) -> CriterionResult {
        CriterionResult {
            criterion_id: id.to_string(),
            criterion_name: format!("Criterion {id}"),
            category_id: "principle1_truthful".to_string(),
            category_name: "Principle 1: Be Truthful".to_string(),
            score,
            status: ComplianceStatus::from_score(score),
            rationale: "Detailed rationale".to_string(),
            findings,
            recommendations: vec!["Fix it".to_string()],
            evidence: vec![Evidence {
                quote: "We cut emissions 40%".to_string(),
                page_reference: "Page 2".to_string(),
                context: "Quantified reduction".to_string(),
            }],
            weight: 1.0,
            duration: Duration::ZERO,
            error: None,
        }
    }

    fn high_finding(claim_id: &str) -> Finding {
        Finding {
            claim_id: claim_id.to_string(),
            issue: "Unsubstantiated absolute claim".to_string(),
            severity: Severity::High,
        }
    }

    #[test]
    fn strengths_require_evidence_and_cap_at_three() {
        let mut results: Vec<CriterionResult> =
            (0..5).map(|i| result(&format!("c{i}"), 90, vec![])).collect();
        results[0].evidence.clear();

        let strengths = extract_strengths(&results);
        assert_eq!(strengths.len(), 3);
        assert!(strengths.iter().all(|s| !s.evidence.is_empty()));
        assert_eq!(strengths[0].title, "Strong Criterion c1");
    }

    #[test]
    fn critical_issues_take_two_high_findings_per_criterion_capped_at_ten() {
        // 7 criteria x 3 high findings each; per-criterion cap keeps 2,
        // global cap keeps 10
        let results: Vec<CriterionResult> = (0..7)
            .map(|i| {
                result(
                    &format!("c{i}"),
                    30,
                    vec![
                        high_finding("claim_1"),
                        high_finding("claim_1"),
                        high_finding("claim_1"),
                    ],
                )
            })
            .collect();

        let issues = extract_critical_issues(&results, &[]);
        assert_eq!(issues.len(), 10);
    }

    #[test]
    fn critical_issue_resolves_claim_back_reference() {
        let claims = vec![Claim {
            id: "claim_7".to_string(),
            text: "100% green operations".to_string(),
            location: SourceLocation::Page(12),
            section: "Marketing".to_string(),
            category: ClaimCategory::GeneralSustainability,
            kind: ClaimKind::Factual,
            vagueness_flags: vec!["green".to_string()],
        }];
        let results = vec![result("c0", 20, vec![high_finding("claim_7")])];

        let issues = extract_critical_issues(&results, &claims);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].evidence, "100% green operations");
        assert_eq!(issues[0].page_reference, "Page 12");
    }

    #[test]
    fn unresolved_claim_reference_leaves_context_empty() {
        let results = vec![result("c0", 20, vec![high_finding("missing_claim")])];
        let issues = extract_critical_issues(&results, &[]);
        assert_eq!(issues[0].evidence, "");
        assert_eq!(issues[0].page_reference, "");
    }

    #[test]
    fn legal_risk_tiers_follow_thresholds() {
        let clean = assess_legal_risk(80, &[]);
        assert_eq!(clean.enforcement_risk, EnforcementRisk::Low);
        assert!(clean.priority_actions.len() <= 5);

        let moderate = assess_legal_risk(60, &[]);
        assert_eq!(moderate.enforcement_risk, EnforcementRisk::Medium);

        let issues: Vec<CriticalIssue> = extract_critical_issues(
            &(0..3)
                .map(|i| result(&format!("c{i}"), 20, vec![high_finding("x")]))
                .collect::<Vec<_>>(),
            &[],
        );
        let severe = assess_legal_risk(30, &issues);
        assert_eq!(severe.enforcement_risk, EnforcementRisk::High);
        assert_eq!(severe.priority_actions.len(), 5);
    }

    #[test]
    fn summary_tiers_by_average_score() {
        let compliant = category_summary(&[result("a", 80, vec![]), result("b", 80, vec![])]);
        assert!(compliant.starts_with("Generally compliant"));

        let attention = category_summary(&[result("a", 60, vec![])]);
        assert!(attention.starts_with("Needs attention"));

        let risky = category_summary(&[result("a", 20, vec![])]);
        assert!(risky.starts_with("High risk"));
    }
}
