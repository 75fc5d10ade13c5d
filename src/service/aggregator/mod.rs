//! Result aggregation
//!
//! Pure, deterministic rollup of per-criterion results into the final
//! report. Performs no I/O and never fails: malformed weights are
//! defaulted, empty categories score the neutral midpoint, and running it
//! twice on the same inputs yields identical output.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::model::assessment::{ComplianceStatus, CriterionResult, NEUTRAL_SCORE};
use crate::model::claims::Claim;
use crate::model::report::{
    AggregatedReport, CategoryScore, ReportMetadata, RiskTier,
};

pub mod summary;

use summary::{
    assess_legal_risk, category_summary, executive_summary, extract_critical_issues,
    extract_strengths,
};

/// Weight used for aggregation: non-finite weights behave like an absent
/// weight and default to 1.0; negative weights clamp to zero
fn effective_weight(result: &CriterionResult) -> f64 {
    if result.weight.is_finite() {
        result.weight.max(0.0)
    } else {
        1.0
    }
}

/// Weighted mean of one category's criterion scores, rounded to the
/// nearest integer; neutral when the total weight is zero
fn category_score(results: &[CriterionResult]) -> u8 {
    let total_weight: f64 = results.iter().map(effective_weight).sum();
    if total_weight <= 0.0 {
        return NEUTRAL_SCORE;
    }

    let weighted_sum: f64 = results
        .iter()
        .map(|r| r.score as f64 * effective_weight(r))
        .sum();

    (weighted_sum / total_weight).round().clamp(0.0, 100.0) as u8
}

/// Aggregate per-criterion results into the final report.
///
/// Categories are grouped by id and ordered ascending for deterministic
/// output; the overall score is the unweighted mean of category scores
/// since categories are equal-importance pillars regardless of how many
/// criteria each contains.
pub fn aggregate(
    claims: &[Claim],
    results: Vec<CriterionResult>,
    extraction_duration: Duration,
    assessment_duration: Duration,
) -> AggregatedReport {
    let start = Instant::now();

    let criteria_succeeded = results.iter().filter(|r| r.error.is_none()).count();
    let criteria_failed = results.len() - criteria_succeeded;

    // BTreeMap keeps categories sorted ascending by id
    let mut by_category: BTreeMap<String, Vec<CriterionResult>> = BTreeMap::new();
    for result in results {
        by_category
            .entry(result.category_id.clone())
            .or_default()
            .push(result);
    }

    let category_scores: Vec<CategoryScore> = by_category
        .into_iter()
        .map(|(id, members)| {
            let score = category_score(&members);
            let name = members
                .first()
                .map(|m| m.category_name.clone())
                .unwrap_or_else(|| id.clone());
            CategoryScore {
                id,
                name,
                score,
                status: ComplianceStatus::from_score(score),
                summary: category_summary(&members),
                criteria: members,
            }
        })
        .collect();

    let overall_score = if category_scores.is_empty() {
        NEUTRAL_SCORE
    } else {
        let sum: f64 = category_scores.iter().map(|c| c.score as f64).sum();
        (sum / category_scores.len() as f64).round() as u8
    };
    let risk_tier = RiskTier::from_score(overall_score);

    let all_results: Vec<&CriterionResult> = category_scores
        .iter()
        .flat_map(|c| c.criteria.iter())
        .collect();
    let flattened: Vec<CriterionResult> = all_results.into_iter().cloned().collect();

    let key_strengths = extract_strengths(&flattened);
    let critical_issues = extract_critical_issues(&flattened, claims);
    let legal_risk = assess_legal_risk(overall_score, &critical_issues);
    let summary = executive_summary(
        overall_score,
        risk_tier,
        claims.len(),
        &category_scores,
        &critical_issues,
    );

    let aggregation_duration = start.elapsed();

    tracing::info!(
        overall_score,
        categories = category_scores.len(),
        critical_issues = critical_issues.len(),
        "Aggregation completed"
    );

    AggregatedReport {
        overall_score,
        risk_tier,
        executive_summary: summary,
        total_claims_analyzed: claims.len(),
        category_scores,
        key_strengths,
        critical_issues,
        legal_risk,
        metadata: ReportMetadata {
            extraction_duration,
            assessment_duration,
            aggregation_duration,
            total_duration: extraction_duration + assessment_duration + aggregation_duration,
            criteria_succeeded,
            criteria_failed,
        },
        generated_at: Utc::now(),
    }
}
