use crate::model::{ComparisonOutcome, ComparisonSummary, OutcomeStatus};

/// Count outcomes per status.
pub fn compute_summary(outcomes: &[ComparisonOutcome<'_>]) -> ComparisonSummary {
    let mut summary = ComparisonSummary {
        total: outcomes.len(),
        ..ComparisonSummary::default()
    };

    for outcome in outcomes {
        match outcome.status {
            OutcomeStatus::Identical => summary.identical += 1,
            OutcomeStatus::Different => summary.different += 1,
            OutcomeStatus::MissingInSource => summary.missing_in_source += 1,
            OutcomeStatus::MissingInTarget => summary.missing_in_target += 1,
        }
    }

    summary
}
