use super::{AssignmentResult, AssignmentSummary};

/// Agrège un lot de résultats : totaux globaux et répartition par membre.
/// Pli pur, aucun mode d'échec.
pub fn summarize(results: &[AssignmentResult]) -> AssignmentSummary {
    let mut summary = AssignmentSummary::default();
    for r in results {
        summary.total_assigned += 1;
        summary.total_points += r.points_awarded;
        if r.holiday {
            summary.holiday_shifts += 1;
        }
        let tally = summary.per_member.entry(r.member_id.clone()).or_default();
        tally.shifts += 1;
        tally.points += r.points_awarded;
    }
    summary
}
