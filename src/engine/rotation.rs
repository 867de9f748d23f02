use super::AssignmentResult;
use crate::model::{Member, MemberId, Shift};
use std::collections::BTreeMap;

/// Ancien chemin d'affectation : rotation par total courant, sans
/// disponibilités, ni limites, ni pondération fériée. Conservé tel quel pour
/// l'ancien point d'entrée, non réconcilié avec le moteur d'équité.
#[deprecated(note = "superseded by Engine::assign")]
pub fn assign_round_robin(shifts: &[Shift], members: &[Member]) -> Vec<AssignmentResult> {
    if members.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<&Shift> = shifts.iter().filter(|s| s.is_unassigned()).collect();
    ordered.sort_by(|a, b| (a.date, a.slot.start, &a.id).cmp(&(b.date, b.slot.start, &b.id)));

    let mut candidates: Vec<&Member> = members.iter().collect();
    candidates.sort_by(|a, b| a.id.cmp(&b.id));

    let mut running: BTreeMap<MemberId, f64> = candidates
        .iter()
        .map(|m| (m.id.clone(), 0.0))
        .collect();

    let mut results = Vec::with_capacity(ordered.len());
    for shift in ordered {
        let mut best: Option<(&Member, f64)> = None;
        for member in candidates.iter().copied() {
            let total = running.get(&member.id).copied().unwrap_or(0.0);
            match best {
                Some((_, best_total)) if total >= best_total => {}
                _ => best = Some((member, total)),
            }
        }
        let Some((member, _)) = best else {
            continue;
        };

        let awarded = f64::from(shift.points);
        if let Some(total) = running.get_mut(&member.id) {
            *total += awarded;
        }
        results.push(AssignmentResult {
            shift_id: shift.id.clone(),
            member_id: member.id.clone(),
            member_name: member.display_name.clone(),
            member_email: member.email.clone(),
            points_awarded: awarded,
            holiday: false,
        });
    }
    results
}
