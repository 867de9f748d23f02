use super::{availability, limits::LimitTracker, score, AssignConfig, AssignmentResult};
use crate::holiday;
use crate::model::{Member, MemberId, Shift};
use std::collections::BTreeMap;

/// Boucle d'affectation : une passe sur les créneaux en ordre chronologique,
/// choix du coût minimal parmi les membres éligibles, mise à jour des totaux
/// courants. Ne mute ni créneaux ni membres : produit des résultats que
/// l'appelant persiste en lot atomique.
pub(super) fn assign(
    config: &AssignConfig,
    shifts: &[Shift],
    members: &[Member],
    historical_points: &BTreeMap<MemberId, f64>,
) -> Vec<AssignmentResult> {
    if members.is_empty() {
        return Vec::new();
    }

    // Ordre de traitement déterministe : date, début de plage, identifiant.
    // L'appelant fournit déjà l'ordre chronologique ; on retrie quand même,
    // le déterminisme est un contrat du moteur.
    let mut ordered: Vec<&Shift> = shifts.iter().filter(|s| s.is_unassigned()).collect();
    ordered.sort_by(|a, b| {
        (a.date, a.slot.start, &a.id).cmp(&(b.date, b.slot.start, &b.id))
    });

    // Candidats par identifiant croissant : les égalités de coût se
    // résolvent au premier vu, jamais par un ordre de hachage.
    let mut candidates: Vec<&Member> = members.iter().collect();
    candidates.sort_by(|a, b| a.id.cmp(&b.id));

    let mut running: BTreeMap<MemberId, f64> = candidates
        .iter()
        .map(|m| (m.id.clone(), 0.0))
        .collect();
    let mut tracker = LimitTracker::new();
    let mut results = Vec::with_capacity(ordered.len());

    tracing::debug!(
        shifts = ordered.len(),
        members = candidates.len(),
        "assignment run started"
    );

    for shift in ordered {
        let holiday = holiday::is_holiday(shift.date);

        let mut best: Option<(&Member, f64)> = None;
        for member in candidates.iter().copied() {
            if !availability::is_available(member, shift) {
                continue;
            }
            if !tracker.can_take_more(member, shift.date) {
                continue;
            }
            let cost = score::cost(member, shift, &running, historical_points, config);
            match best {
                Some((_, best_cost)) if cost >= best_cost => {}
                _ => best = Some((member, cost)),
            }
        }

        let Some((member, _)) = best else {
            // aucun membre éligible : le créneau reste à pourvoir, sans erreur
            tracing::trace!(shift = shift.id.as_str(), "no eligible member");
            continue;
        };

        let awarded = score::effective_points(shift, holiday, config);
        if let Some(total) = running.get_mut(&member.id) {
            *total += awarded;
        }
        tracker.record(&member.id, shift.date);

        results.push(AssignmentResult {
            shift_id: shift.id.clone(),
            member_id: member.id.clone(),
            member_name: member.display_name.clone(),
            member_email: member.email.clone(),
            points_awarded: awarded,
            holiday,
        });
    }

    tracing::debug!(assigned = results.len(), "assignment run completed");
    results
}
