use super::{availability, AssignConfig};
use crate::model::{Member, MemberId, Shift};
use std::collections::BTreeMap;

/// Coût effectif d'une affectation : charge cumulée (exécution courante +
/// historique importé) moins la remise de préférence éventuelle.
///
/// Le multiplicateur férié n'entre pas dans le coût : il pèse sur les points
/// attribués, donc sur les totaux courants des choix suivants — les créneaux
/// fériés tirent ainsi vers le membre le moins chargé.
pub(super) fn cost(
    member: &Member,
    shift: &Shift,
    running_points: &BTreeMap<MemberId, f64>,
    historical_points: &BTreeMap<MemberId, f64>,
    config: &AssignConfig,
) -> f64 {
    let running = running_points.get(&member.id).copied().unwrap_or(0.0);
    let historical = historical_points.get(&member.id).copied().unwrap_or(0.0);
    let bonus = if availability::prefers(member, shift) {
        config.preference_bonus
    } else {
        0.0
    };
    running + historical - bonus
}

/// Points attribués pour un créneau : poids de base, multiplié si férié.
pub(super) fn effective_points(shift: &Shift, holiday: bool, config: &AssignConfig) -> f64 {
    let base = f64::from(shift.points);
    if holiday {
        base * config.holiday_multiplier
    } else {
        base
    }
}
