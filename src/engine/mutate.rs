use super::{audit, availability, EngineError, ViolationKind};
use crate::model::{MemberId, Schedule, ShiftId};

/// Échange l'affectation d'un créneau entre deux membres.
///
/// Refuse la cible en fenêtre de blocage ; applique puis contrôle les
/// maximums sur le planning entier, avec retour arrière si l'échange en
/// dépasse un. Édition côté appelant : le moteur ne rééquilibre jamais.
pub(super) fn swap(
    schedule: &mut Schedule,
    shift_id: &ShiftId,
    a: &MemberId,
    b: &MemberId,
) -> Result<(), EngineError> {
    let Some(pos) = schedule.shifts.iter().position(|s| &s.id == shift_id) else {
        return Err(EngineError::UnknownShift(shift_id.as_str().to_string()));
    };

    let (target, prev) = {
        let shift = &schedule.shifts[pos];
        let target = if shift.assigned.as_ref() == Some(a) {
            b.clone()
        } else if shift.assigned.as_ref() == Some(b) {
            a.clone()
        } else {
            return Err(EngineError::SwapInvalid(
                "shift not assigned to either member",
            ));
        };
        (target, shift.assigned.clone())
    };

    {
        let member = schedule
            .find_member_by_id(&target)
            .ok_or_else(|| EngineError::UnknownMember(target.as_str().to_string()))?;
        if !availability::is_available(member, &schedule.shifts[pos]) {
            return Err(EngineError::SwapInvalid("target member blackout window"));
        }
    }

    schedule.shifts[pos].assigned = Some(target.clone());

    let violations = audit::audit(schedule);
    let severe = violations.iter().any(|v| {
        v.member == target
            && matches!(
                v.kind,
                ViolationKind::WeeklyLimitExceeded | ViolationKind::MonthlyLimitExceeded
            )
    });
    if severe {
        schedule.shifts[pos].assigned = prev;
        return Err(EngineError::SwapInvalid("exceeds target member limit"));
    }
    Ok(())
}
