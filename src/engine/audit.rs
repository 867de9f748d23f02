use super::limits::{month_key, week_key, PeriodKey};
use super::{availability, Violation, ViolationKind};
use crate::model::{Schedule, Shift};
use std::collections::{BTreeMap, BTreeSet};

/// Contrôle en lecture seule d'un planning affecté (par le moteur ou à la
/// main) : fenêtres de blocage, maximums par période, et minimums indicatifs
/// jugés sur les périodes couvertes par le planning.
pub(super) fn audit(schedule: &Schedule) -> Vec<Violation> {
    let mut out = Vec::new();

    // périodes couvertes par le planning, pour juger les minimums
    let mut weeks: BTreeSet<PeriodKey> = BTreeSet::new();
    let mut months: BTreeSet<PeriodKey> = BTreeSet::new();
    for s in &schedule.shifts {
        weeks.insert(week_key(s.date));
        months.insert(month_key(s.date));
    }

    for member in &schedule.members {
        let assigned: Vec<&Shift> = schedule
            .shifts
            .iter()
            .filter(|s| s.assigned.as_ref() == Some(&member.id))
            .collect();

        for shift in assigned.iter().copied() {
            if !availability::is_available(member, shift) {
                out.push(Violation {
                    member: member.id.clone(),
                    shift: Some(shift.id.clone()),
                    kind: ViolationKind::BlackoutOverlap,
                });
            }
        }

        let mut weekly: BTreeMap<PeriodKey, u32> = BTreeMap::new();
        let mut monthly: BTreeMap<PeriodKey, u32> = BTreeMap::new();
        for shift in assigned.iter().copied() {
            *weekly.entry(week_key(shift.date)).or_insert(0) += 1;
            *monthly.entry(month_key(shift.date)).or_insert(0) += 1;
        }

        if let Some(max) = member.limits.max_shifts_per_week {
            for count in weekly.values() {
                if *count > max {
                    out.push(Violation {
                        member: member.id.clone(),
                        shift: None,
                        kind: ViolationKind::WeeklyLimitExceeded,
                    });
                }
            }
        }
        if let Some(max) = member.limits.max_shifts_per_month {
            for count in monthly.values() {
                if *count > max {
                    out.push(Violation {
                        member: member.id.clone(),
                        shift: None,
                        kind: ViolationKind::MonthlyLimitExceeded,
                    });
                }
            }
        }
        if let Some(min) = member.limits.min_shifts_per_week {
            for week in &weeks {
                if weekly.get(week).copied().unwrap_or(0) < min {
                    out.push(Violation {
                        member: member.id.clone(),
                        shift: None,
                        kind: ViolationKind::WeeklyMinimumShort,
                    });
                }
            }
        }
        if let Some(min) = member.limits.min_shifts_per_month {
            for month in &months {
                if monthly.get(month).copied().unwrap_or(0) < min {
                    out.push(Violation {
                        member: member.id.clone(),
                        shift: None,
                        kind: ViolationKind::MonthlyMinimumShort,
                    });
                }
            }
        }
    }

    out
}
