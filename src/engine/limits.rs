use crate::model::{Member, MemberId};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Clé de période : (année ISO, semaine ISO) ou (année, mois).
pub(super) type PeriodKey = (i32, u32);

pub(super) fn week_key(date: NaiveDate) -> PeriodKey {
    let iso = date.iso_week();
    (iso.year(), iso.week())
}

pub(super) fn month_key(date: NaiveDate) -> PeriodKey {
    (date.year(), date.month())
}

/// Compteurs de charge par membre et par période, portés par une seule
/// exécution. Conteneurs ordonnés : l'itération ne dépend jamais d'un hachage.
#[derive(Debug, Default)]
pub(super) struct LimitTracker {
    weekly: BTreeMap<(MemberId, PeriodKey), u32>,
    monthly: BTreeMap<(MemberId, PeriodKey), u32>,
}

impl LimitTracker {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Vrai si affecter un créneau daté `date` au membre respecte encore
    /// ses maximums hebdomadaire et mensuel. Un maximum à 0 exclut le
    /// membre d'office. Les minimums ne sont pas traités ici (indicatifs).
    pub(super) fn can_take_more(&self, member: &Member, date: NaiveDate) -> bool {
        if let Some(max) = member.limits.max_shifts_per_week {
            let taken = self
                .weekly
                .get(&(member.id.clone(), week_key(date)))
                .copied()
                .unwrap_or(0);
            if taken + 1 > max {
                return false;
            }
        }
        if let Some(max) = member.limits.max_shifts_per_month {
            let taken = self
                .monthly
                .get(&(member.id.clone(), month_key(date)))
                .copied()
                .unwrap_or(0);
            if taken + 1 > max {
                return false;
            }
        }
        true
    }

    /// Enregistre une affectation réussie sur les deux périodes.
    pub(super) fn record(&mut self, member: &MemberId, date: NaiveDate) {
        *self
            .weekly
            .entry((member.clone(), week_key(date)))
            .or_insert(0) += 1;
        *self
            .monthly
            .entry((member.clone(), month_key(date)))
            .or_insert(0) += 1;
    }
}
