mod assign;
mod audit;
mod availability;
mod limits;
mod mutate;
mod rotation;
mod score;
mod summary;
mod types;

#[allow(deprecated)]
pub use rotation::assign_round_robin;
pub use summary::summarize;
pub use types::{
    AssignConfig, AssignmentResult, AssignmentSummary, EngineError, MemberTally, Violation,
    ViolationKind,
};

use crate::model::{Member, MemberId, Schedule, Shift, ShiftId};
use std::collections::BTreeMap;

/// Moteur d'affectation équitable : une configuration validée, aucun état
/// entre deux exécutions. Calcul pur et borné, rejouable sur la même entrée.
#[derive(Debug, Clone)]
pub struct Engine {
    config: AssignConfig,
}

impl Engine {
    /// Construit le moteur après validation des bornes de configuration.
    pub fn new(config: AssignConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AssignConfig {
        &self.config
    }

    /// Affecte les créneaux non pourvus aux membres, au coût d'équité
    /// minimal. Ne mute rien : retourne un résultat par créneau pourvu,
    /// les créneaux sans membre éligible n'en produisent pas.
    pub fn assign(
        &self,
        shifts: &[Shift],
        members: &[Member],
        historical_points: &BTreeMap<MemberId, f64>,
    ) -> Vec<AssignmentResult> {
        assign::assign(&self.config, shifts, members, historical_points)
    }

    /// Contrôle un planning affecté contre les mêmes contraintes que
    /// l'affectation (plus les minimums indicatifs).
    pub fn audit(&self, schedule: &Schedule) -> Vec<Violation> {
        audit::audit(schedule)
    }

    /// Échange l'affectation d'un créneau entre deux membres (édition
    /// côté appelant, validée, avec retour arrière).
    pub fn swap(
        &self,
        schedule: &mut Schedule,
        shift_id: &ShiftId,
        a: &MemberId,
        b: &MemberId,
    ) -> Result<(), EngineError> {
        mutate::swap(schedule, shift_id, a, b)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            config: AssignConfig::default(),
        }
    }
}
