use crate::model::{MemberId, ShiftId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Réglages d'une exécution d'affectation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AssignConfig {
    /// Multiplicateur de points pour un créneau férié, domaine [1, 5].
    pub holiday_multiplier: f64,
    /// Remise de coût quand le créneau tombe dans une plage préférée.
    pub preference_bonus: f64,
    /// Fenêtre de décroissance des points historiques, domaine [1, 365] jours.
    /// Documentaire : le calcul du scalaire appartient à l'appelant.
    pub memory_horizon_days: u16,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            holiday_multiplier: 1.5,
            preference_bonus: 0.5,
            memory_horizon_days: 90,
        }
    }
}

impl AssignConfig {
    /// Validation de bornes, appliquée une fois à la frontière.
    /// Le moteur suppose ensuite une configuration valide.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(1.0..=5.0).contains(&self.holiday_multiplier) {
            return Err(EngineError::InvalidConfig(
                "holiday_multiplier must be within [1, 5]",
            ));
        }
        if !self.preference_bonus.is_finite() || self.preference_bonus < 0.0 {
            return Err(EngineError::InvalidConfig(
                "preference_bonus must be finite and >= 0",
            ));
        }
        if !(1..=365).contains(&self.memory_horizon_days) {
            return Err(EngineError::InvalidConfig(
                "memory_horizon_days must be within [1, 365]",
            ));
        }
        Ok(())
    }
}

/// Un résultat par créneau pourvu avec succès.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub shift_id: ShiftId,
    pub member_id: MemberId,
    pub member_name: String,
    pub member_email: String,
    /// Points de base du créneau, après multiplicateur férié éventuel.
    pub points_awarded: f64,
    pub holiday: bool,
}

/// Cumul par membre dans le résumé.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberTally {
    pub shifts: usize,
    pub points: f64,
}

/// Statistiques dérivées d'un lot de résultats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentSummary {
    pub total_assigned: usize,
    pub total_points: f64,
    pub holiday_shifts: usize,
    pub per_member: BTreeMap<MemberId, MemberTally>,
}

/// Nature d'un écart relevé par l'audit d'un planning affecté.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Créneau affecté dans une fenêtre de blocage du membre.
    BlackoutOverlap,
    /// Maximum hebdomadaire dépassé.
    WeeklyLimitExceeded,
    /// Maximum mensuel dépassé.
    MonthlyLimitExceeded,
    /// Minimum hebdomadaire non atteint (indicatif).
    WeeklyMinimumShort,
    /// Minimum mensuel non atteint (indicatif).
    MonthlyMinimumShort,
}

/// Écart relevé par l'audit. `shift` est absent pour les écarts de période
/// (maximums dépassés, minimums non atteints), qui portent sur une semaine
/// ou un mois entiers.
#[derive(Debug, Clone)]
pub struct Violation {
    pub member: MemberId,
    pub shift: Option<ShiftId>,
    pub kind: ViolationKind,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("unknown member: {0}")]
    UnknownMember(String),
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error("swap invalid: {0}")]
    SwapInvalid(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
