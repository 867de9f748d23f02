use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Identifiant fort pour Member
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Shift
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plage horaire intra-journée, intervalle semi-ouvert `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Crée une plage en validant `end > start`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, String> {
        if end <= start {
            return Err("slot end must be after start".to_string());
        }
        Ok(Self { start, end })
    }

    /// Chevauchement d'intervalles, pas d'égalité stricte :
    /// un blocage 09:00–12:00 exclut un créneau 10:00–11:00.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Règle jour-de-semaine + plage horaire (blocage ou préférence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub weekday: Weekday,
    pub slot: TimeSlot,
}

impl AvailabilityRule {
    /// Vrai si la règle couvre le créneau (même jour, plages en chevauchement).
    pub fn covers(&self, weekday: Weekday, slot: &TimeSlot) -> bool {
        self.weekday == weekday && self.slot.overlaps(slot)
    }
}

/// Disponibilités déclarées d'un membre. Aucune règle = disponible partout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub never_available: Vec<AvailabilityRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_times: Vec<AvailabilityRule>,
}

/// Bornes de charge par période. `None` = non contraint.
/// Les minimums sont indicatifs (voir l'audit) ; seuls les maximums sont durs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shifts_per_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_shifts_per_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shifts_per_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_shifts_per_month: Option<u32>,
}

/// Membre candidat à l'affectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub limits: Limits,
}

impl Member {
    pub fn new<D: Into<String>, E: Into<String>>(display_name: D, email: E) -> Self {
        Self {
            id: MemberId::random(),
            display_name: display_name.into(),
            email: email.into(),
            availability: Availability::default(),
            limits: Limits::default(),
        }
    }
}

/// État d'un créneau vis-à-vis de l'affectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    Unassigned,
    Assigned,
}

/// Créneau de travail daté, pondéré en points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub points: u32,
    pub status: ShiftStatus,
    pub assigned: Option<MemberId>,
}

impl Shift {
    /// Crée un créneau non affecté en validant le poids (`points >= 1`).
    pub fn new(date: NaiveDate, slot: TimeSlot, points: u32) -> Result<Self, String> {
        if points == 0 {
            return Err("shift points must be >= 1".to_string());
        }
        Ok(Self {
            id: ShiftId::random(),
            date,
            slot,
            points,
            status: ShiftStatus::Unassigned,
            assigned: None,
        })
    }

    pub fn is_unassigned(&self) -> bool {
        self.status == ShiftStatus::Unassigned
    }
}

/// Instantané persisté : membres, créneaux et points historiques
/// (scalaire décayé maintenu côté appelant, fenêtre `memory_horizon_days`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Schedule {
    pub members: Vec<Member>,
    pub shifts: Vec<Shift>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub historical_points: BTreeMap<MemberId, f64>,
}

impl Schedule {
    pub fn find_member_by_id<'a>(&'a self, id: &MemberId) -> Option<&'a Member> {
        self.members.iter().find(|m| &m.id == id)
    }
    pub fn find_member_by_email<'a>(&'a self, email: &str) -> Option<&'a Member> {
        self.members.iter().find(|m| m.email == email)
    }
    pub fn find_shift<'a>(&'a self, id: &ShiftId) -> Option<&'a Shift> {
        self.shifts.iter().find(|s| &s.id == id)
    }
    pub fn find_shift_mut(&mut self, id: &ShiftId) -> Option<&mut Shift> {
        self.shifts.iter_mut().find(|s| &s.id == id)
    }

    /// Créneaux encore à pourvoir, dans l'ordre de stockage.
    pub fn unassigned_shifts(&self) -> Vec<&Shift> {
        self.shifts.iter().filter(|s| s.is_unassigned()).collect()
    }

    /// Applique un lot de résultats au planning, en un seul passage.
    ///
    /// L'appelant persiste ensuite l'instantané complet en une écriture
    /// atomique : tout le lot devient visible, ou rien.
    pub fn apply_results(&mut self, results: &[crate::engine::AssignmentResult]) {
        for r in results {
            if let Some(shift) = self.find_shift_mut(&r.shift_id) {
                shift.status = ShiftStatus::Assigned;
                shift.assigned = Some(r.member_id.clone());
            }
        }
    }
}
