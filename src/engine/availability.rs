use crate::model::{Member, Shift};
use chrono::Datelike;

/// Vrai si le membre peut prendre le créneau : aucune fenêtre de blocage
/// ne couvre le jour de semaine et la plage du créneau. Des règles absentes
/// ou vides valent « disponible partout ».
pub(super) fn is_available(member: &Member, shift: &Shift) -> bool {
    let weekday = shift.date.weekday();
    !member
        .availability
        .never_available
        .iter()
        .any(|rule| rule.covers(weekday, &shift.slot))
}

/// Vrai si le créneau tombe dans une plage préférée du membre
/// (même test jour + chevauchement que pour les blocages).
pub(super) fn prefers(member: &Member, shift: &Shift) -> bool {
    let weekday = shift.date.weekday();
    member
        .availability
        .preferred_times
        .iter()
        .any(|rule| rule.covers(weekday, &shift.slot))
}
