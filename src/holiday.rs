//! Calendrier des jours fériés (calendrier civil français).
//!
//! Table statique : dates fixes + fêtes mobiles dérivées de Pâques.
//! Lecture pure, aucun état, aucun mode d'échec.

use chrono::{Datelike, Duration, NaiveDate};

/// Vrai si la date est un jour férié reconnu.
pub fn is_holiday(date: NaiveDate) -> bool {
    if FIXED.contains(&(date.month(), date.day())) {
        return true;
    }
    let easter = easter_sunday(date.year());
    // Lundi de Pâques, Ascension, lundi de Pentecôte
    [1i64, 39, 50]
        .iter()
        .any(|offset| easter + Duration::days(*offset) == date)
}

// (mois, jour) — 1er janvier, 1er mai, 8 mai, 14 juillet,
// 15 août, Toussaint, 11 novembre, Noël.
const FIXED: [(u32, u32); 8] = [
    (1, 1),
    (5, 1),
    (5, 8),
    (7, 14),
    (8, 15),
    (11, 1),
    (11, 11),
    (12, 25),
];

/// Dimanche de Pâques (algorithme de computus grégorien anonyme).
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    // le computus ne produit que mars/avril, jours 1..=31
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).expect("computus date is valid")
}
