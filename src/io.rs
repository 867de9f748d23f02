use crate::engine::AssignmentResult;
use crate::model::{
    AvailabilityRule, Member, MemberId, Schedule, Shift, TimeSlot,
};
use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveTime, Weekday};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de membres depuis CSV, header
/// `id,display_name,email[,max_week][,min_week][,max_month][,min_month][,never_available][,preferred_times]`.
/// Un `id` vide est généré ; les listes de règles s'écrivent
/// `Mon 09:00-12:00;Sat 08:00-12:00`.
pub fn import_members_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Member>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let display = rec.get(1).context("missing display_name")?.trim();
        let email = rec.get(2).context("missing email")?.trim();
        if display.is_empty() || email.is_empty() {
            bail!("invalid member row (empty display_name or email)");
        }
        let mut member = Member::new(display.to_string(), email.to_string());
        if !id.is_empty() {
            member.id = MemberId::new(id);
        }
        member.limits.max_shifts_per_week = parse_bound(rec.get(3))
            .with_context(|| format!("invalid max_week for member {email}"))?;
        member.limits.min_shifts_per_week = parse_bound(rec.get(4))
            .with_context(|| format!("invalid min_week for member {email}"))?;
        member.limits.max_shifts_per_month = parse_bound(rec.get(5))
            .with_context(|| format!("invalid max_month for member {email}"))?;
        member.limits.min_shifts_per_month = parse_bound(rec.get(6))
            .with_context(|| format!("invalid min_month for member {email}"))?;
        if let Some(rules) = rec.get(7) {
            member.availability.never_available = parse_rules(rules)
                .with_context(|| format!("invalid never_available for member {email}"))?;
        }
        if let Some(rules) = rec.get(8) {
            member.availability.preferred_times = parse_rules(rules)
                .with_context(|| format!("invalid preferred_times for member {email}"))?;
        }
        out.push(member);
    }
    Ok(out)
}

fn parse_bound(cell: Option<&str>) -> anyhow::Result<Option<u32>> {
    match cell.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Ok(Some(raw.parse::<u32>().context("expected integer")?)),
    }
}

/// Liste de règles `;`-séparées : `Mon 09:00-12:00;Sat 08:00-12:00`.
fn parse_rules(raw: &str) -> anyhow::Result<Vec<AvailabilityRule>> {
    raw.split(';')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| parse_rule_chunk(chunk.trim()))
        .collect()
}

fn parse_rule_chunk(chunk: &str) -> anyhow::Result<AvailabilityRule> {
    let (day_raw, slot_raw) = chunk
        .split_once(' ')
        .with_context(|| format!("expected `Day HH:MM-HH:MM`, got: {chunk}"))?;
    let weekday: Weekday = day_raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid weekday: {day_raw}"))?;
    let slot = parse_slot(slot_raw.trim())?;
    Ok(AvailabilityRule { weekday, slot })
}

fn parse_slot(raw: &str) -> anyhow::Result<TimeSlot> {
    let (start_raw, end_raw) = raw
        .split_once('-')
        .with_context(|| format!("expected `HH:MM-HH:MM`, got: {raw}"))?;
    let start = NaiveTime::parse_from_str(start_raw.trim(), "%H:%M")
        .with_context(|| format!("invalid time: {start_raw}"))?;
    let end = NaiveTime::parse_from_str(end_raw.trim(), "%H:%M")
        .with_context(|| format!("invalid time: {end_raw}"))?;
    TimeSlot::new(start, end).map_err(anyhow::Error::msg)
}

/// Import de créneaux : header `date,start,end[,points]`
/// (date `%Y-%m-%d`, heures `%H:%M`, points >= 1, défaut 1).
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Shift>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let date_raw = rec.get(0).context("missing date")?.trim();
        let start = rec.get(1).context("missing start")?.trim();
        let end = rec.get(2).context("missing end")?.trim();
        let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
            .with_context(|| format!("invalid date: {date_raw}"))?;
        let slot = parse_slot(&format!("{start}-{end}"))?;
        let points = match rec.get(3).map(str::trim) {
            None | Some("") => 1,
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("invalid points: {raw}"))?,
        };
        let s = Shift::new(date, slot, points).map_err(anyhow::Error::msg)?;
        out.push(s);
    }
    Ok(out)
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV d'un lot de résultats :
/// header `shift_id,date,member_id,member,points_awarded,holiday`.
pub fn export_results_csv<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    results: &[AssignmentResult],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "shift_id",
        "date",
        "member_id",
        "member",
        "points_awarded",
        "holiday",
    ])?;
    for r in results {
        let date = schedule
            .find_shift(&r.shift_id)
            .map(|s| s.date.to_string())
            .unwrap_or_default();
        let points = r.points_awarded.to_string();
        w.write_record([
            r.shift_id.as_str(),
            date.as_str(),
            r.member_id.as_str(),
            r.member_name.as_str(),
            points.as_str(),
            if r.holiday { "true" } else { "false" },
        ])?;
    }
    w.flush()?;
    Ok(())
}
