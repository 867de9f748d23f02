#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use ecurie::{
    engine::{AssignConfig, Engine, ViolationKind},
    io,
    model::{Schedule, Shift, ShiftId, TimeSlot},
    storage::{JsonStorage, Storage},
    summarize,
};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste d'affectation de créneaux (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de planning
    #[arg(long, global = true, default_value = "schedule.json")]
    schedule: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un créneau
    AddShift {
        /// Date `%Y-%m-%d`
        #[arg(long)]
        date: String,
        /// Heure de début `%H:%M`
        #[arg(long)]
        start: String,
        /// Heure de fin `%H:%M`
        #[arg(long)]
        end: String,
        #[arg(long, default_value_t = 1)]
        points: u32,
    },

    /// Importer des membres depuis un CSV
    ImportMembers {
        #[arg(long)]
        csv: String,
    },

    /// Importer des créneaux depuis un CSV
    ImportShifts {
        #[arg(long)]
        csv: String,
    },

    /// Affecter les créneaux non pourvus au coût d'équité minimal
    Assign {
        #[arg(long, default_value_t = 1.5)]
        holiday_multiplier: f64,
        #[arg(long, default_value_t = 0.5)]
        preference_bonus: f64,
        #[arg(long, default_value_t = 90)]
        memory_horizon_days: u16,
        /// Calculer sans appliquer ni sauvegarder
        #[arg(long)]
        dry_run: bool,
        /// Export CSV des résultats (optionnel)
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Lister et optionnellement exporter le planning
    List {
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Échanger l'affectation d'un créneau entre deux membres
    Swap {
        #[arg(long)]
        shift_id: String,
        /// Email du membre actuellement affecté
        #[arg(long)]
        member: String,
        /// Email du membre cible
        #[arg(long)]
        with: String,
    },

    /// Contrôler le planning affecté (blocages, maximums, minimums)
    Check {
        /// Export CSV des écarts (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.schedule)?;
    let mut schedule = storage.load().unwrap_or_else(|_| Schedule::default());

    let code = match cli.cmd {
        Commands::AddShift {
            date,
            start,
            end,
            points,
        } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")?;
            let start = NaiveTime::parse_from_str(&start, "%H:%M")?;
            let end = NaiveTime::parse_from_str(&end, "%H:%M")?;
            let slot = TimeSlot::new(start, end).map_err(anyhow::Error::msg)?;
            let shift = Shift::new(date, slot, points).map_err(anyhow::Error::msg)?;
            println!("{}", shift.id.as_str());
            schedule.shifts.push(shift);
            storage.save(&schedule)?;
            0
        }
        Commands::ImportMembers { csv } => {
            let members = io::import_members_csv(csv)?;
            schedule.members.extend(members);
            storage.save(&schedule)?;
            0
        }
        Commands::ImportShifts { csv } => {
            let shifts = io::import_shifts_csv(csv)?;
            schedule.shifts.extend(shifts);
            storage.save(&schedule)?;
            0
        }
        Commands::Assign {
            holiday_multiplier,
            preference_bonus,
            memory_horizon_days,
            dry_run,
            out_csv,
        } => {
            let config = AssignConfig {
                holiday_multiplier,
                preference_bonus,
                memory_horizon_days,
            };
            let engine = Engine::new(config)?;
            if schedule.members.is_empty() {
                bail!("no members in schedule, import members first");
            }

            // nombre de créneaux ouverts, calculé côté appelant
            let total_open = schedule.unassigned_shifts().len();
            let results = engine.assign(
                &schedule.shifts,
                &schedule.members,
                &schedule.historical_points,
            );
            let summary = summarize(&results);

            if let Some(path) = out_csv {
                io::export_results_csv(path, &schedule, &results)?;
            }
            if !dry_run {
                // un seul lot appliqué, une seule écriture atomique
                schedule.apply_results(&results);
                storage.save(&schedule)?;
            }

            println!(
                "assigned {}/{} shift(s) | {} point(s) | {} holiday shift(s)",
                summary.total_assigned, total_open, summary.total_points, summary.holiday_shifts
            );
            for (member_id, tally) in &summary.per_member {
                let name = schedule
                    .find_member_by_id(member_id)
                    .map(|m| m.display_name.as_str())
                    .unwrap_or("-");
                println!(
                    "{} | {} | {} shift(s) | {} point(s)",
                    member_id.as_str(),
                    name,
                    tally.shifts,
                    tally.points
                );
            }
            // Code 2 = WARNING/INCOMPLETE (couverture partielle)
            if summary.total_assigned < total_open {
                2
            } else {
                0
            }
        }
        Commands::List { out_json } => {
            if let Some(path) = out_json {
                io::export_schedule_json(path, &schedule)?;
            }
            // impression compacte
            for s in &schedule.shifts {
                let assigned = s
                    .assigned
                    .as_ref()
                    .and_then(|mid| schedule.find_member_by_id(mid))
                    .map(|m| m.email.as_str())
                    .unwrap_or("-");
                println!(
                    "{} | {} {}→{} | {} pt | {}",
                    s.id.as_str(),
                    s.date,
                    s.slot.start.format("%H:%M"),
                    s.slot.end.format("%H:%M"),
                    s.points,
                    assigned
                );
            }
            0
        }
        Commands::Swap {
            shift_id,
            member,
            with,
        } => {
            let sid = ShiftId::new(shift_id);
            let a = schedule
                .find_member_by_email(&member)
                .map(|m| m.id.clone())
                .ok_or_else(|| anyhow::anyhow!("unknown member: {}", member))?;
            let b = schedule
                .find_member_by_email(&with)
                .map(|m| m.id.clone())
                .ok_or_else(|| anyhow::anyhow!("unknown member: {}", with))?;
            let engine = Engine::default();
            engine.swap(&mut schedule, &sid, &a, &b)?;
            storage.save(&schedule)?;
            0
        }
        Commands::Check { report } => {
            let engine = Engine::default();
            let violations = engine.audit(&schedule);
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["member_id", "shift_id", "kind"])?;
                    for v in &violations {
                        w.write_record([
                            v.member.as_str(),
                            v.shift.as_ref().map(|s| s.as_str()).unwrap_or(""),
                            match v.kind {
                                ViolationKind::BlackoutOverlap => "blackout",
                                ViolationKind::WeeklyLimitExceeded => "week_max",
                                ViolationKind::MonthlyLimitExceeded => "month_max",
                                ViolationKind::WeeklyMinimumShort => "week_min",
                                ViolationKind::MonthlyMinimumShort => "month_min",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}
