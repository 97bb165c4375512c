#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use plantao::{
    io,
    model::{find_member, Day, Holiday, StaffId},
    notification::{prepare_reminder, TextReminder},
    scheduler::{parse_override, tally, CalendarError, IssueKind, Scheduler},
};
use rand::{rngs::StdRng, SeedableRng};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de calendriers de plantão
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Roster (JSON ou CSV `id,name[,vacations]`)
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    /// Fériés (JSON ou CSV `date,name[,type]`)
    #[arg(long, global = true)]
    holidays: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug)]
struct CalendarArgs {
    #[arg(long)]
    year: i32,
    /// 1 = janvier
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,
    /// Graine du mélange (génération reproductible)
    #[arg(long)]
    seed: Option<u64>,
    /// Surcharge manuelle `AAAA-MM-JJ=ID` (ou `AAAA-MM-JJ=` pour vider), répétable
    #[arg(long = "assign")]
    assign: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer le calendrier d'un mois
    Generate {
        #[command(flatten)]
        calendar: CalendarArgs,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        /// Export CSV du nombre de jours par personne
        #[arg(long)]
        tally_csv: Option<String>,
    },

    /// Générer un rappel texte pour le prochain plantão d'un membre
    Remind {
        #[command(flatten)]
        calendar: CalendarArgs,
        #[arg(long)]
        id: String,
        /// Nombre de jours d'avance pour l'avis (0 = le jour même)
        #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
        days_before: i64,
        /// Date de référence AAAA-MM-JJ (défaut : aujourd'hui, UTC)
        #[arg(long)]
        today: Option<String>,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
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

    let roster = io::load_roster(&cli.roster)?;
    let holidays: Vec<Holiday> = match &cli.holidays {
        Some(path) => io::load_holidays(path)?,
        None => Vec::new(),
    };
    let scheduler = Scheduler::new(&roster, &holidays);

    let code = match cli.cmd {
        Commands::Generate {
            calendar,
            out_json,
            out_csv,
            tally_csv,
        } => {
            let days = build_calendar(&scheduler, &calendar)?;
            if let Some(path) = out_json {
                io::export_calendar_json(path, &days)?;
            }
            if let Some(path) = out_csv {
                io::export_calendar_csv(path, &days)?;
            }
            if let Some(path) = tally_csv {
                io::export_tally_csv(path, &tally(&days, &roster))?;
            }
            for day in &days {
                let assigned = day
                    .staff_member
                    .map(|m| format!("{} ({})", m.id.as_str(), m.name))
                    .unwrap_or_else(|| "-".to_string());
                println!("{} | {} | {}", day.date, day.weekday(), assigned);
            }

            let issues = scheduler.audit(&days);
            if issues.is_empty() {
                0
            } else {
                eprintln!("Found {} issue(s)", issues.len());
                for issue in &issues {
                    let kind = match issue.kind {
                        IssueKind::Uncovered => "uncovered",
                        IssueKind::OffDayAssignment => "off-day",
                        IssueKind::OnVacation => "on-vacation",
                    };
                    let staff = issue.staff.as_ref().map(StaffId::as_str).unwrap_or("-");
                    eprintln!("{} | {} | {}", issue.date, kind, staff);
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Remind {
            calendar,
            id,
            days_before,
            today,
            out,
        } => {
            let id = StaffId::new(id);
            if find_member(&roster, &id).is_none() {
                return Err(CalendarError::UnknownStaff(id.as_str().to_string()).into());
            }
            let today = match today {
                Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .with_context(|| format!("invalid --today value: {raw}"))?,
                None => Utc::now().date_naive(),
            };
            let days = build_calendar(&scheduler, &calendar)?;
            let reminder = prepare_reminder(&days, &id, days_before, today, &TextReminder)?;
            std::fs::write(&out, &reminder.content)?;
            println!(
                "Reminder generated for {} (day {}) on {}",
                reminder.staff_id, reminder.date, reminder.notice_on
            );
            0
        }
    };

    std::process::exit(code);
}

fn build_calendar<'a>(scheduler: &Scheduler<'a>, args: &CalendarArgs) -> Result<Vec<Day<'a>>> {
    let month = args.month - 1;
    let mut days = match args.seed {
        Some(seed) => {
            scheduler.generate_with(args.year, month, &mut StdRng::seed_from_u64(seed))
        }
        None => scheduler.generate(args.year, month),
    };
    for raw in &args.assign {
        let (date, staff) = parse_override(raw)?;
        days = scheduler.try_reassign(&days, date, staff.as_ref())?;
    }
    Ok(days)
}
