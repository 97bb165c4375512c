use crate::model::{Day, Holiday, HolidayKind, StaffId, StaffMember, VacationInterval};
use crate::scheduler::Tally;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Roster JSON : tableau de `{id, name, vacations: [{id, startDate, endDate}]}`.
pub fn load_roster_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<StaffMember>> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let roster = serde_json::from_slice(&data)
        .with_context(|| format!("parsing roster {}", path.display()))?;
    Ok(roster)
}

/// Import du roster depuis CSV: header `id,name[,vacations]`
///
/// `vacations` : `AAAA-MM-JJ/AAAA-MM-JJ` séparés par `;`, ou une date seule.
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<StaffMember>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        if id.is_empty() || name.is_empty() {
            bail!("invalid staff row (empty)");
        }
        let mut member = StaffMember::with_id(StaffId::new(id), name);
        if let Some(ranges) = rec.get(2) {
            let ranges = ranges.trim();
            if !ranges.is_empty() {
                member.vacations = parse_vacations(ranges)
                    .with_context(|| format!("invalid vacations value for {id}"))?;
            }
        }
        out.push(member);
    }
    Ok(out)
}

fn parse_vacations(raw: &str) -> anyhow::Result<Vec<VacationInterval>> {
    raw.split(';')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| parse_vacation_chunk(chunk.trim()))
        .collect()
}

fn parse_vacation_chunk(chunk: &str) -> anyhow::Result<VacationInterval> {
    let (start, end) = match chunk.split_once('/').or_else(|| chunk.split_once("..")) {
        Some((start_raw, end_raw)) => (parse_date(start_raw)?, parse_date(end_raw)?),
        None => {
            let day = parse_date(chunk)?;
            (day, day)
        }
    };
    VacationInterval::new(start, end).map_err(anyhow::Error::msg)
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

/// Fériés JSON : tableau de `{date, name, type?}`.
pub fn load_holidays_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Holiday>> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let holidays = serde_json::from_slice(&data)
        .with_context(|| format!("parsing holidays {}", path.display()))?;
    Ok(holidays)
}

/// Import de fériés: header `date,name[,type]`
pub fn import_holidays_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Holiday>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let date = parse_date(rec.get(0).context("missing date")?)?;
        let name = rec.get(1).context("missing name")?.trim();
        let mut holiday = Holiday::new(date, name);
        if let Some(kind) = rec.get(2) {
            holiday.kind = match kind.trim().to_ascii_lowercase().as_str() {
                "" => None,
                "national" => Some(HolidayKind::National),
                "custom" => Some(HolidayKind::Custom),
                other => bail!("unknown holiday type {other:?} for {date}"),
            };
        }
        out.push(holiday);
    }
    Ok(out)
}

/// Choisit le lecteur selon l'extension (`.json`, sinon CSV).
pub fn load_roster<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<StaffMember>> {
    if is_json(path.as_ref()) {
        load_roster_json(path)
    } else {
        import_staff_csv(path)
    }
}

pub fn load_holidays<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Holiday>> {
    if is_json(path.as_ref()) {
        load_holidays_json(path)
    } else {
        import_holidays_csv(path)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Export JSON du calendrier (jolie mise en forme)
pub fn export_calendar_json<P: AsRef<Path>>(path: P, days: &[Day<'_>]) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(days)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du calendrier: header `date,weekday,staff_id,staff_name`
pub fn export_calendar_csv<P: AsRef<Path>>(path: P, days: &[Day<'_>]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "weekday", "staff_id", "staff_name"])?;
    for day in days {
        let date = day.date.format("%Y-%m-%d").to_string();
        let weekday = day.weekday().to_string();
        let (id, name) = day
            .staff_member
            .map(|m| (m.id.as_str(), m.name.as_str()))
            .unwrap_or(("", ""));
        w.write_record([date.as_str(), weekday.as_str(), id, name])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV du décompte: header `staff_id,staff_name,days`
pub fn export_tally_csv<P: AsRef<Path>>(path: P, tally: &[Tally]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["staff_id", "staff_name", "days"])?;
    let mut buf = itoa::Buffer::new();
    for t in tally {
        w.write_record([t.staff.as_str(), t.name.as_str(), buf.format(t.days)])?;
    }
    w.flush()?;
    Ok(())
}
