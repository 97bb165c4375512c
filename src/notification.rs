use crate::model::{Day, StaffId, StaffMember};
use anyhow::{bail, Context, Result};
use chrono::{Days, NaiveDate};

/// Représente un rappel généré pour un membre.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub staff_id: String,
    pub date: NaiveDate,
    pub notice_on: NaiveDate,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, e-mail, etc.).
pub trait ReminderRenderer {
    fn render(&self, member: &StaffMember, date: NaiveDate, notice_on: NaiveDate) -> String;
}

/// Gabarit texte simple destiné à un futur e-mail.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReminder;

impl ReminderRenderer for TextReminder {
    fn render(&self, member: &StaffMember, date: NaiveDate, notice_on: NaiveDate) -> String {
        format!(
            "Olá {name},\n\nVocê está de plantão em {date} ({weekday}).\nAviso gerado em {notice}.\n",
            name = member.name,
            date = date.format("%Y-%m-%d"),
            weekday = weekday_pt(date),
            notice = notice_on.format("%Y-%m-%d"),
        )
    }
}

fn weekday_pt(date: NaiveDate) -> &'static str {
    use chrono::{Datelike, Weekday};
    match date.weekday() {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Prépare un rappel pour le prochain plantão d'un membre (à partir de `today`).
pub fn prepare_reminder(
    days: &[Day<'_>],
    staff_id: &StaffId,
    days_before: i64,
    today: NaiveDate,
    renderer: &dyn ReminderRenderer,
) -> Result<Reminder> {
    if days_before < 0 {
        bail!("days_before must not be negative");
    }

    let Some((date, member)) = days
        .iter()
        .filter(|d| d.date >= today)
        .find_map(|d| d.staff_member.filter(|m| &m.id == staff_id).map(|m| (d.date, m)))
    else {
        bail!("no upcoming on-call day found for {}", staff_id.as_str());
    };

    let notice_on = date
        .checked_sub_days(Days::new(days_before.unsigned_abs()))
        .context("notice date out of range")?;
    let content = renderer.render(member, date, notice_on);
    Ok(Reminder {
        staff_id: member.id.as_str().to_string(),
        date,
        notice_on,
        content,
    })
}
