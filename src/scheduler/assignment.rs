use super::{util, Scheduler};
use crate::model::{Day, StaffId, StaffMember};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub(super) fn generate<'a, R: Rng + ?Sized>(
    scheduler: &Scheduler<'a>,
    year: i32,
    month: u32,
    rng: &mut R,
) -> Vec<Day<'a>> {
    let mut days: Vec<Day<'a>> = util::month_dates(year, month)
        .into_iter()
        .map(Day::unassigned)
        .collect();

    let mut order: Vec<&'a StaffMember> = scheduler.roster.iter().collect();
    order.shuffle(rng);

    let mut ledger = Ledger::default();
    let mut uncovered = 0usize;

    for day in days.iter_mut() {
        if !scheduler.requires_coverage(day.date) {
            continue;
        }
        let weekend_week = util::is_weekend(day.date).then(|| util::week_number(day.date));

        let candidates = ledger.candidates(&order, day.date, weekend_week);
        let Some(chosen) = ledger.pick(&candidates) else {
            warn!(date = %day.date, "no eligible staff member");
            uncovered += 1;
            continue;
        };

        debug!(date = %day.date, staff = chosen.id.as_str(), "assigned");
        day.staff_member = Some(chosen);
        ledger.record(chosen, weekend_week);
    }

    bridge_holidays(scheduler, &mut days);

    info!(
        year,
        month,
        days = days.len(),
        staff = order.len(),
        uncovered,
        "calendar generated"
    );
    days
}

/// Compteurs d'un passage : nombre de plantões et dernière semaine de week-end.
#[derive(Default)]
struct Ledger<'a> {
    shifts: HashMap<&'a StaffId, u32>,
    last_weekend: HashMap<&'a StaffId, u32>,
}

impl<'a> Ledger<'a> {
    fn candidates(
        &self,
        order: &[&'a StaffMember],
        date: NaiveDate,
        weekend_week: Option<u32>,
    ) -> Vec<&'a StaffMember> {
        let available: Vec<&'a StaffMember> = order
            .iter()
            .copied()
            .filter(|m| !m.is_on_vacation(date))
            .collect();

        let Some(previous) = weekend_week.and_then(|w| w.checked_sub(1)) else {
            return available;
        };

        // règle souple : on n'écarte ceux du week-end précédent que s'il reste quelqu'un
        let rested: Vec<&'a StaffMember> = available
            .iter()
            .copied()
            .filter(|m| self.last_weekend.get(&m.id) != Some(&previous))
            .collect();
        if rested.is_empty() {
            available
        } else {
            rested
        }
    }

    /// Plus petit compteur ; à égalité, le premier dans l'ordre mélangé.
    fn pick(&self, candidates: &[&'a StaffMember]) -> Option<&'a StaffMember> {
        candidates
            .iter()
            .copied()
            .min_by_key(|m| self.shifts.get(&m.id).copied().unwrap_or(0))
    }

    fn record(&mut self, member: &'a StaffMember, weekend_week: Option<u32>) {
        *self.shifts.entry(&member.id).or_insert(0) += 1;
        if let Some(week) = weekend_week {
            self.last_weekend.insert(&member.id, week);
        }
    }
}

/// Un férié en semaine collé à un week-end couvert reprend la personne du week-end,
/// sauf si elle est en congés ce jour-là.
fn bridge_holidays<'a>(scheduler: &Scheduler<'a>, days: &mut [Day<'a>]) {
    for idx in 0..days.len() {
        let date = days[idx].date;
        if !scheduler.is_holiday(date) || util::is_weekend(date) {
            continue;
        }

        let assigned_weekend = |i: usize| {
            days.get(i)
                .filter(|d| util::is_weekend(d.date))
                .and_then(|d| d.staff_member)
                .filter(|m| !m.is_on_vacation(date))
        };
        let next = assigned_weekend(idx + 1);
        let prev = idx.checked_sub(1).and_then(assigned_weekend);

        if let Some(member) = next.or(prev) {
            debug!(date = %date, staff = member.id.as_str(), "holiday bridged to weekend");
            days[idx].staff_member = Some(member);
        }
    }
}
