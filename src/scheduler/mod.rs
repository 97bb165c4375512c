mod assignment;
mod audit;
mod mutate;
mod types;
mod util;

pub use audit::tally;
pub use mutate::parse_override;
pub use types::{CalendarError, Issue, IssueKind, Tally};
pub use util::{is_holiday, is_same_day, is_weekend, week_number};

use crate::model::{Day, Holiday, StaffId, StaffMember};
use chrono::NaiveDate;
use rand::Rng;
use std::collections::HashSet;

/// Scheduler : roster et fériés d'une organisation, prêts pour la génération.
///
/// Aucun état n'est conservé entre deux générations ; plusieurs appels
/// concurrents sur le même `Scheduler` sont indépendants.
#[derive(Debug, Clone)]
pub struct Scheduler<'a> {
    roster: &'a [StaffMember],
    holidays: HashSet<NaiveDate>,
}

impl<'a> Scheduler<'a> {
    pub fn new(roster: &'a [StaffMember], holidays: &[Holiday]) -> Self {
        Self {
            roster,
            holidays: holidays.iter().map(|h| h.date).collect(),
        }
    }

    pub fn roster(&self) -> &'a [StaffMember] {
        self.roster
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        util::is_holiday(date, &self.holidays)
    }

    /// Week-end ou férié.
    pub fn requires_coverage(&self, date: NaiveDate) -> bool {
        util::is_weekend(date) || self.is_holiday(date)
    }

    /// Calendrier du mois `month` (0 = janvier), mélange via le RNG du thread.
    pub fn generate(&self, year: i32, month: u32) -> Vec<Day<'a>> {
        self.generate_with(year, month, &mut rand::rng())
    }

    /// Comme [`Scheduler::generate`], avec une source d'aléa fournie (tests, rejeu).
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        year: i32,
        month: u32,
        rng: &mut R,
    ) -> Vec<Day<'a>> {
        assignment::generate(self, year, month, rng)
    }

    pub fn reassign(
        &self,
        days: &[Day<'a>],
        date: NaiveDate,
        staff: Option<&StaffId>,
    ) -> Vec<Day<'a>> {
        mutate::reassign(days, date, staff, self.roster)
    }

    /// Variante vérifiée : date absente ou identifiant inconnu sont des erreurs.
    pub fn try_reassign(
        &self,
        days: &[Day<'a>],
        date: NaiveDate,
        staff: Option<&StaffId>,
    ) -> Result<Vec<Day<'a>>, CalendarError> {
        mutate::try_reassign(days, date, staff, self.roster)
    }

    pub fn audit(&self, days: &[Day<'_>]) -> Vec<Issue> {
        audit::audit(self, days)
    }
}

/// Génère le calendrier de plantão d'un mois (0 = janvier).
///
/// N'échoue jamais : roster vide ou tout le monde en congés donnent des
/// journées sans affectation.
pub fn generate_calendar<'a>(
    year: i32,
    month: u32,
    roster: &'a [StaffMember],
    holidays: &[Holiday],
) -> Vec<Day<'a>> {
    Scheduler::new(roster, holidays).generate(year, month)
}

pub fn generate_calendar_with<'a, R: Rng + ?Sized>(
    year: i32,
    month: u32,
    roster: &'a [StaffMember],
    holidays: &[Holiday],
    rng: &mut R,
) -> Vec<Day<'a>> {
    Scheduler::new(roster, holidays).generate_with(year, month, rng)
}

/// Remplace l'affectation d'un seul jour, sans recalcul.
///
/// Identifiant inconnu : le jour devient vide. Date absente : séquence inchangée.
pub fn reassign<'a>(
    days: &[Day<'a>],
    date: NaiveDate,
    staff: Option<&StaffId>,
    roster: &'a [StaffMember],
) -> Vec<Day<'a>> {
    mutate::reassign(days, date, staff, roster)
}

pub fn audit(days: &[Day<'_>], roster: &[StaffMember], holidays: &[Holiday]) -> Vec<Issue> {
    Scheduler::new(roster, holidays).audit(days)
}
