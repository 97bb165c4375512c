use crate::model::StaffId;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Uncovered,        // jour à couvrir sans personne éligible
    OffDayAssignment, // affectation un jour ouvré non férié
    OnVacation,       // personne affectée pendant ses congés
}

/// Anomalie signalée par l'audit d'un calendrier (jamais bloquante).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub date: NaiveDate,
    pub staff: Option<StaffId>,
    pub kind: IssueKind,
}

/// Nombre de jours affectés à un membre sur un calendrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub staff: StaffId,
    pub name: String,
    pub days: usize,
}

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("unknown staff member: {0}")]
    UnknownStaff(String),
    #[error("no day {0} in calendar")]
    UnknownDay(NaiveDate),
    #[error("invalid override: {0}")]
    InvalidOverride(String),
}
