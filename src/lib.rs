#![forbid(unsafe_code)]
//! Plantão — génération de calendriers d'astreinte mensuels (week-ends et fériés).
//!
//! - Équité : le moins servi d'abord, ordre mélangé à chaque génération.
//! - Congés respectés, week-ends consécutifs évités quand c'est possible.
//! - Pont : un férié collé à un week-end reprend la personne du week-end.
//! - Dates calendaires pures (`NaiveDate`), aucune dépendance au fuseau local.
//! - Aucune E/S dans le cœur ; import/export fichiers dans [`io`].

pub mod io;
pub mod model;
pub mod notification;
pub mod scheduler;

pub use model::{Day, Holiday, HolidayKind, StaffId, StaffMember, VacationInterval};
pub use notification::{prepare_reminder, Reminder, ReminderRenderer, TextReminder};
pub use scheduler::{
    audit, generate_calendar, generate_calendar_with, reassign, CalendarError, Issue, IssueKind,
    Scheduler, Tally,
};
