use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_holiday(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
    holidays.contains(&date)
}

pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// Semaine du mois au sens de la règle week-end : `jour / 7`, jour 1-based.
pub fn week_number(date: NaiveDate) -> u32 {
    date.day() / 7
}

/// Toutes les dates du mois `month` (0 = janvier).
///
/// Un mois >= 12 déborde sur les années suivantes ; une année hors bornes
/// donne une liste vide.
pub(super) fn month_dates(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(year) = i32::try_from(month / 12)
        .ok()
        .and_then(|carry| year.checked_add(carry))
    else {
        return Vec::new();
    };
    let month = month % 12 + 1;
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect()
}
