use super::{util, CalendarError};
use crate::model::{find_member, Day, StaffId, StaffMember};
use chrono::NaiveDate;

pub(super) fn reassign<'a>(
    days: &[Day<'a>],
    date: NaiveDate,
    staff: Option<&StaffId>,
    roster: &'a [StaffMember],
) -> Vec<Day<'a>> {
    let member = staff.and_then(|id| find_member(roster, id));
    days.iter()
        .map(|day| {
            if util::is_same_day(day.date, date) {
                Day {
                    date: day.date,
                    staff_member: member,
                }
            } else {
                *day
            }
        })
        .collect()
}

pub(super) fn try_reassign<'a>(
    days: &[Day<'a>],
    date: NaiveDate,
    staff: Option<&StaffId>,
    roster: &'a [StaffMember],
) -> Result<Vec<Day<'a>>, CalendarError> {
    if !days.iter().any(|d| util::is_same_day(d.date, date)) {
        return Err(CalendarError::UnknownDay(date));
    }
    if let Some(id) = staff {
        if find_member(roster, id).is_none() {
            return Err(CalendarError::UnknownStaff(id.as_str().to_string()));
        }
    }
    Ok(reassign(days, date, staff, roster))
}

/// Lit une surcharge `AAAA-MM-JJ=ID` ; `AAAA-MM-JJ=` vide la journée.
pub fn parse_override(raw: &str) -> Result<(NaiveDate, Option<StaffId>), CalendarError> {
    let Some((date_raw, id_raw)) = raw.split_once('=') else {
        return Err(CalendarError::InvalidOverride(format!(
            "expected DATE=ID, got {raw:?}"
        )));
    };
    let date = NaiveDate::parse_from_str(date_raw.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidOverride(format!("invalid date {date_raw:?}")))?;
    let id = id_raw.trim();
    let staff = (!id.is_empty()).then(|| StaffId::new(id));
    Ok((date, staff))
}
