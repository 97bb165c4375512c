use super::{Issue, IssueKind, Scheduler, Tally};
use crate::model::{Day, StaffMember};

pub(super) fn audit(scheduler: &Scheduler<'_>, days: &[Day<'_>]) -> Vec<Issue> {
    let mut out = Vec::new();

    for day in days {
        let covered = scheduler.requires_coverage(day.date);
        match day.staff_member {
            None if covered => out.push(Issue {
                date: day.date,
                staff: None,
                kind: IssueKind::Uncovered,
            }),
            None => {}
            Some(member) => {
                if !covered {
                    out.push(Issue {
                        date: day.date,
                        staff: Some(member.id.clone()),
                        kind: IssueKind::OffDayAssignment,
                    });
                }
                if member.is_on_vacation(day.date) {
                    out.push(Issue {
                        date: day.date,
                        staff: Some(member.id.clone()),
                        kind: IssueKind::OnVacation,
                    });
                }
            }
        }
    }

    out
}

/// Décompte par membre, dans l'ordre du roster, zéros compris.
pub fn tally(days: &[Day<'_>], roster: &[StaffMember]) -> Vec<Tally> {
    roster
        .iter()
        .map(|member| Tally {
            staff: member.id.clone(),
            name: member.name.clone(),
            days: days
                .iter()
                .filter(|d| d.staff_id() == Some(&member.id))
                .count(),
        })
        .collect()
}
