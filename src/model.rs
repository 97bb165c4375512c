use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Identifiant fort pour StaffMember
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Membre de l'équipe de plantão
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    #[serde(default)]
    pub vacations: Vec<VacationInterval>,
}

impl StaffMember {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self::with_id(StaffId::random(), name)
    }

    pub fn with_id<N: Into<String>>(id: StaffId, name: N) -> Self {
        Self {
            id,
            name: name.into(),
            vacations: Vec::new(),
        }
    }

    pub fn with_vacation(mut self, vacation: VacationInterval) -> Self {
        self.vacations.push(vacation);
        self
    }

    /// Vrai si l'une des périodes de congés couvre `date`.
    pub fn is_on_vacation(&self, date: NaiveDate) -> bool {
        self.vacations.iter().any(|v| v.covers(date))
    }
}

/// Période de congés, jours entiers, bornes incluses.
///
/// Une borne absente (ou vide côté JSON) rend la période inerte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationInterval {
    pub id: String,
    #[serde(default, deserialize_with = "blank_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_date")]
    pub end_date: Option<NaiveDate>,
}

impl VacationInterval {
    /// Crée une période en validant que `start <= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if end < start {
            return Err("vacation end must not be before start".to_string());
        }
        Ok(Self::partial(Some(start), Some(end)))
    }

    /// Période sans validation ; utile pour représenter des saisies incomplètes.
    pub fn partial(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start_date: start,
            end_date: end,
        }
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }
}

fn blank_date<'de, D>(de: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Classification d'un jour férié (informative uniquement)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayKind {
    National,
    Custom,
}

/// Jour férié (date calendaire, sans heure)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<HolidayKind>,
}

impl Holiday {
    pub fn new<N: Into<String>>(date: NaiveDate, name: N) -> Self {
        Self {
            date,
            name: name.into(),
            kind: None,
        }
    }
}

/// Jour du calendrier généré ; `staff_member` pointe dans le roster d'entrée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Day<'a> {
    pub date: NaiveDate,
    pub staff_member: Option<&'a StaffMember>,
}

impl<'a> Day<'a> {
    pub fn unassigned(date: NaiveDate) -> Self {
        Self {
            date,
            staff_member: None,
        }
    }

    pub fn staff_id(&self) -> Option<&'a StaffId> {
        self.staff_member.map(|m| &m.id)
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

pub fn find_member<'a>(roster: &'a [StaffMember], id: &StaffId) -> Option<&'a StaffMember> {
    roster.iter().find(|m| &m.id == id)
}
