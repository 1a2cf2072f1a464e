use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Medical field of practice used to filter the doctor directory.
/// Immutable reference data owned by the platform backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A doctor's link to one specialty. Older platform API versions spell the
/// foreign key three different ways; all are accepted here so nothing
/// downstream has to know about the drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyAssociation {
    #[serde(alias = "specialityId", alias = "specialitiesId")]
    pub specialty_id: String,
    #[serde(default)]
    pub specialty: Option<Specialty>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub appointment_fee: Option<f64>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub specialties: Vec<SpecialtyAssociation>,
}

impl Doctor {
    /// Match against either the association id or the embedded specialty
    /// title, case-insensitively.
    pub fn practices(&self, specialty: &str) -> bool {
        self.specialties.iter().any(|assoc| {
            assoc.specialty_id.eq_ignore_ascii_case(specialty)
                || assoc
                    .specialty
                    .as_ref()
                    .is_some_and(|s| s.title.eq_ignore_ascii_case(specialty))
        })
    }
}

/// One bookable time window, independent of any doctor assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    pub start_date_time: DateTime<FixedOffset>,
    pub end_date_time: DateTime<FixedOffset>,
}

/// Assignment of a schedule to a doctor. `is_booked` flips to true exactly
/// once, when an appointment is created against it; the platform never
/// reopens a consumed slot at this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSchedule {
    pub schedule_id: String,
    pub doctor_id: String,
    pub is_booked: bool,
    pub schedule: Schedule,
}

impl DoctorSchedule {
    /// Calendar date used for grouping: the date in the timestamp's own
    /// offset, so grouping and display agree across midnight.
    pub fn slot_date(&self) -> NaiveDate {
        self.schedule.start_date_time.date_naive()
    }
}

/// One rendered section of the slot picker: a calendar date and its open
/// slots in ascending start order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySection {
    pub date: NaiveDate,
    pub slots: Vec<DoctorSchedule>,
}
