use std::fmt;

use serde::{Deserialize, Serialize};

use catalog_cell::models::{DaySection, Doctor, DoctorSchedule};

// ==============================================================================
// WIZARD STATE MACHINE
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Specialty,
    Doctor,
    Schedule,
    Confirm,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::Specialty => write!(f, "specialty"),
            WizardStep::Doctor => write!(f, "doctor"),
            WizardStep::Schedule => write!(f, "schedule"),
            WizardStep::Confirm => write!(f, "confirm"),
        }
    }
}

/// The consultation booking flow: specialty → doctor → schedule → confirm,
/// linear except the deep-link skip path. The gateway holds no flow state
/// between requests; this snapshot travels with each `/flow` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub step: WizardStep,
    #[serde(default)]
    pub specialty_id: Option<String>,
    #[serde(default)]
    pub doctor: Option<Doctor>,
    #[serde(default)]
    pub schedule: Option<DoctorSchedule>,
    /// Started from a doctor deep link: no specialty/doctor-list context
    /// exists, so backing out of `schedule` returns to `specialty`.
    #[serde(default)]
    pub deep_linked: bool,
    /// None while a slot fetch is outstanding; Some(empty) is the explicit
    /// no-open-slots state.
    #[serde(default)]
    pub day_sections: Option<Vec<DaySection>>,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Specialty,
            specialty_id: None,
            doctor: None,
            schedule: None,
            deep_linked: false,
            day_sections: None,
        }
    }

    /// Deep-link entry: the doctor is already chosen, start at `schedule`.
    pub fn for_doctor(doctor: Doctor) -> Self {
        Self {
            step: WizardStep::Schedule,
            specialty_id: None,
            doctor: Some(doctor),
            schedule: None,
            deep_linked: true,
            day_sections: None,
        }
    }

    /// Choosing a specialty invalidates everything downstream of it.
    pub fn select_specialty(&mut self, specialty_id: String) {
        self.specialty_id = Some(specialty_id);
        self.doctor = None;
        self.schedule = None;
        self.day_sections = None;
        self.step = WizardStep::Doctor;
    }

    /// Choosing a doctor clears any previously picked slot and moves to the
    /// schedule step. The caller is expected to trigger a slot fetch next.
    pub fn select_doctor(&mut self, doctor: Doctor) -> Result<(), WizardError> {
        if self.specialty_id.is_none() && !self.deep_linked {
            return Err(WizardError::SpecialtyNotSelected);
        }

        self.doctor = Some(doctor);
        self.schedule = None;
        self.day_sections = None;
        self.step = WizardStep::Schedule;
        Ok(())
    }

    /// Pick a slot from the currently offered sections. Slots that were
    /// never offered (unknown id, booked) are rejected.
    pub fn select_schedule_by_id(&mut self, schedule_id: &str) -> Result<(), WizardError> {
        let slot = self
            .day_sections
            .as_ref()
            .and_then(|days| {
                days.iter()
                    .flat_map(|day| day.slots.iter())
                    .find(|slot| slot.schedule_id == schedule_id)
            })
            .cloned()
            .ok_or(WizardError::SlotUnavailable)?;

        self.select_schedule(slot)
    }

    pub fn select_schedule(&mut self, slot: DoctorSchedule) -> Result<(), WizardError> {
        if self.doctor.is_none() {
            return Err(WizardError::DoctorNotSelected);
        }
        if slot.is_booked {
            return Err(WizardError::SlotUnavailable);
        }

        self.schedule = Some(slot);
        self.step = WizardStep::Confirm;
        Ok(())
    }

    /// One step toward the start. Selections of the step being returned to
    /// are preserved; only forward selections invalidate state.
    pub fn back(&mut self) {
        self.step = match self.step {
            WizardStep::Specialty => WizardStep::Specialty,
            WizardStep::Doctor => WizardStep::Specialty,
            WizardStep::Schedule => {
                if self.deep_linked {
                    WizardStep::Specialty
                } else {
                    WizardStep::Doctor
                }
            }
            WizardStep::Confirm => WizardStep::Schedule,
        };
    }

    /// Apply a slot payload tagged with the doctor id it was fetched for.
    /// A payload whose tag no longer matches the current selection is
    /// dropped, so a late response for a stale selection can never
    /// overwrite a newer one.
    pub fn apply_slots(&mut self, doctor_id: &str, sections: Vec<DaySection>) -> bool {
        let current = self.doctor.as_ref().map(|doctor| doctor.id.as_str());
        if current != Some(doctor_id) {
            return false;
        }

        self.day_sections = Some(sections);
        true
    }

    /// Explicit empty state: slots resolved, nothing open.
    pub fn has_no_open_slots(&self) -> bool {
        self.day_sections
            .as_ref()
            .is_some_and(|days| days.is_empty())
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Flow events, as posted by the UI to `/flow/advance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WizardEvent {
    #[serde(rename_all = "camelCase")]
    SelectSpecialty { specialty_id: String },
    #[serde(rename_all = "camelCase")]
    SelectDoctor { doctor_id: String },
    #[serde(rename_all = "camelCase")]
    SelectSchedule { schedule_id: String },
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum WizardError {
    #[error("Select a specialty before choosing a doctor")]
    SpecialtyNotSelected,

    #[error("Select a doctor before choosing a schedule")]
    DoctorNotSelected,

    #[error("This slot is not available")]
    SlotUnavailable,
}

/// One `/flow` round trip: the updated state plus an optional non-blocking
/// notice (e.g. the slot fetch failed and the list stayed empty).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowTurn {
    pub state: WizardState,
    #[serde(default)]
    pub notice: Option<String>,
}

// ==============================================================================
// BOOKING SUBMISSION
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AppointmentStatus {
    #[serde(rename = "SCHEDULED")]
    Scheduled,
    #[serde(rename = "INPROGRESS")]
    InProgress,
    #[serde(rename = "COMPLETED")]
    Completed,
    #[serde(rename = "CANCELED")]
    Canceled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "SCHEDULED"),
            AppointmentStatus::InProgress => write!(f, "INPROGRESS"),
            AppointmentStatus::Completed => write!(f, "COMPLETED"),
            AppointmentStatus::Canceled => write!(f, "CANCELED"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

/// The booking submission as posted by the confirm step. Both ids are
/// optional on the wire so an incomplete selection is a detectable state
/// rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub schedule_id: Option<String>,
}

/// Creation payload returned by the platform. `payment_url` is present only
/// here, never on later appointment reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub payment_url: Option<String>,
}

/// Every way a submission can end. Exactly one outcome per attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    /// Doctor or schedule missing; nothing happened.
    Incomplete,
    /// Session still resolving; nothing happened, no error shown.
    Deferred,
    /// Not signed in: send to login with a way back to the booking page.
    LoginRedirect { login_url: String },
    /// Signed in with a non-patient role: send to that role's home.
    DashboardRedirect { home: String },
    /// Booked; hand the user off to the external payment page.
    PaymentRedirect { payment_url: String },
    /// Booking refused or payment session missing; confirm state is kept so
    /// the user can retry.
    Failed { message: String },
}
