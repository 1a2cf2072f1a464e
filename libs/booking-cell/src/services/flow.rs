use tracing::{debug, warn};

use catalog_cell::services::directory::DirectoryService;
use catalog_cell::services::slots::ScheduleService;
use shared_config::AppConfig;

use crate::models::{FlowTurn, WizardError, WizardEvent, WizardState};

pub const SCHEDULE_LOAD_NOTICE: &str = "Failed to load schedules";

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error("Doctor not found")]
    DoctorNotFound,
}

/// Drives the wizard: pure transitions live on `WizardState`; this service
/// adds the side effects (doctor lookup, slot fetch) around them.
pub struct BookingFlowService {
    directory: DirectoryService,
    schedules: ScheduleService,
}

impl BookingFlowService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            directory: DirectoryService::new(config),
            schedules: ScheduleService::new(config),
        }
    }

    /// Start a flow, optionally deep-linked to a doctor. The deep-link path
    /// skips straight to the schedule step and loads slots immediately.
    pub async fn start(&self, doctor_id: Option<&str>) -> Result<FlowTurn, FlowError> {
        let doctor_id = match doctor_id {
            Some(id) if !id.is_empty() => id,
            _ => {
                return Ok(FlowTurn {
                    state: WizardState::new(),
                    notice: None,
                })
            }
        };

        let doctor = self
            .directory
            .get_doctor(doctor_id)
            .await
            .map_err(|_| FlowError::DoctorNotFound)?;

        let mut state = WizardState::for_doctor(doctor);
        let notice = self.load_slots(&mut state).await;

        Ok(FlowTurn { state, notice })
    }

    pub async fn advance(
        &self,
        mut state: WizardState,
        event: WizardEvent,
    ) -> Result<FlowTurn, FlowError> {
        let mut notice = None;

        match event {
            WizardEvent::SelectSpecialty { specialty_id } => {
                state.select_specialty(specialty_id);
            }
            WizardEvent::SelectDoctor { doctor_id } => {
                let doctor = self
                    .directory
                    .get_doctor(&doctor_id)
                    .await
                    .map_err(|_| FlowError::DoctorNotFound)?;
                state.select_doctor(doctor)?;
                notice = self.load_slots(&mut state).await;
            }
            WizardEvent::SelectSchedule { schedule_id } => {
                state.select_schedule_by_id(&schedule_id)?;
            }
            WizardEvent::Back => {
                state.back();
            }
        }

        debug!("Flow advanced to step {}", state.step);
        Ok(FlowTurn { state, notice })
    }

    /// Fetch slots for the state's current doctor. The payload is tagged
    /// with the doctor id captured at dispatch; `apply_slots` drops it if
    /// the selection moved on. A fetch failure leaves the list empty and
    /// surfaces as a notice, never as a flow error.
    async fn load_slots(&self, state: &mut WizardState) -> Option<String> {
        let doctor_id = match state.doctor.as_ref() {
            Some(doctor) => doctor.id.clone(),
            None => return None,
        };

        match self.schedules.day_sections(&doctor_id).await {
            Ok(sections) => {
                if !state.apply_slots(&doctor_id, sections) {
                    debug!("Discarding stale slot payload for doctor {}", doctor_id);
                }
                None
            }
            Err(e) => {
                warn!("Failed to load schedules for doctor {}: {}", doctor_id, e);
                state.apply_slots(&doctor_id, Vec::new());
                Some(SCHEDULE_LOAD_NOTICE.to_string())
            }
        }
    }
}
