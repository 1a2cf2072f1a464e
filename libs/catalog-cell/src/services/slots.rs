use std::collections::BTreeMap;

use anyhow::Result;
use chrono::Utc;
use reqwest::Method;
use tracing::debug;

use shared_config::AppConfig;
use shared_platform::PlatformClient;

use crate::models::{DaySection, DoctorSchedule};

pub struct ScheduleService {
    platform: PlatformClient,
}

impl ScheduleService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            platform: PlatformClient::new(config),
        }
    }

    /// Fetch a doctor's open future slots.
    ///
    /// An empty doctor id is a no-op: empty result, no request. Booked
    /// slots are filtered again locally; they must never reach a picker
    /// even if the upstream query drifts.
    pub async fn open_slots(&self, doctor_id: &str) -> Result<Vec<DoctorSchedule>> {
        if doctor_id.is_empty() {
            return Ok(Vec::new());
        }

        let today = Utc::now().date_naive();
        let path = format!(
            "/doctor-schedules?doctorId={}&isBooked=false&startAfter={}",
            doctor_id, today
        );
        debug!("Fetching open slots for doctor {}", doctor_id);

        let mut slots: Vec<DoctorSchedule> =
            self.platform.request(Method::GET, &path, None, None).await?;

        slots.retain(|slot| !slot.is_booked);

        debug!("Found {} open slots for doctor {}", slots.len(), doctor_id);
        Ok(slots)
    }

    /// Open slots grouped into per-date sections, ready for the picker.
    pub async fn day_sections(&self, doctor_id: &str) -> Result<Vec<DaySection>> {
        let slots = self.open_slots(doctor_id).await?;
        Ok(group_by_day(slots))
    }
}

/// Group slots by their literal calendar date and sort each group ascending
/// by start instant. The backend's ordering is not trusted.
pub fn group_by_day(slots: Vec<DoctorSchedule>) -> Vec<DaySection> {
    let mut by_date: BTreeMap<chrono::NaiveDate, Vec<DoctorSchedule>> = BTreeMap::new();

    for slot in slots {
        by_date.entry(slot.slot_date()).or_default().push(slot);
    }

    by_date
        .into_iter()
        .map(|(date, mut slots)| {
            slots.sort_by(|a, b| {
                a.schedule
                    .start_date_time
                    .cmp(&b.schedule.start_date_time)
            });
            DaySection { date, slots }
        })
        .collect()
}
