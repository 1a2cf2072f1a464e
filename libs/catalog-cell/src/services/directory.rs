use anyhow::{anyhow, Result};
use reqwest::Method;
use tracing::debug;

use shared_config::AppConfig;
use shared_platform::PlatformClient;

use crate::models::{Doctor, Specialty};

pub struct DirectoryService {
    platform: PlatformClient,
}

impl DirectoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            platform: PlatformClient::new(config),
        }
    }

    pub async fn list_specialties(&self) -> Result<Vec<Specialty>> {
        debug!("Fetching specialties");

        let specialties: Vec<Specialty> = self
            .platform
            .request(Method::GET, "/specialties", None, None)
            .await?;

        Ok(specialties)
    }

    /// List doctors, optionally filtered by specialty id or title.
    ///
    /// The filter is passed upstream and re-applied locally against the
    /// normalized associations, since older backend versions ignore the
    /// query parameter.
    pub async fn list_doctors(&self, specialty: Option<&str>) -> Result<Vec<Doctor>> {
        let path = match specialty {
            Some(filter) => format!("/doctors?specialty={}", filter),
            None => "/doctors".to_string(),
        };
        debug!("Fetching doctors: {}", path);

        let mut doctors: Vec<Doctor> = self.platform.request(Method::GET, &path, None, None).await?;

        if let Some(filter) = specialty {
            doctors.retain(|doctor| doctor.practices(filter));
        }

        Ok(doctors)
    }

    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Doctor> {
        if doctor_id.is_empty() {
            return Err(anyhow!("Doctor id must not be empty"));
        }
        debug!("Fetching doctor: {}", doctor_id);

        let path = format!("/doctors/{}", doctor_id);
        let doctor: Doctor = self.platform.request(Method::GET, &path, None, None).await?;

        Ok(doctor)
    }
}
