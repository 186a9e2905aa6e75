use reqwest::Method;
use serde_json::Value;

use crate::api::{endpoints, ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::models::availability::normalize_schedule;
use crate::models::{
    Availability, Id, Package, PackageInput, Psychologist, PsychologistUpdate, Session,
    SessionStatus, SessionUpdate,
};

/// Calls behind the psychologist dashboard: availability, sessions,
/// packages, profile.
pub struct PsychologistService<'a> {
    api: &'a ApiClient,
}

impl<'a> PsychologistService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn availability(&self) -> Result<Vec<Availability>, ApiError> {
        let schedule: Vec<Availability> = self.api.get(endpoints::MY_AVAILABILITY).await?;
        Ok(normalize_schedule(schedule))
    }

    /// Replaces the whole schedule; the backend keeps whatever is sent.
    pub async fn set_availability(
        &self,
        schedule: Vec<Availability>,
    ) -> Result<Vec<Availability>, ApiError> {
        let schedule = normalize_schedule(schedule);
        let saved: Value = self.api.put(endpoints::MY_AVAILABILITY, &schedule).await?;
        // some deployments echo the schedule, others only acknowledge
        match serde_json::from_value::<Vec<Availability>>(saved) {
            Ok(echoed) => Ok(normalize_schedule(echoed)),
            Err(_) => Ok(schedule),
        }
    }

    pub async fn sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.api.get(endpoints::MY_SESSIONS).await
    }

    /// Generic update. The status is sent as given; legality is the
    /// backend's call.
    pub async fn update_session(
        &self,
        id: &Id,
        update: &SessionUpdate,
    ) -> Result<Session, ApiError> {
        self.api.put(&endpoints::my_session(id), update).await
    }

    pub async fn complete_session(
        &self,
        id: &Id,
        summary: Option<String>,
    ) -> Result<Session, ApiError> {
        let update = SessionUpdate {
            summary,
            ..SessionUpdate::status(SessionStatus::Completed)
        };
        self.update_session(id, &update).await
    }

    pub async fn mark_no_show(&self, id: &Id) -> Result<Session, ApiError> {
        self.update_session(id, &SessionUpdate::status(SessionStatus::NoShow))
            .await
    }

    pub async fn cancel_session(&self, id: &Id) -> Result<Session, ApiError> {
        self.update_session(id, &SessionUpdate::status(SessionStatus::Cancelled))
            .await
    }

    pub async fn approve_reschedule(&self, id: &Id) -> Result<Session, ApiError> {
        self.decide_reschedule(id, true).await
    }

    pub async fn reject_reschedule(&self, id: &Id) -> Result<Session, ApiError> {
        self.decide_reschedule(id, false).await
    }

    async fn decide_reschedule(&self, id: &Id, approve: bool) -> Result<Session, ApiError> {
        self.api
            .request(
                &endpoints::my_session_reschedule(id, approve),
                RequestOptions::new(Method::PUT),
            )
            .await
    }

    pub async fn packages(&self) -> Result<Vec<Package>, ApiError> {
        self.api.get(endpoints::MY_PACKAGES).await
    }

    pub async fn create_package(&self, package: &PackageInput) -> Result<Package, ApiError> {
        self.api.post(endpoints::MY_PACKAGES, package).await
    }

    pub async fn update_package(
        &self,
        id: &Id,
        package: &PackageInput,
    ) -> Result<Package, ApiError> {
        self.api.put(&endpoints::my_package(id), package).await
    }

    pub async fn delete_package(&self, id: &Id) -> Result<(), ApiError> {
        let _: Value = self.api.delete(&endpoints::my_package(id)).await?;
        Ok(())
    }

    pub async fn profile(&self) -> Result<Psychologist, ApiError> {
        self.api.get(endpoints::MY_PROFILE).await
    }

    pub async fn update_profile(
        &self,
        update: &PsychologistUpdate,
    ) -> Result<Psychologist, ApiError> {
        self.api.put(endpoints::MY_PROFILE, update).await
    }
}
