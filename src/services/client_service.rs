use log::info;
use reqwest::Method;

use crate::api::{endpoints, ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::models::{ClientProfile, Id, NewBooking, RescheduleRequest, Session};

/// Calls behind the client dashboard and the booking guide.
pub struct ClientService<'a> {
    api: &'a ApiClient,
}

impl<'a> ClientService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.api.get(endpoints::CLIENT_SESSIONS).await
    }

    pub async fn book(&self, booking: &NewBooking) -> Result<Session, ApiError> {
        let session: Session = self.api.post(endpoints::CLIENT_SESSIONS, booking).await?;
        info!(
            "booked session {} on {} at {}",
            session.id, session.scheduled_date, session.scheduled_time
        );
        Ok(session)
    }

    pub async fn cancel(&self, id: &Id) -> Result<Session, ApiError> {
        self.api
            .request(
                &endpoints::client_session_cancel(id),
                RequestOptions::new(Method::PUT),
            )
            .await
    }

    pub async fn request_reschedule(
        &self,
        id: &Id,
        request: &RescheduleRequest,
    ) -> Result<Session, ApiError> {
        self.api
            .put(&endpoints::client_session_reschedule(id), request)
            .await
    }

    pub async fn profile(&self) -> Result<ClientProfile, ApiError> {
        self.api.get(endpoints::CLIENT_PROFILE).await
    }

    pub async fn update_profile(&self, profile: &ClientProfile) -> Result<ClientProfile, ApiError> {
        self.api.put(endpoints::CLIENT_PROFILE, profile).await
    }
}
