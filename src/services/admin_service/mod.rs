// src/services/admin_service/mod.rs

pub mod filters;

pub use filters::{BookingFilter, UserFilter};

use log::info;
use serde_json::Value;

use crate::api::{endpoints, ApiClient};
use crate::error::ApiError;
use crate::models::{
    Id, NewPsychologist, Psychologist, PsychologistUpdate, Session, SessionUpdate, User,
    UserUpdate,
};

/// Calls behind the admin dashboard. Superadmins use the same calls.
pub struct AdminService<'a> {
    api: &'a ApiClient,
}

impl<'a> AdminService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn users(&self, filter: &UserFilter) -> Result<Vec<User>, ApiError> {
        let users: Vec<User> = self.api.get(endpoints::ADMIN_USERS).await?;
        Ok(filter.apply(users))
    }

    pub async fn user(&self, id: &Id) -> Result<User, ApiError> {
        self.api.get(&endpoints::admin_user(id)).await
    }

    pub async fn update_user(&self, id: &Id, update: &UserUpdate) -> Result<User, ApiError> {
        self.api.put(&endpoints::admin_user(id), update).await
    }

    pub async fn delete_user(&self, id: &Id) -> Result<(), ApiError> {
        let _: Value = self.api.delete(&endpoints::admin_user(id)).await?;
        info!("deleted user {}", id);
        Ok(())
    }

    pub async fn doctors(&self) -> Result<Vec<Psychologist>, ApiError> {
        self.api.get(endpoints::ADMIN_DOCTORS).await
    }

    pub async fn create_doctor(&self, doctor: &NewPsychologist) -> Result<Psychologist, ApiError> {
        self.api.post(endpoints::ADMIN_DOCTORS, doctor).await
    }

    pub async fn update_doctor(
        &self,
        id: &Id,
        update: &PsychologistUpdate,
    ) -> Result<Psychologist, ApiError> {
        self.api.put(&endpoints::admin_doctor(id), update).await
    }

    pub async fn delete_doctor(&self, id: &Id) -> Result<(), ApiError> {
        let _: Value = self.api.delete(&endpoints::admin_doctor(id)).await?;
        info!("deleted doctor {}", id);
        Ok(())
    }

    pub async fn bookings(&self, filter: &BookingFilter) -> Result<Vec<Session>, ApiError> {
        let sessions: Vec<Session> = self.api.get(endpoints::ADMIN_BOOKINGS).await?;
        Ok(filter.apply(sessions))
    }

    pub async fn update_booking(
        &self,
        id: &Id,
        update: &SessionUpdate,
    ) -> Result<Session, ApiError> {
        self.api.put(&endpoints::admin_booking(id), update).await
    }

    pub async fn delete_booking(&self, id: &Id) -> Result<(), ApiError> {
        let _: Value = self.api.delete(&endpoints::admin_booking(id)).await?;
        info!("deleted booking {}", id);
        Ok(())
    }
}
