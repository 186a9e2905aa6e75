pub mod admin_service;
pub mod auth_service;
pub mod client_service;
pub mod directory_service;
pub mod psychologist_service;
pub mod superadmin_service;

pub use admin_service::{AdminService, BookingFilter, UserFilter};
pub use auth_service::AuthService;
pub use client_service::ClientService;
pub use directory_service::DirectoryService;
pub use psychologist_service::PsychologistService;
pub use superadmin_service::{NewAdmin, SuperadminService};

use crate::api::ApiClient;

impl ApiClient {
    pub fn auth_service(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn directory(&self) -> DirectoryService<'_> {
        DirectoryService::new(self)
    }

    pub fn clients(&self) -> ClientService<'_> {
        ClientService::new(self)
    }

    pub fn psychologists(&self) -> PsychologistService<'_> {
        PsychologistService::new(self)
    }

    pub fn admin(&self) -> AdminService<'_> {
        AdminService::new(self)
    }

    pub fn superadmin(&self) -> SuperadminService<'_> {
        SuperadminService::new(self)
    }
}
