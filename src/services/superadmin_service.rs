use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{endpoints, ApiClient};
use crate::error::ApiError;
use crate::models::{Id, Role, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Serialize)]
struct RoleChange {
    role: Role,
}

/// Management of admin accounts, on top of everything `AdminService` does.
pub struct SuperadminService<'a> {
    api: &'a ApiClient,
}

impl<'a> SuperadminService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn admins(&self) -> Result<Vec<User>, ApiError> {
        self.api.get(endpoints::SUPERADMIN_ADMINS).await
    }

    pub async fn create_admin(&self, admin: &NewAdmin) -> Result<User, ApiError> {
        self.api.post(endpoints::SUPERADMIN_ADMINS, admin).await
    }

    pub async fn delete_admin(&self, id: &Id) -> Result<(), ApiError> {
        let _: Value = self.api.delete(&endpoints::superadmin_admin(id)).await?;
        Ok(())
    }

    pub async fn set_role(&self, id: &Id, role: Role) -> Result<User, ApiError> {
        self.api
            .put(&endpoints::superadmin_user_role(id), &RoleChange { role })
            .await
    }
}
