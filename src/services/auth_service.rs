use log::info;
use reqwest::Method;

use crate::api::{endpoints, ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::models::{AuthResponse, Credentials, Registration, User};

pub struct AuthService<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Exchanges credentials for a token and stores both in the auth context.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let options = RequestOptions::new(Method::POST)
            .json(&credentials)?
            .without_auth();
        let response: AuthResponse = self.api.request(endpoints::LOGIN, options).await?;
        self.store(response)
    }

    pub async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let options = RequestOptions::new(Method::POST)
            .json(registration)?
            .without_auth();
        let response: AuthResponse = self.api.request(endpoints::REGISTER, options).await?;
        info!("registered {} as {}", response.user.email, response.user.role);
        self.store(response)
    }

    /// Re-fetches the logged-in user and refreshes the cached copy.
    pub async fn me(&self) -> Result<User, ApiError> {
        let user: User = self.api.get(endpoints::ME).await?;
        self.api.auth().update_user(user.clone())?;
        Ok(user)
    }

    /// Local only; the backend keeps no session to end.
    pub fn logout(&self) -> Result<(), ApiError> {
        Ok(self.api.auth().logout()?)
    }

    fn store(&self, response: AuthResponse) -> Result<User, ApiError> {
        let AuthResponse { user, token } = response;
        self.api.auth().login(user.clone(), token)?;
        Ok(user)
    }
}
