//! Auth Endpoints
//!
//! Sign-in, session check and password change.

use reqwest::Method;

use super::{ApiClient, SESSION_CHECK_PATH};
use crate::error::ApiResult;
use crate::models::{Account, AuthResponse, ChangePasswordRequest, LoginRequest};

impl ApiClient {
    /// Exchange credentials for a token; the token is persisted on success
    pub async fn login(&self, login_id: &str, password: &str) -> ApiResult<Account> {
        let request = LoginRequest { login_id, password };
        let response: AuthResponse = self.send_json(Method::POST, "/auth/login", &request).await?;
        self.tokens().save(&response.token);
        log::info!("signed in as {}", response.user.name);
        Ok(response.user)
    }

    /// Who the current token belongs to. A 401 here does not count as expiry.
    pub async fn current_user(&self) -> ApiResult<Account> {
        self.get_json(SESSION_CHECK_PATH).await
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> ApiResult<()> {
        let request = ChangePasswordRequest { old_password, new_password };
        let _: serde_json::Value = self.send_json(Method::POST, "/auth/change-password", &request).await?;
        Ok(())
    }

    /// Forget the token locally
    pub fn logout(&self) {
        self.tokens().clear();
    }
}
