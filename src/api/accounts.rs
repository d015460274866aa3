//! Account Endpoints
//!
//! Admin account management and the user directory used by pickers.

use reqwest::Method;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{Account, NewAccountRequest};

impl ApiClient {
    pub async fn list_accounts(&self) -> ApiResult<Vec<Account>> {
        self.get_data("/v1/accounts").await
    }

    pub async fn create_account(&self, request: &NewAccountRequest) -> ApiResult<Account> {
        self.send_data(Method::POST, "/v1/accounts", request).await
    }

    /// Reset to the backend's default password
    pub async fn reset_password(&self, id: &str) -> ApiResult<Account> {
        self.post_empty_data(&format!("/v1/accounts/{}/reset-password", id)).await
    }

    /// User directory (bare list) for assignee and team pickers
    pub async fn list_users(&self) -> ApiResult<Vec<Account>> {
        self.get_json("/v1/users").await
    }
}
