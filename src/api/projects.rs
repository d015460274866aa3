//! Project Endpoints

use reqwest::Method;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{Member, Project, ProjectRequest};

impl ApiClient {
    pub async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        self.get_data("/v1/projects").await
    }

    pub async fn get_project(&self, id: &str) -> ApiResult<Project> {
        self.get_data(&format!("/v1/projects/{}", id)).await
    }

    pub async fn create_project(&self, request: &ProjectRequest) -> ApiResult<Project> {
        self.send_data(Method::POST, "/v1/projects", request).await
    }

    pub async fn update_project(&self, id: &str, request: &ProjectRequest) -> ApiResult<Project> {
        self.send_data(Method::PUT, &format!("/v1/projects/{}", id), request).await
    }

    pub async fn delete_project(&self, id: &str) -> ApiResult<()> {
        self.delete::<()>(&format!("/v1/projects/{}", id), None).await
    }

    pub async fn project_members(&self, id: &str) -> ApiResult<Vec<Member>> {
        self.get_data(&format!("/v1/projects/{}/members", id)).await
    }
}
