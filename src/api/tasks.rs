//! Task Endpoints
//!
//! Task routes return bare bodies (no envelope).

use async_trait::async_trait;
use reqwest::Method;

use super::ApiClient;
use crate::error::ApiResult;
use crate::kanban::TaskGateway;
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};

impl ApiClient {
    pub async fn list_tasks(&self, project_id: &str) -> ApiResult<Vec<Task>> {
        self.get_json(&format!("/v1/projects/{}/tasks", project_id)).await
    }

    /// Tasks with deadlines assigned to the signed-in user
    pub async fn my_calendar_tasks(&self) -> ApiResult<Vec<Task>> {
        self.get_json("/v1/tasks/my-calendar-tasks").await
    }
}

#[async_trait(?Send)]
impl TaskGateway for ApiClient {
    async fn create_task(&self, request: &CreateTaskRequest) -> ApiResult<Task> {
        self.send_json(Method::POST, "/v1/tasks", request).await
    }

    async fn update_task(&self, id: &str, request: &UpdateTaskRequest) -> ApiResult<Task> {
        self.send_json(Method::PUT, &format!("/v1/tasks/{}", id), request).await
    }

    async fn delete_task(&self, id: &str) -> ApiResult<()> {
        self.delete::<()>(&format!("/v1/tasks/{}", id), None).await
    }
}
