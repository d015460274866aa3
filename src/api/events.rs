//! Calendar Event Endpoints

use reqwest::Method;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{CalendarEvent, EventRequest};

impl ApiClient {
    pub async fn list_events(&self) -> ApiResult<Vec<CalendarEvent>> {
        self.get_data("/v1/events").await
    }

    pub async fn create_event(&self, request: &EventRequest) -> ApiResult<CalendarEvent> {
        self.send_data(Method::POST, "/v1/events", request).await
    }

    pub async fn update_event(&self, id: &str, request: &EventRequest) -> ApiResult<CalendarEvent> {
        self.send_data(Method::PUT, &format!("/v1/events/{}", id), request).await
    }

    pub async fn delete_event(&self, id: &str) -> ApiResult<()> {
        self.delete::<()>(&format!("/v1/events/{}", id), None).await
    }
}
