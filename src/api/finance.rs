//! Finance Endpoints
//!
//! Records, per-project summary, receipts and CSV import/export.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{FinancialRecord, FinancialRecordRequest, FinancialSummary};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    project_id: Option<&'a str>,
}

impl ApiClient {
    /// Records for one project, or all records when `project_id` is None
    pub async fn list_records(&self, project_id: Option<&str>) -> ApiResult<Vec<FinancialRecord>> {
        match project_id {
            Some(id) => self.get_data(&format!("/v1/finance/projects/{}", id)).await,
            None => self.get_data("/v1/finance").await,
        }
    }

    pub async fn finance_summary(&self, project_id: &str) -> ApiResult<FinancialSummary> {
        self.get_data(&format!("/v1/finance/projects/{}/summary", project_id)).await
    }

    pub async fn add_record(&self, request: &FinancialRecordRequest) -> ApiResult<FinancialRecord> {
        self.send_data(Method::POST, "/v1/finance", request).await
    }

    pub async fn update_record(&self, id: &str, request: &FinancialRecordRequest) -> ApiResult<FinancialRecord> {
        self.send_data(Method::PUT, &format!("/v1/finance/{}", id), request).await
    }

    pub async fn delete_record(&self, id: &str) -> ApiResult<()> {
        self.delete::<()>(&format!("/v1/finance/{}", id), None).await
    }

    /// Upload a receipt image; returns its URL
    pub async fn upload_receipt(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<String> {
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        self.post_multipart_data("/v1/finance/receipts", form).await
    }

    /// Import records from CSV into a project; returns the imported count
    pub async fn import_csv(&self, project_id: &str, file_name: &str, bytes: Vec<u8>) -> ApiResult<u32> {
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("projectId", project_id.to_string());
        self.post_multipart_data("/v1/finance/import/csv", form).await
    }

    /// CSV export, optionally limited to one project
    pub async fn export_csv(&self, project_id: Option<&str>) -> ApiResult<Vec<u8>> {
        let (bytes, _) = self
            .get_bytes("/v1/finance/export/csv", &ProjectQuery { project_id })
            .await?;
        Ok(bytes)
    }
}
