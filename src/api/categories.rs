//! Finance Category Endpoints

use reqwest::Method;
use serde::Serialize;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{CategoryRequest, FinanceCategory, FinancialType};

#[derive(Serialize)]
struct TypeQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<FinancialType>,
}

impl ApiClient {
    pub async fn list_categories(&self, kind: Option<FinancialType>) -> ApiResult<Vec<FinanceCategory>> {
        self.get_data_with_query("/v1/finance-categories", &TypeQuery { kind }).await
    }

    pub async fn add_category(&self, name: &str, kind: FinancialType) -> ApiResult<FinanceCategory> {
        self.send_data(Method::POST, "/v1/finance-categories", &CategoryRequest { name, kind }).await
    }

    pub async fn rename_category(&self, id: &str, name: &str, kind: FinancialType) -> ApiResult<FinanceCategory> {
        self.send_data(Method::PUT, &format!("/v1/finance-categories/{}", id), &CategoryRequest { name, kind })
            .await
    }

    pub async fn delete_category(&self, id: &str) -> ApiResult<()> {
        self.delete::<()>(&format!("/v1/finance-categories/{}", id), None).await
    }
}
