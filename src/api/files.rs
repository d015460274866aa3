//! Project File Endpoints

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use super::ApiClient;
use crate::error::ApiResult;

/// A file picked in the browser, read into memory
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFileUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileNameQuery<'a> {
    file_name: &'a str,
}

fn files_path(project_id: &str) -> String {
    format!("/v1/projects/{}/files", project_id)
}

impl ApiClient {
    /// Upload files; returns the stored names
    pub async fn upload_files(&self, project_id: &str, files: Vec<ProjectFileUpload>) -> ApiResult<Vec<String>> {
        let form = files.into_iter().fold(Form::new(), |form, file| {
            form.part("files", Part::bytes(file.bytes).file_name(file.name))
        });
        self.post_multipart_data(&files_path(project_id), form).await
    }

    pub async fn list_files(&self, project_id: &str) -> ApiResult<Vec<String>> {
        self.get_data(&files_path(project_id)).await
    }

    pub async fn download_file(&self, project_id: &str, file_name: &str) -> ApiResult<(Vec<u8>, Option<String>)> {
        self.get_bytes(&format!("{}/download", files_path(project_id)), &FileNameQuery { file_name })
            .await
    }

    pub async fn delete_file(&self, project_id: &str, file_name: &str) -> ApiResult<()> {
        self.delete(&files_path(project_id), Some(&FileNameQuery { file_name })).await
    }
}
