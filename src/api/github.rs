//! GitHub Proxy Endpoints
//!
//! The backend proxies GitHub using the project's stored token.

use reqwest::Method;
use serde::Serialize;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{CreateBranchRequest, CreateRepoRequest, RepoEntry};

#[derive(Serialize)]
struct TokenQuery<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct BranchQuery<'a> {
    token: &'a str,
    branch: &'a str,
}

#[derive(Serialize)]
struct ContentsQuery<'a> {
    token: &'a str,
    path: &'a str,
}

fn repo_path(owner: &str, repo: &str, tail: &str) -> String {
    format!("/v1/github/repos/{}/{}/{}", owner, repo, tail)
}

impl ApiClient {
    /// Create a repository; returns its URL
    pub async fn create_repo(&self, request: &CreateRepoRequest<'_>) -> ApiResult<String> {
        self.send_data(Method::POST, "/v1/github/repos", request).await
    }

    pub async fn list_branches(&self, owner: &str, repo: &str, token: &str) -> ApiResult<Vec<String>> {
        self.get_data_with_query(&repo_path(owner, repo, "branches"), &TokenQuery { token }).await
    }

    /// Create `new_branch` from `source_branch`; returns the new branch name
    pub async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        request: &CreateBranchRequest<'_>,
    ) -> ApiResult<String> {
        self.send_data(Method::POST, &repo_path(owner, repo, "branches"), request).await
    }

    /// Archive download URL for a branch
    pub async fn download_url(&self, owner: &str, repo: &str, branch: &str, token: &str) -> ApiResult<String> {
        self.get_data_with_query(&repo_path(owner, repo, "download"), &BranchQuery { token, branch })
            .await
    }

    pub async fn repo_exists(&self, owner: &str, repo: &str, token: &str) -> ApiResult<bool> {
        self.get_data_with_query(&repo_path(owner, repo, "exists"), &TokenQuery { token }).await
    }

    /// Directory listing at `path` ("" for the root)
    pub async fn repo_contents(&self, owner: &str, repo: &str, path: &str, token: &str) -> ApiResult<Vec<RepoEntry>> {
        self.get_data_with_query(&repo_path(owner, repo, "contents"), &ContentsQuery { token, path })
            .await
    }

    /// GitHub login of the token's owner
    pub async fn github_user(&self, token: &str) -> ApiResult<String> {
        self.get_data_with_query("/v1/github/me", &TokenQuery { token }).await
    }
}
