//! Backend API Client
//!
//! Typed bindings to the REST backend, organized by domain. All calls share
//! one `ApiClient` that attaches the bearer token and turns a 401 into a
//! session-expired event.

mod auth;
mod projects;
mod tasks;
mod finance;
mod categories;
mod events;
mod accounts;
mod github;
mod files;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::session::{SessionEvent, SessionEvents, TokenStore};

pub use files::ProjectFileUpload;

/// Session check endpoint; a 401 here means "not signed in", not "expired"
pub const SESSION_CHECK_PATH: &str = "/auth/me";

/// Standard `{ success, message, data }` wrapper used by most endpoints
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

/// Decode an enveloped body and return its `data`
pub fn unwrap_envelope<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let envelope: ApiEnvelope<T> = serde_json::from_str(body)?;
    if !envelope.success {
        return Err(ApiError::Rejected { message: envelope.message });
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Decode("response has no data".to_string()))
}

/// Whether a 401 on this path should publish `SessionEvent::Expired`
pub fn publishes_expiry(path: &str) -> bool {
    !path.starts_with(SESSION_CHECK_PATH)
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Arc<str>,
    tokens: Arc<dyn TokenStore>,
    session: SessionEvents,
}

impl ApiClient {
    pub fn new(config: &AppConfig, tokens: Arc<dyn TokenStore>, session: SessionEvents) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: Arc::from(config.api_base.as_str()),
            tokens,
            session,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    pub fn has_token(&self) -> bool {
        self.tokens.load().is_some()
    }

    pub fn session(&self) -> &SessionEvents {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.tokens.load() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Send and map non-2xx statuses to errors
    async fn execute(&self, path: &str, builder: RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = builder.send().await.map_err(|e| {
            log::error!("API error: {} unreachable: {}", path, e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        log::error!("API error: {} status={} body={}", path, status.as_u16(), body);

        if status == StatusCode::UNAUTHORIZED {
            self.on_unauthorized(path);
            return Err(ApiError::Unauthorized);
        }
        Err(ApiError::from_response(status.as_u16(), &body))
    }

    /// Drop the token; report expiry unless this was the session check
    fn on_unauthorized(&self, path: &str) {
        self.tokens.clear();
        if publishes_expiry(path) {
            self.session.publish(SessionEvent::Expired);
        }
    }

    async fn text(&self, path: &str, builder: RequestBuilder) -> ApiResult<String> {
        let response = self.execute(path, builder).await?;
        Ok(response.text().await?)
    }

    // ========================
    // Bare JSON bodies
    // ========================

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.text(path, self.request(Method::GET, path)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path).json(payload);
        let body = self.text(path, builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    // ========================
    // Enveloped bodies
    // ========================

    pub(crate) async fn get_data<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.text(path, self.request(Method::GET, path)).await?;
        unwrap_envelope(&body)
    }

    pub(crate) async fn get_data_with_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).query(query);
        let body = self.text(path, builder).await?;
        unwrap_envelope(&body)
    }

    pub(crate) async fn send_data<B, T>(&self, method: Method, path: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path).json(payload);
        let body = self.text(path, builder).await?;
        unwrap_envelope(&body)
    }

    /// POST without a body, enveloped response
    pub(crate) async fn post_empty_data<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.text(path, self.request(Method::POST, path)).await?;
        unwrap_envelope(&body)
    }

    pub(crate) async fn post_multipart_data<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ApiResult<T> {
        let builder = self.request(Method::POST, path).multipart(form);
        let body = self.text(path, builder).await?;
        unwrap_envelope(&body)
    }

    // ========================
    // Other bodies
    // ========================

    /// DELETE; any response body is ignored
    pub(crate) async fn delete<Q: Serialize + ?Sized>(&self, path: &str, query: Option<&Q>) -> ApiResult<()> {
        let mut builder = self.request(Method::DELETE, path);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        self.execute(path, builder).await?;
        Ok(())
    }

    /// Binary download (CSV exports, project files)
    pub(crate) async fn get_bytes<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> ApiResult<(Vec<u8>, Option<String>)> {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.execute(path, builder).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        Ok((bytes.to_vec(), content_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn client_with_token(token: &str) -> (ApiClient, Arc<AtomicUsize>) {
        let session = SessionEvents::new();
        let expired = Arc::new(AtomicUsize::new(0));
        let counter = expired.clone();
        session.subscribe(move |event| {
            if event == SessionEvent::Expired {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        let client = ApiClient::new(
            &AppConfig::default(),
            Arc::new(MemoryTokenStore::with_token(token)),
            session,
        );
        (client, expired)
    }

    #[test]
    fn test_unwrap_envelope_success() {
        let body = r#"{"success":true,"message":"ok","data":[1,2,3]}"#;
        let data: Vec<i32> = unwrap_envelope(body).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn test_unwrap_envelope_rejected() {
        let body = r#"{"success":false,"message":"Category in use","data":null}"#;
        let err = unwrap_envelope::<String>(body).unwrap_err();
        assert_eq!(err, ApiError::Rejected { message: Some("Category in use".into()) });
        assert_eq!(err.user_message(), "Category in use");
    }

    #[test]
    fn test_unwrap_envelope_payload_without_default() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Branch {
            name: String,
        }
        let body = r#"{"success":true,"data":{"name":"main"}}"#;
        let branch: Branch = unwrap_envelope(body).unwrap();
        assert_eq!(branch, Branch { name: "main".into() });
    }

    #[test]
    fn test_unwrap_envelope_missing_data() {
        let err = unwrap_envelope::<String>(r#"{"success":true}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        let err = unwrap_envelope::<String>("not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_unauthorized_clears_token_and_publishes() {
        let (client, expired) = client_with_token("t0k");
        client.on_unauthorized("/v1/projects");
        assert!(!client.has_token());
        assert_eq!(expired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unauthorized_session_check_is_silent() {
        let (client, expired) = client_with_token("t0k");
        client.on_unauthorized("/auth/me");
        assert!(!client.has_token());
        assert_eq!(expired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_url_joins_base() {
        let (client, _) = client_with_token("x");
        assert_eq!(client.url("/v1/tasks/9"), "http://localhost:8080/api/v1/tasks/9");
    }
}
