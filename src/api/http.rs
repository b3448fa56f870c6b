//! reqwest implementation of [`BugApi`]

use super::{paths, ApiError, BugApi};
use crate::config::Config;
use crate::model::{Bug, BugFields, BugId, CreateReply, SearchForm};
use reqwest::{header, redirect, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Longest error body excerpt carried into an [`ApiError::Status`]
const MAX_ERROR_BODY: usize = 200;

/// HTTP client for the bug tracker backend
#[derive(Clone)]
pub struct HttpBugApi {
    client: reqwest::Client,
    base_url: Url,
    session_cookie: Option<String>,
}

impl HttpBugApi {
    /// Create a client for the server at `base_url`
    ///
    /// Redirects are not followed: the backend answers an unauthenticated
    /// request with a redirect to its login page, which must surface as an
    /// error rather than be parsed as data.
    ///
    /// # Errors
    /// Returns an error if the URL is not absolute http(s) or client creation fails
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session_cookie: Option<String>,
    ) -> Result<Self, ApiError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                base_url.scheme()
            )));
        }
        // Url::join replaces the last segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized backend client: {} (timeout: {:?}, session: {})",
            base_url,
            timeout,
            if session_cookie.is_some() { "set" } else { "none" }
        );

        Ok(Self {
            client,
            base_url,
            session_cookie,
        })
    }

    /// Create a client from the effective configuration
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            &config.server_url,
            Duration::from_secs(config.request_timeout_secs),
            config.session_cookie.clone(),
        )
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Start a request with the session cookie attached
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        tracing::debug!("{} {}", method, url);

        let mut req = self.client.request(method, url);
        if let Some(cookie) = &self.session_cookie {
            // A bare value is the Flask session; anything with '=' is sent verbatim
            let value = if cookie.contains('=') {
                cookie.clone()
            } else {
                format!("session={}", cookie)
            };
            req = req.header(header::COOKIE, value);
        }
        Ok(req)
    }

    /// Send and reject non-2xx responses
    async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let response = req.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = if status.is_redirection() {
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(|loc| format!("redirected to {}", loc))
                .unwrap_or_else(|| "redirect".to_string())
        } else {
            let body = response.text().await.unwrap_or_default();
            error_message(&body)
        };

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Read the body as JSON
    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await.map_err(ApiError::from_transport)?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Pull a readable message out of an error body.
///
/// The backend reports failures as `{"error": ...}`; anything else is
/// passed through as a short excerpt.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    crate::util::truncate_to_width(&crate::util::single_line(trimmed), MAX_ERROR_BODY)
}

impl BugApi for HttpBugApi {
    async fn list(&self) -> Result<Vec<Bug>, ApiError> {
        let response = self.send(self.request(Method::GET, paths::LIST)?).await?;
        Self::json(response).await
    }

    async fn create(&self, fields: &BugFields) -> Result<CreateReply, ApiError> {
        let req = self.request(Method::POST, paths::BUGS)?.json(fields);
        let response = self.send(req).await?;
        Self::json(response).await
    }

    async fn update(&self, id: BugId, fields: &BugFields) -> Result<serde_json::Value, ApiError> {
        let req = self.request(Method::PUT, &paths::bug(id))?.json(fields);
        let response = self.send(req).await?;
        Self::json(response).await
    }

    async fn delete(&self, id: BugId) -> Result<serde_json::Value, ApiError> {
        let response = self
            .send(self.request(Method::DELETE, &paths::bug(id))?)
            .await?;
        Self::json(response).await
    }

    async fn search(&self, query: &SearchForm) -> Result<Vec<Bug>, ApiError> {
        // query() percent-encodes; '&', '#' and non-ASCII survive intact
        let req = self.request(Method::GET, paths::SEARCH)?.query(&[
            ("keyword", query.keyword.as_str()),
            ("category", query.category.as_str()),
        ]);
        let response = self.send(req).await?;
        Self::json(response).await
    }

    async fn delete_account(&self) -> Result<(), ApiError> {
        // A navigation in the browser: the page answers with HTML or a
        // redirect, both of which count as done
        let response = self
            .request(Method::GET, paths::DELETE_ACCOUNT)?
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        let status = response.status();
        if status.is_success() || status.is_redirection() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}
