//! HTTP client for the QueryMind backend.

use crate::api::auth::TokenProvider;
use crate::api::models::{
    Connection, HistoryPage, NewConnection, QueryRequest, SyncUser, TestOutcome, UserProfile,
};
use crate::api::stream::{AbortSignal, decode_stream};
use crate::api::event::StreamEvent;
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Client over the backend's REST and streaming endpoints.
///
/// Construction takes the token provider explicitly; there is no ambient
/// auth state. One client is cheap to clone-by-Arc at call sites and safe
/// to share across tasks.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth: Arc<dyn TokenProvider>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config("API base URL must not be empty".into()));
        }
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the bearer token when the provider yields one; otherwise the
    /// request goes out with no Authorization header at all.
    async fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth.token().await {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Fold an error response into a message, preferring the backend's
    /// `detail` field.
    async fn error_detail(response: reqwest::Response, fallback: &str) -> Error {
        let status = response.status();
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("detail")?.as_str().map(str::to_owned));
        Error::Api(detail.unwrap_or_else(|| format!("{fallback} (HTTP {status})")))
    }

    /// Mirror the auth provider's user into the backend.
    pub async fn sync_user(&self, user: &SyncUser) -> Result<UserProfile> {
        let response = self
            .authed(self.http.post(self.url("/users/sync")))
            .await
            .json(user)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_detail(response, "Failed to sync user").await);
        }
        Ok(response.json().await?)
    }

    pub async fn connections(&self) -> Result<Vec<Connection>> {
        let response = self
            .authed(self.http.get(self.url("/connections/")))
            .await
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_detail(response, "Failed to fetch connections").await);
        }
        Ok(response.json().await?)
    }

    pub async fn create_connection(&self, request: &NewConnection) -> Result<Connection> {
        let response = self
            .authed(self.http.post(self.url("/connections/")))
            .await
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_detail(response, "Failed to create connection").await);
        }
        Ok(response.json().await?)
    }

    pub async fn delete_connection(&self, id: &str) -> Result {
        let response = self
            .authed(self.http.delete(self.url(&format!("/connections/{id}"))))
            .await
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_detail(response, "Failed to delete connection").await);
        }
        Ok(())
    }

    /// Probe a connection string. A failing probe comes back as
    /// `TestOutcome { ok: false, .. }`, not as an `Err`.
    pub async fn test_connection(&self, conn_string: &str) -> Result<TestOutcome> {
        let response = self
            .authed(self.http.post(self.url("/connections/test")))
            .await
            .json(&serde_json::json!({ "conn_string": conn_string }))
            .send()
            .await?;
        if !response.status().is_success() {
            let message = match Self::error_detail(response, "Connection failed").await {
                Error::Api(message) => message,
                other => other.to_string(),
            };
            return Ok(TestOutcome {
                ok: false,
                error: Some(message),
            });
        }
        Ok(response.json().await?)
    }

    /// Fetch one page of query history. The backend sends a bare array, so
    /// the page total is estimated from page fullness.
    pub async fn history(
        &self,
        page: u32,
        page_size: u32,
        connection_id: Option<&str>,
    ) -> Result<HistoryPage> {
        let mut url = format!(
            "{}/query/history?page={page}&page_size={page_size}",
            self.base_url
        );
        if let Some(id) = connection_id {
            url.push_str(&format!("&connection_id={id}"));
        }
        let response = self.authed(self.http.get(url)).await.send().await?;
        if !response.status().is_success() {
            return Err(Self::error_detail(response, "Failed to fetch history").await);
        }
        let items: Vec<_> = response.json().await?;
        Ok(HistoryPage::estimate(items, page, page_size))
    }

    /// Start schema indexing and stream its progress events.
    pub async fn index_schema(
        &self,
        connection_id: &str,
        on_event: impl FnMut(StreamEvent),
        cancel: AbortSignal,
    ) -> Result {
        let response = self
            .authed(
                self.http
                    .post(self.url(&format!("/connections/{connection_id}/index"))),
            )
            .await
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_detail(response, "Failed to index schema").await);
        }
        debug!(connection_id, "schema indexing stream started");
        decode_stream(Box::pin(response.bytes_stream()), on_event, cancel).await
    }

    /// Run a natural-language query and stream SQL chunks and results.
    pub async fn run_query(
        &self,
        request: &QueryRequest,
        on_event: impl FnMut(StreamEvent),
        cancel: AbortSignal,
    ) -> Result {
        let response = self
            .authed(self.http.post(self.url("/query/")))
            .await
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_detail(response, "Query failed").await);
        }
        debug!(connection_id = %request.connection_id, "query stream started");
        decode_stream(Box::pin(response.bytes_stream()), on_event, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::NoAuth;

    #[test]
    fn trailing_slash_is_trimmed_from_the_base_url() {
        let client =
            ApiClient::new("http://localhost:8000/api/v1/", Arc::new(NoAuth)).expect("client");
        assert_eq!(client.url("/query/"), "http://localhost:8000/api/v1/query/");
    }

    #[test]
    fn empty_base_url_is_a_config_error() {
        let result = ApiClient::new("", Arc::new(NoAuth));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
