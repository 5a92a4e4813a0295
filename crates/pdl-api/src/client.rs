//! Shared HTTP client: bearer-token attachment and the uniform 401 policy.
//!
//! The 401 policy is deliberately not a page redirect buried in the
//! transport layer: callers register a session-expired hook once and decide
//! themselves what "go back to login" means on their surface.

use crate::error::ApiError;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::{OnceLock, RwLock};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub type SessionExpiredHook = Box<dyn Fn() + Send + Sync>;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<String>>,
    on_session_expired: OnceLock<SessionExpiredHook>,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ApiError::Network {
                message: err.to_string(),
            })?;
        Ok(Self {
            http,
            base_url,
            token: RwLock::new(None),
            on_session_expired: OnceLock::new(),
        })
    }

    /// Register the session-expired hook. First registration wins; the hook
    /// fires once per 401 incident, after the token has been cleared.
    pub fn on_session_expired(&self, hook: SessionExpiredHook) {
        if self.on_session_expired.set(hook).is_err() {
            warn!("session-expired hook already registered, ignoring");
        }
    }

    pub fn set_token(&self, token: &str) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.to_string());
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.read().is_ok_and(|guard| guard.is_some())
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|err| ApiError::Url {
            message: err.to_string(),
        })
    }

    fn builder(&self, method: Method, url: Url) -> RequestBuilder {
        let mut builder = self.http.request(method, url);
        if let Ok(guard) = self.token.read() {
            if let Some(token) = guard.as_deref() {
                builder = builder.bearer_auth(token);
            }
        }
        builder
    }

    fn handle_unauthorized(&self) {
        self.clear_token();
        if let Some(hook) = self.on_session_expired.get() {
            hook();
        }
    }

    async fn send_checked(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = builder.send().await.map_err(|err| ApiError::Network {
            message: err.to_string(),
        })?;
        let status = response.status();
        debug!(%status, "api response");
        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Err(ApiError::Unauthorized);
        }
        let body = response.bytes().await.map_err(|err| ApiError::Network {
            message: err.to_string(),
        })?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).trim().to_string(),
            });
        }
        Ok(body.to_vec())
    }

    fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(body).map_err(|err| ApiError::Decode {
            message: err.to_string(),
        })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let builder = self.builder(Method::GET, url).query(query);
        let body = self.send_checked(builder).await?;
        Self::decode(&body)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let builder = self.builder(Method::POST, url).json(payload);
        let body = self.send_checked(builder).await?;
        Self::decode(&body)
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let builder = self.builder(Method::PUT, url).json(payload);
        let body = self.send_checked(builder).await?;
        Self::decode(&body)
    }

    /// GET where the caller only cares that the request succeeded.
    pub async fn get_ok(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path)?;
        let builder = self.builder(Method::GET, url);
        self.send_checked(builder).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn client() -> ApiClient {
        ApiClient::new(Url::parse("http://localhost:3000").unwrap()).unwrap()
    }

    #[test]
    fn token_lifecycle() {
        let client = client();
        assert!(!client.has_token());
        client.set_token("jwt-abc");
        assert!(client.has_token());
        client.clear_token();
        assert!(!client.has_token());
    }

    #[test]
    fn unauthorized_clears_token_and_fires_hook() {
        let client = client();
        client.set_token("jwt-abc");
        let fired = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&fired);
        client.on_session_expired(Box::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
        }));

        client.handle_unauthorized();
        assert!(!client.has_token());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn first_hook_registration_wins() {
        let client = client();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let a = Arc::clone(&first);
        let b = Arc::clone(&second);
        client.on_session_expired(Box::new(move || {
            a.fetch_add(1, Ordering::SeqCst);
        }));
        client.on_session_expired(Box::new(move || {
            b.fetch_add(1, Ordering::SeqCst);
        }));
        client.handle_unauthorized();
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn url_joins_against_base() {
        let client = client();
        assert_eq!(
            client.url("/api/companies").unwrap().as_str(),
            "http://localhost:3000/api/companies"
        );
    }
}
