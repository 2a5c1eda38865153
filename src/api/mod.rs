//! REST API client.
//!
//! Every page talks to the booking API through [`ApiClient::fetch`], which
//! attaches the bearer token and classifies the response. Typed endpoint
//! helpers live in the submodules.

mod auth;
mod bookings;
mod events;

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{ClientError, ClientResult};
use crate::session::{self, Session};
use crate::storage::TokenStore;

const JSON: &str = "application/json";

/// A successfully classified response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    /// 2xx with a JSON content type
    Json(Value),
    /// 2xx with anything else, including an empty body
    Text(String),
}

impl ApiBody {
    /// Deserialize a JSON body into `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> ClientResult<T> {
        match self {
            ApiBody::Json(value) => Ok(serde_json::from_value(value)?),
            ApiBody::Text(text) => Err(ClientError::Parse(format!(
                "Expected a JSON body, got: {}",
                text
            ))),
        }
    }

    /// Deserialize a JSON array into `Vec<T>`. Anything that is not an
    /// array is treated as an empty list; elements that do not fit `T` are
    /// skipped.
    pub fn into_list<T: DeserializeOwned>(self) -> ClientResult<Vec<T>> {
        match self {
            ApiBody::Json(Value::Array(items)) => Ok(items
                .into_iter()
                .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        tracing::warn!("Skipping malformed list element {}: {}", item, e);
                        None
                    }
                })
                .collect()),
            other => {
                tracing::warn!("Expected a JSON array, treating as empty: {:?}", other);
                Ok(Vec::new())
            }
        }
    }
}

/// Method, extra headers, and optional JSON body for one request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Option<Value>) -> Self {
        Self {
            method: Method::POST,
            body,
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP client bound to an API base URL and a token store.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        Self::with_client(Client::new(), base_url, store)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    /// Current session as read from the token store.
    pub fn session(&self) -> Session {
        Session::load(self.store())
    }

    /// Join `path` onto the base URL, adding the leading slash if missing.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send an authenticated request and classify the response.
    ///
    /// 401/403 become [`ClientError::Auth`], other non-2xx become
    /// [`ClientError::Request`] with the server's text, 2xx JSON is parsed
    /// and anything else is returned as text.
    pub async fn fetch(&self, path: &str, opts: RequestOptions) -> ClientResult<ApiBody> {
        let response = self.send(path, opts, true).await?;
        classify(response).await
    }

    pub(crate) async fn send(
        &self,
        path: &str,
        opts: RequestOptions,
        with_auth: bool,
    ) -> ClientResult<Response> {
        let url = self.url(path);
        let mut headers = opts.headers;

        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        }
        if opts.body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        }
        if with_auth {
            let token = session::get_token(self.store());
            if !token.is_empty() {
                match HeaderValue::from_str(&format!("Bearer {}", token)) {
                    Ok(value) => {
                        headers.insert(AUTHORIZATION, value);
                    }
                    Err(_) => tracing::warn!("Stored token is not a valid header value, sending without it"),
                }
            }
        }

        tracing::debug!("{} {}", opts.method, url);

        let mut request = self.http.request(opts.method, &url).headers(headers);
        if let Some(body) = opts.body {
            request = request.body(serde_json::to_vec(&body)?);
        }

        let response = request.send().await?;
        tracing::debug!("{} -> {}", url, response.status());
        Ok(response)
    }
}

/// Classify a raw response into a body or a [`ClientError`].
pub async fn classify(response: Response) -> ClientResult<ApiBody> {
    let response = check_status(response).await?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if content_type.contains(JSON) {
        let text = response.text().await?;
        return Ok(ApiBody::Json(serde_json::from_str(&text)?));
    }

    Ok(ApiBody::Text(safe_read_text(response).await))
}

/// Pass 2xx responses through; turn everything else into an error carrying the body text.
pub(crate) async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let body = safe_read_text(response).await;
        return Err(ClientError::Auth {
            status: status.as_u16(),
            body,
        });
    }

    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = safe_read_text(response).await;
        return Err(ClientError::Request {
            status: status.as_u16(),
            reason,
            body,
        });
    }

    Ok(response)
}

/// Read the body as text; a read failure becomes the error's own text.
async fn safe_read_text(response: Response) -> String {
    response.text().await.unwrap_or_else(|e| e.to_string())
}
