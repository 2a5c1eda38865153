//! Login and registration endpoints.
//!
//! These go out without a bearer token and report failures with the
//! server's `message` field rather than the generic status classification.

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{ApiClient, RequestOptions};
use crate::errors::{ClientError, ClientResult};
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisteredUser};

impl ApiClient {
    /// POST /auth/login - Exchange credentials for a token.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.post_public("/auth/login", request, "Login failed").await
    }

    /// POST /auth/register - Create an account.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisteredUser> {
        self.post_public("/auth/register", request, "Register failed")
            .await
    }

    async fn post_public<B, T>(&self, path: &str, body: &B, fallback: &str) -> ClientResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let opts = RequestOptions::post(Some(serde_json::to_value(body)?));
        let response = self.send(path, opts, false).await?;
        read_auth_response(response, fallback).await
    }
}

async fn read_auth_response<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> ClientResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&text)?)
}
