//! FtdHttpClient - device transport over HTTP(S)
//!
//! Password-grant token authentication and multipart file upload against the
//! FTD device management API.

use std::path::Path;
use std::time::Duration;

use contracts::{DeviceConfig, ServerError, Transport, TransportError};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::{FtdClientError, Result};

/// Multipart field name the device expects the file under
const UPLOAD_FIELD: &str = "fileToUpload";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// HTTP transport for a single device
pub struct FtdHttpClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
    token_path: String,
    token: Mutex<Option<String>>,
}

impl FtdHttpClient {
    /// Create a client from device settings
    ///
    /// No request is made until the first upload.
    pub fn new(device: &DeviceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(device.timeout_secs))
            .danger_accept_invalid_certs(!device.verify_tls)
            .build()
            .map_err(|e| FtdClientError::client_build(&device.host, e.to_string()))?;

        if !device.verify_tls {
            warn!(host = %device.host, "TLS certificate verification disabled");
        }

        Ok(Self {
            client,
            base_url: device.host.trim_end_matches('/').to_string(),
            username: device.username.clone(),
            password: device.password.clone(),
            token_path: device.token_path.clone(),
            token: Mutex::new(None),
        })
    }

    /// Full URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Revoke the cached token, if any
    ///
    /// Failures are logged and ignored; the token expires on its own.
    #[instrument(name = "ftd_logout", skip(self))]
    pub async fn logout(&self) {
        let Some(token) = self.token.lock().await.take() else {
            return;
        };

        let body = json!({
            "grant_type": "revoke_token",
            "access_token": token,
            "token_to_revoke": token,
        });
        let result = self
            .client
            .post(self.endpoint(&self.token_path))
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => debug!("Token revoked"),
            Ok(response) => warn!(status = response.status().as_u16(), "Token revoke rejected"),
            Err(e) => warn!(error = %e, "Token revoke failed"),
        }
    }

    async fn access_token(&self) -> std::result::Result<String, TransportError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }
        let token = self.login().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    #[instrument(name = "ftd_login", skip(self), fields(user = %self.username))]
    async fn login(&self) -> std::result::Result<String, TransportError> {
        let body = json!({
            "grant_type": "password",
            "username": self.username,
            "password": self.password,
        });
        let response = self
            .client
            .post(self.endpoint(&self.token_path))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::connection(e.to_string()))?;

        let value = read_json(response).await?;
        let token: TokenResponse = serde_json::from_value(value)
            .map_err(|e| TransportError::invalid_response(format!("token response: {e}")))?;

        debug!("Login succeeded");
        token
            .access_token
            .ok_or_else(|| TransportError::invalid_response("token response has no access_token"))
    }
}

impl Transport for FtdHttpClient {
    #[instrument(name = "ftd_upload_file", skip(self, path), fields(path = %path.display()))]
    async fn upload_file(&self, path: &Path, url: &str) -> std::result::Result<Value, TransportError> {
        let content = tokio::fs::read(path)
            .await
            .map_err(|source| TransportError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size = content.len();

        let token = self.access_token().await?;
        let form = Form::new().part(UPLOAD_FIELD, Part::bytes(content).file_name(file_name));

        debug!(url = %url, size, "Uploading file");

        let response = self
            .client
            .post(self.endpoint(url))
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::connection(e.to_string()))?;

        let value = read_json(response).await?;
        info!(url = %url, size, "Upload completed");
        Ok(value)
    }
}

/// Map a response to JSON, turning error statuses into `ServerError`
async fn read_json(response: Response) -> std::result::Result<Value, TransportError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::connection(e.to_string()))?;

    if status.is_client_error() || status.is_server_error() {
        debug!(status = status.as_u16(), "Device returned error status");
        return Err(ServerError::from_body(status.as_u16(), &body).into());
    }

    if body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_str(&body).map_err(|e| TransportError::invalid_response(e.to_string()))
}
