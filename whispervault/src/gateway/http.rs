//! [`ItemGateway`] over the service's JSON REST API.
//!
//! Every request carries the bearer token when one is configured. Nothing is retried:
//! a failure is mapped onto [`GatewayError`] and handed back to the caller.

use std::time::Duration;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::{GatewayError, ItemGateway, ShareLink};
use crate::auth::{AuthFormError, Credentials, Registration};
use crate::common::EncryptionAlgorithm;
use crate::config::ClientConfig;
use crate::item::{Entry, Item, ItemId, ItemKind};

/// The operation a request belongs to. Status codes are interpreted per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    List,
    ToggleFavorite,
    Delete,
    Restore,
    Rename,
    CreateFolder,
    Encrypt,
    Decrypt,
    Share,
    Download,
    Login,
    Register,
    ResetPassword,
}

/// Error body shape used by the service, e.g. `{"message": "Invalid key"}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "error")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    token: String,
}

/// HTTP client for the document service.
#[derive(Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl HttpGateway {
    /// Builds a gateway from validated settings.
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        let base_url = Url::parse(config.base_url())
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                GatewayError::Validation(format!("Invalid server URL: {}", config.server_url))
            })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone().map(SecretString::from),
        })
    }

    /// The API root without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// `POST /auth/login`. Returns the bearer token; the caller decides where to keep it.
    pub async fn login(&self, credentials: &Credentials) -> Result<SecretString, GatewayError> {
        credentials
            .validate()
            .map_err(|e| GatewayError::Validation(e.to_string()))?;

        let request = self
            .request(Method::POST, &["auth", "login"])
            .json(&credentials.body());
        let body: TokenBody = self.send_json(Operation::Login, request).await?;
        info!("Logged in as {}", credentials.email);
        Ok(SecretString::from(body.token))
    }

    /// `POST /auth/register`. Returns the bearer token of the new account.
    pub async fn register(&self, registration: &Registration) -> Result<SecretString, GatewayError> {
        registration
            .validate()
            .map_err(|e| GatewayError::Validation(e.to_string()))?;

        let request = self
            .request(Method::POST, &["auth", "register"])
            .json(&registration.body());
        let body: TokenBody = self.send_json(Operation::Register, request).await?;
        info!("Registered account {}", registration.email);
        Ok(SecretString::from(body.token))
    }

    /// `POST /auth/reset-password`. The service mails the reset instructions.
    pub async fn reset_password(&self, email: &str) -> Result<(), GatewayError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(GatewayError::Validation(AuthFormError::MissingFields.to_string()));
        }

        let request = self
            .request(Method::POST, &["auth", "reset-password"])
            .json(&json!({ "email": email }));
        self.send_empty(Operation::ResetPassword, request).await?;
        info!("Requested a password reset for {}", email);
        Ok(())
    }

    /// Appends `segments` to the API root. Each segment is percent-encoded, so ids
    /// containing `/` or spaces stay a single path segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // new() 已拒绝 cannot-be-a-base 的地址，这里总能取得路径段
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn item_endpoint(&self, kind: ItemKind, id: &ItemId, action: Option<&str>) -> Url {
        match action {
            Some(action) => self.endpoint(&[kind.collection_path(), id.as_str(), action]),
            None => self.endpoint(&[kind.collection_path(), id.as_str()]),
        }
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.request_to(method, self.endpoint(segments))
    }

    fn request_to(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url.path());
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn send(&self, op: Operation, request: RequestBuilder) -> Result<Response, GatewayError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // 失败时尽量读取服务端的 message 字段
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown status").to_string());
        debug!("{:?} failed with {}: {}", op, status, message);
        Err(classify_status(op, status, message))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        op: Operation,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = self.send(op, request).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Protocol(e.to_string()))
    }

    async fn send_empty(&self, op: Operation, request: RequestBuilder) -> Result<(), GatewayError> {
        // 成功响应的正文会被忽略
        self.send(op, request).await.map(|_| ())
    }
}

#[async_trait]
impl ItemGateway for HttpGateway {
    async fn list(&self, kind: ItemKind) -> Result<Vec<Item>, GatewayError> {
        let entries: Vec<Entry> = self
            .send_json(Operation::List, self.request(Method::GET, &[kind.collection_path()]))
            .await?;
        debug!("Listed {} {}(s)", entries.len(), kind);
        Ok(entries.into_iter().map(|entry| Item::new(kind, entry)).collect())
    }

    async fn toggle_favorite(&self, kind: ItemKind, id: &ItemId) -> Result<Item, GatewayError> {
        let url = self.item_endpoint(kind, id, Some("favorite"));
        let entry: Entry = self
            .send_json(Operation::ToggleFavorite, self.request_to(Method::POST, url))
            .await?;
        Ok(Item::new(kind, entry))
    }

    async fn delete(&self, kind: ItemKind, id: &ItemId) -> Result<(), GatewayError> {
        let url = self.item_endpoint(kind, id, None);
        self.send_empty(Operation::Delete, self.request_to(Method::DELETE, url))
            .await
    }

    async fn restore(&self, kind: ItemKind, id: &ItemId) -> Result<(), GatewayError> {
        let url = self.item_endpoint(kind, id, Some("restore"));
        self.send_empty(Operation::Restore, self.request_to(Method::POST, url))
            .await
    }

    async fn rename(&self, kind: ItemKind, id: &ItemId, name: &str) -> Result<Item, GatewayError> {
        let url = self.item_endpoint(kind, id, None);
        let request = self
            .request_to(Method::PATCH, url)
            .json(&json!({ "name": name }));
        let entry: Entry = self.send_json(Operation::Rename, request).await?;
        Ok(Item::new(kind, entry))
    }

    async fn create_folder(&self, name: &str) -> Result<Item, GatewayError> {
        let request = self
            .request(Method::POST, &[ItemKind::Folder.collection_path()])
            .json(&json!({ "name": name }));
        let entry: Entry = self.send_json(Operation::CreateFolder, request).await?;
        Ok(Item::Folder(entry))
    }

    async fn encrypt(
        &self,
        kind: ItemKind,
        id: &ItemId,
        key: &SecretString,
        algorithm: EncryptionAlgorithm,
    ) -> Result<(), GatewayError> {
        if key.expose_secret().is_empty() {
            return Err(GatewayError::Validation("Encryption key cannot be empty".to_string()));
        }
        let url = self.item_endpoint(kind, id, Some("encrypt"));
        let request = self.request_to(Method::POST, url).json(&json!({
            "key": key.expose_secret(),
            "type": algorithm.as_str(),
        }));
        self.send_empty(Operation::Encrypt, request).await
    }

    async fn decrypt(&self, kind: ItemKind, id: &ItemId, key: &SecretString) -> Result<(), GatewayError> {
        if key.expose_secret().is_empty() {
            return Err(GatewayError::Validation("Encryption key cannot be empty".to_string()));
        }
        let url = self.item_endpoint(kind, id, Some("decrypt"));
        let request = self
            .request_to(Method::POST, url)
            .json(&json!({ "key": key.expose_secret() }));
        self.send_empty(Operation::Decrypt, request).await
    }

    async fn share(&self, id: &ItemId, expires_at: Option<DateTime<Utc>>) -> Result<ShareLink, GatewayError> {
        let url = self.item_endpoint(ItemKind::File, id, Some("share"));
        // 未指定过期时间时不发送该字段，由服务端决定
        let body = match expires_at {
            Some(at) => json!({ "expiresAt": at }),
            None => json!({}),
        };
        let request = self.request_to(Method::POST, url).json(&body);
        self.send_json(Operation::Share, request).await
    }

    async fn download(&self, id: &ItemId) -> Result<Vec<u8>, GatewayError> {
        let url = self.item_endpoint(ItemKind::File, id, Some("download"));
        let response = self
            .send(Operation::Download, self.request_to(Method::GET, url))
            .await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        debug!("Downloaded {} byte(s) for file {}", bytes.len(), id);
        Ok(bytes.to_vec())
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Network("Request timed out".to_string())
    } else if e.is_decode() {
        GatewayError::Protocol(e.to_string())
    } else {
        GatewayError::Network(e.to_string())
    }
}

/// Maps a non-success status onto the error taxonomy.
///
/// Decrypt failures caused by the key (400, 403, 422) all collapse into `WrongKey`
/// so the response reveals nothing about why the key was refused.
pub(crate) fn classify_status(op: Operation, status: StatusCode, message: String) -> GatewayError {
    match (op, status.as_u16()) {
        (Operation::Decrypt, 400 | 403 | 422) => GatewayError::WrongKey,
        (_, 401 | 403) => GatewayError::Auth(message),
        (_, 400 | 422) => GatewayError::Validation(message),
        (_, 404) => GatewayError::NotFound(message),
        (_, code) => GatewayError::Server {
            status: code,
            message,
        },
    }
}
