//! The boundary between the client and the remote document service.
//!
//! [`ItemGateway`] is the only way the client talks to the service. The production
//! implementation is [`HttpGateway`]; [`MemoryGateway`] mimics the service in-process.

pub mod http;
pub mod memory;

pub use http::HttpGateway;
pub use memory::{Call, MemoryGateway};

use crate::common::EncryptionAlgorithm;
use crate::item::{Item, ItemId, ItemKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Errors the remote service can produce.
///
/// Every operation is atomic from the client's point of view: it either fully
/// succeeds or fails with one of these.
//
// // 远程服务可能返回的错误。每个操作对客户端来说都是原子的。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    /// The service could not be reached, or the request timed out.
    #[error("Network error: {0}")]
    Network(String),

    /// The bearer token is missing, expired or rejected.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The request was rejected as malformed, e.g. an empty key.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The decryption key did not match. Deliberately carries no detail.
    #[error("The provided key could not unlock this item")]
    WrongKey,

    /// The target item does not exist (any more).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The service answered with a body the client could not understand.
    #[error("Unexpected response: {0}")]
    Protocol(String),
}

impl GatewayError {
    /// Whether the surrounding session layer should ask the user to log in again.
    pub fn is_auth(&self) -> bool {
        matches!(self, GatewayError::Auth(_))
    }
}

/// A public link to a file, as returned by `POST /files/{id}/share`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    #[serde(alias = "shareUrl", alias = "link")]
    pub url: String,

    /// `None` when the link does not expire.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Asynchronous access to files and folders held by the service.
///
/// Kind-specific calls take the [`ItemKind`] explicitly; callers obtain it from
/// [`Item::kind`] so the file/folder dispatch is decided by an exhaustive match.
#[async_trait]
pub trait ItemGateway: Send + Sync {
    /// Fetches every item of one kind.
    async fn list(&self, kind: ItemKind) -> Result<Vec<Item>, GatewayError>;

    /// Flips `isFavorite` server-side and returns the updated item.
    async fn toggle_favorite(&self, kind: ItemKind, id: &ItemId) -> Result<Item, GatewayError>;

    /// Removes the item. Whether the service keeps it in a trash is opaque to the client.
    async fn delete(&self, kind: ItemKind, id: &ItemId) -> Result<(), GatewayError>;

    /// Brings back a previously deleted item.
    async fn restore(&self, kind: ItemKind, id: &ItemId) -> Result<(), GatewayError>;

    /// Renames the item and returns the updated item.
    async fn rename(&self, kind: ItemKind, id: &ItemId, name: &str) -> Result<Item, GatewayError>;

    /// Creates an empty top-level folder.
    async fn create_folder(&self, name: &str) -> Result<Item, GatewayError>;

    /// Locks the item with `key` using `algorithm`.
    async fn encrypt(
        &self,
        kind: ItemKind,
        id: &ItemId,
        key: &SecretString,
        algorithm: EncryptionAlgorithm,
    ) -> Result<(), GatewayError>;

    /// Unlocks the item. Fails with [`GatewayError::WrongKey`] when `key` does not match.
    async fn decrypt(&self, kind: ItemKind, id: &ItemId, key: &SecretString) -> Result<(), GatewayError>;

    /// Creates a share link for a file. Folders cannot be shared.
    async fn share(&self, id: &ItemId, expires_at: Option<DateTime<Utc>>) -> Result<ShareLink, GatewayError>;

    /// Fetches the content of a file.
    async fn download(&self, id: &ItemId) -> Result<Vec<u8>, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_link_accepts_service_field_names() {
        let link: ShareLink = serde_json::from_str(
            r#"{ "shareUrl": "https://wv.example/s/abc", "expiresAt": "2024-04-01T00:00:00Z" }"#,
        )
        .unwrap();
        assert_eq!(link.url, "https://wv.example/s/abc");
        assert!(link.expires_at.is_some());

        let open: ShareLink = serde_json::from_str(r#"{ "url": "https://wv.example/s/x" }"#).unwrap();
        assert_eq!(open.expires_at, None);
    }
}
