use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// The cipher the service should use when locking an item.
///
/// The client never runs either cipher itself; the choice is sent to the service as
/// the `type` field of the encrypt request.
//
// // 由服务端执行的加密算法，客户端只负责传递选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EncryptionAlgorithm {
    #[default]
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
}

#[derive(Debug, thiserror::Error)]
#[error("Unsupported algorithm '{0}', expected 'aes-256-gcm' or 'chacha20-poly1305'")]
pub struct AlgorithmParseError(String);

impl EncryptionAlgorithm {
    pub const ALL: [EncryptionAlgorithm; 2] = [
        EncryptionAlgorithm::Aes256Gcm,
        EncryptionAlgorithm::ChaCha20Poly1305,
    ];

    /// Wire identifier, e.g. `aes-256-gcm`.
    pub fn as_str(self) -> &'static str {
        match self {
            EncryptionAlgorithm::Aes256Gcm => "aes-256-gcm",
            EncryptionAlgorithm::ChaCha20Poly1305 => "chacha20-poly1305",
        }
    }

    /// Human readable label, e.g. `AES-256-GCM`.
    pub fn label(self) -> &'static str {
        match self {
            EncryptionAlgorithm::Aes256Gcm => "AES-256-GCM",
            EncryptionAlgorithm::ChaCha20Poly1305 => "ChaCha20-Poly1305",
        }
    }
}

impl fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EncryptionAlgorithm {
    type Err = AlgorithmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == normalized)
            .ok_or(AlgorithmParseError(normalized))
    }
}
