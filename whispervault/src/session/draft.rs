use secrecy::{ExposeSecret, SecretString};
use crate::common::EncryptionAlgorithm;
use crate::item::Item;

/// Transient input of the vault dialog.
///
/// The key lives in a [`SecretString`], so it is zeroized as soon as the draft is
/// dropped. The session drops the draft on every path out of the dialog.
//
// // 保险库对话框的临时输入。密钥在草稿被丢弃时会被清零。
#[derive(Debug)]
pub struct VaultDraft {
    key: SecretString,
    algorithm: EncryptionAlgorithm,
}

impl Default for VaultDraft {
    fn default() -> Self {
        Self {
            key: SecretString::from(String::new()),
            algorithm: EncryptionAlgorithm::default(),
        }
    }
}

impl VaultDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = SecretString::from(key.into());
    }

    pub fn key(&self) -> &SecretString {
        &self.key
    }

    pub fn has_key(&self) -> bool {
        !self.key.expose_secret().is_empty()
    }

    /// Only meaningful when encrypting; a decrypt request ignores it.
    pub fn set_algorithm(&mut self, algorithm: EncryptionAlgorithm) {
        self.algorithm = algorithm;
    }

    pub fn algorithm(&self) -> EncryptionAlgorithm {
        self.algorithm
    }
}

/// What submitting the vault dialog does, decided solely by the item's current flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultAction {
    Encrypt,
    Decrypt,
}

impl VaultAction {
    pub fn for_item(item: &Item) -> Self {
        if item.is_encrypted() {
            VaultAction::Decrypt
        } else {
            VaultAction::Encrypt
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            VaultAction::Encrypt => "Encrypt Item",
            VaultAction::Decrypt => "Decrypt Item",
        }
    }

    /// Instruction shown next to the key field.
    pub fn key_hint(self) -> &'static str {
        match self {
            VaultAction::Encrypt => "Choose an encryption type and enter a key to encrypt this item.",
            VaultAction::Decrypt => "Enter the encryption key to decrypt this item.",
        }
    }

    /// Notice shown when the dialog is submitted without a key.
    pub fn missing_key_message(self) -> &'static str {
        match self {
            VaultAction::Encrypt => "Please enter an encryption key",
            VaultAction::Decrypt => "Please enter the encryption key",
        }
    }

    /// Whether the dialog offers an algorithm choice.
    pub fn uses_algorithm(self) -> bool {
        matches!(self, VaultAction::Encrypt)
    }
}
