use tracing::debug;

use super::{Client, ClientError};
use crate::common::EncryptionAlgorithm;
use crate::gateway::ItemGateway;
use crate::session::VaultAction;

impl<G: ItemGateway> Client<G> {
    /// Opens the vault dialog for the menu's item and returns what a submit will do.
    pub fn open_vault_dialog(&mut self) -> Result<VaultAction, ClientError> {
        Ok(self.session.open_dialog()?)
    }

    pub fn set_vault_key(&mut self, key: impl Into<String>) -> Result<(), ClientError> {
        self.session.draft_mut()?.set_key(key);
        Ok(())
    }

    pub fn set_vault_algorithm(&mut self, algorithm: EncryptionAlgorithm) -> Result<(), ClientError> {
        self.session.draft_mut()?.set_algorithm(algorithm);
        Ok(())
    }

    /// Closes the dialog without a request. The draft key is discarded.
    pub fn cancel_vault_dialog(&mut self) -> Result<(), ClientError> {
        Ok(self.session.cancel_dialog()?)
    }

    /// Submits the dialog, encrypting or decrypting depending on the item's flag.
    pub async fn submit_vault(&mut self) -> Result<VaultAction, ClientError> {
        let (item, _) = self.session.dialog()?;
        let action = VaultAction::for_item(item);
        self.submit(action).await?;
        Ok(action)
    }

    /// Submits the dialog as an encrypt. Fails without a request if the item is already encrypted.
    pub async fn submit_encrypt(&mut self) -> Result<(), ClientError> {
        self.submit(VaultAction::Encrypt).await
    }

    /// Submits the dialog as a decrypt. Fails without a request if the item is not encrypted.
    pub async fn submit_decrypt(&mut self) -> Result<(), ClientError> {
        self.submit(VaultAction::Decrypt).await
    }

    async fn submit(&mut self, requested: VaultAction) -> Result<(), ClientError> {
        // 1. 校验：动作必须与条目当前的加密状态一致，且密钥非空
        let (item, draft) = self.session.dialog()?;
        let required = VaultAction::for_item(item);
        let has_key = draft.has_key();

        if requested != required {
            let message = match required {
                VaultAction::Decrypt => "This item is already encrypted",
                VaultAction::Encrypt => "This item is not encrypted",
            };
            self.reject(message);
            return Err(ClientError::ActionMismatch { requested, required });
        }
        if !has_key {
            return Err(self.reject(required.missing_key_message()));
        }

        // 2. 发送请求。请求期间对话框保持打开，密钥直接从草稿借用
        let (item, draft) = self.session.dialog()?;
        let kind = item.kind();
        let id = item.id().clone();
        debug!("Submitting {:?} for {} {}", required, kind, id);

        let result = match required {
            VaultAction::Encrypt => {
                self.gateway
                    .encrypt(kind, &id, draft.key(), draft.algorithm())
                    .await
            }
            VaultAction::Decrypt => self.gateway.decrypt(kind, &id, draft.key()).await,
        };

        // 3. 关闭对话框（草稿随之丢弃），刷新并提示结果
        match required {
            VaultAction::Encrypt => {
                self.finish_mutation(result, "Item encrypted successfully", "Failed to encrypt item")
                    .await
            }
            VaultAction::Decrypt => {
                self.finish_mutation(
                    result,
                    "Item decrypted successfully",
                    "Failed to decrypt item. Please check your encryption key.",
                )
                .await
            }
        }
    }
}
