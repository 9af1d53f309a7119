use tracing::{debug, info};

use super::{Client, ClientError};
use crate::gateway::ItemGateway;
use crate::item::Item;

impl<G: ItemGateway> Client<G> {
    /// Flips the favorite flag of the menu's item.
    pub async fn toggle_favorite(&mut self) -> Result<Item, ClientError> {
        let item = self.session.menu_target()?.clone();
        debug!("Toggling favorite on {} {}", item.kind(), item.id());

        let result = self.gateway.toggle_favorite(item.kind(), item.id()).await;
        self.finish_mutation(result, "Favorite status updated", "Failed to update favorite status")
            .await
    }

    /// Moves the menu's item to the service's trash.
    ///
    /// The deleted item is remembered so [`Client::undo_delete`] can bring it back.
    pub async fn delete(&mut self) -> Result<(), ClientError> {
        let item = self.session.menu_target()?.clone();
        debug!("Deleting {} {}", item.kind(), item.id());

        let result = self.gateway.delete(item.kind(), item.id()).await;
        self.finish_mutation(result, "Item deleted successfully", "Failed to delete item")
            .await?;
        self.last_deleted = Some(item);
        Ok(())
    }

    /// Restores the item removed by the last successful [`Client::delete`].
    pub async fn undo_delete(&mut self) -> Result<(), ClientError> {
        let Some(item) = self.last_deleted.take() else {
            return Err(self.reject("Nothing to restore"));
        };
        info!("Restoring {} {}", item.kind(), item.id());

        let result = self.gateway.restore(item.kind(), item.id()).await;
        if result.is_err() {
            // 恢复失败时保留记录，允许用户重试
            self.last_deleted = Some(item);
        }
        self.finish_mutation(result, "Item restored successfully", "Failed to restore item")
            .await
    }

    /// Renames the menu's item. Blank names are rejected without a request.
    pub async fn rename(&mut self, new_name: &str) -> Result<Item, ClientError> {
        let item = self.session.menu_target()?.clone();
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(self.reject("Please enter a name"));
        }

        let result = self.gateway.rename(item.kind(), item.id(), new_name).await;
        self.finish_mutation(result, "Item renamed successfully", "Failed to rename item")
            .await
    }

    /// Creates a top-level folder. Works in any session state.
    pub async fn create_folder(&mut self, name: &str) -> Result<Item, ClientError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(self.reject("Please enter a folder name"));
        }

        let result = self.gateway.create_folder(name).await;
        self.finish_mutation(result, "Folder created successfully", "Failed to create folder")
            .await
    }

    /// Local validation failure: one notice, session closed, no request.
    pub(super) fn reject(&mut self, message: &str) -> ClientError {
        self.session.close_menu();
        self.notify_error(message);
        ClientError::Validation(message.to_string())
    }
}
