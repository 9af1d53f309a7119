use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::{Client, ClientError};
use crate::gateway::{ItemGateway, ShareLink};
use crate::item::{Item, ItemKind};

impl<G: ItemGateway> Client<G> {
    /// Creates a share link for the menu's file.
    ///
    /// Folders and expiry dates that are not in the future are rejected without a request.
    pub async fn share(&mut self, expires_at: Option<DateTime<Utc>>) -> Result<ShareLink, ClientError> {
        let item = self.session.menu_target()?.clone();
        if item.kind() != ItemKind::File {
            return Err(self.reject("Only files can be shared"));
        }
        if expires_at.is_some_and(|at| at <= Utc::now()) {
            return Err(self.reject("Expiry date must be in the future"));
        }
        debug!("Sharing file {}", item.id());

        let result = self.gateway.share(item.id(), expires_at).await;
        self.finish_mutation(result, "Share link created", "Failed to create share link")
            .await
    }

    /// Downloads the menu's file to `destination` and returns the written path.
    ///
    /// When `destination` is an existing directory the file keeps its own name inside it.
    /// Downloads change nothing on the service, so no refresh follows.
    pub async fn download(&mut self, destination: &Path) -> Result<PathBuf, ClientError> {
        let item = self.session.menu_target()?.clone();
        if item.kind() != ItemKind::File {
            return Err(self.reject("Only files can be downloaded"));
        }
        self.session.close_menu();

        // 1. 拉取文件内容
        let content = match self.gateway.download(item.id()).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to download file {}: {}", item.id(), e);
                self.notify_error("Failed to download file");
                return Err(e.into());
            }
        };

        // 2. 写入本地路径
        let target = download_target(destination, &item).await;
        if let Err(e) = tokio::fs::write(&target, &content).await {
            warn!("Failed to write {:?}: {}", target, e);
            self.notify_error(format!("Failed to save file to {}", target.display()));
            return Err(ClientError::Io(e.to_string()));
        }

        info!("Downloaded {} byte(s) to {:?}", content.len(), target);
        self.notify_success(format!("Downloaded '{}' to {}", item.name(), target.display()));
        Ok(target)
    }
}

/// Resolves where a download lands. Only the final component of the item's name is
/// used, so a name like `../x` cannot escape the chosen directory.
async fn download_target(destination: &Path, item: &Item) -> PathBuf {
    let is_dir = tokio::fs::metadata(destination)
        .await
        .is_ok_and(|meta| meta.is_dir());
    if !is_dir {
        return destination.to_path_buf();
    }
    match Path::new(item.name()).file_name() {
        Some(name) => destination.join(name),
        None => destination.join(item.id().as_str().replace(['/', '\\'], "_")),
    }
}
