use std::path::PathBuf;
use chrono::{DateTime, Utc};
use crate::errors::CliError;
use crate::handlers::reported;
use crate::repl::state::AppState;
use crate::ui::formatter::format_local_time;
use whispervault::item::{ItemId, ItemKind};

pub fn handle_open_menu(app_state: &mut AppState, id: &str) -> Result<(), CliError> {
    let id: ItemId = id.parse()?;
    let item = app_state.client.open_menu(&id)?;
    let actions = match item.kind() {
        ItemKind::File => "favorite, delete, rename, share, download, vault, close",
        ItemKind::Folder => "favorite, delete, rename, vault, close",
    };
    println!("Menu open for {} '{}'. Actions: {}.", item.kind(), item.name(), actions);
    Ok(())
}

pub async fn handle_favorite(app_state: &mut AppState) -> Result<(), CliError> {
    if let Some(item) = reported(app_state.client.toggle_favorite().await)? {
        let state = if item.is_favorite() { "now" } else { "no longer" };
        println!("'{}' is {} a favorite.", item.name(), state);
    }
    Ok(())
}

pub async fn handle_delete(app_state: &mut AppState) -> Result<(), CliError> {
    if reported(app_state.client.delete().await)?.is_some() {
        println!("Use 'restore' to undo.");
    }
    Ok(())
}

pub async fn handle_restore(app_state: &mut AppState) -> Result<(), CliError> {
    reported(app_state.client.undo_delete().await)?;
    Ok(())
}

pub async fn handle_rename(app_state: &mut AppState, name: &str) -> Result<(), CliError> {
    reported(app_state.client.rename(name).await)?;
    Ok(())
}

pub async fn handle_share(app_state: &mut AppState, expires: Option<DateTime<Utc>>) -> Result<(), CliError> {
    if let Some(link) = reported(app_state.client.share(expires).await)? {
        println!("Share link: {}", link.url);
        match link.expires_at {
            Some(at) => println!("Expires:    {}", format_local_time(at)),
            None => println!("Expires:    never"),
        }
    }
    Ok(())
}

/// 未指定路径时保存到当前目录
pub async fn handle_download(app_state: &mut AppState, path: Option<PathBuf>) -> Result<(), CliError> {
    let destination = path.unwrap_or_else(|| PathBuf::from("."));
    reported(app_state.client.download(&destination).await)?;
    Ok(())
}

pub async fn handle_mkdir(app_state: &mut AppState, name: &str) -> Result<(), CliError> {
    if let Some(folder) = reported(app_state.client.create_folder(name).await)? {
        println!("Created folder '{}' with id {}.", folder.name(), folder.id());
    }
    Ok(())
}
