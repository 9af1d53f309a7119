use crate::client::{Client, ClientError, NoticeLevel};
use crate::collection::Presentation;
use crate::gateway::{Call, GatewayError, MemoryGateway};
use crate::item::{Entry, Item, ItemId, ItemKind};

fn folder(id: u64, name: &str) -> Item {
    Item::Folder(Entry::new(ItemId::from(id), name))
}

fn file(id: u64, name: &str) -> Item {
    Item::File(Entry::new(ItemId::from(id), name))
}

async fn loaded_client(items: Vec<Item>) -> (MemoryGateway, Client<MemoryGateway>) {
    let gateway = MemoryGateway::new();
    for item in items {
        gateway.seed(item);
    }
    let mut client = Client::new(gateway.clone());
    client.refresh().await.unwrap();
    gateway.clear_calls();
    (gateway, client)
}

#[tokio::test]
async fn test_refresh_failure_keeps_collection_and_notifies() {
    let (gateway, mut client) = loaded_client(vec![folder(1, "Taxes")]).await;

    gateway.set_offline(true);
    let err = client.refresh().await.unwrap_err();

    assert!(matches!(err, ClientError::Gateway(GatewayError::Network(_))));
    assert_eq!(client.collection().len(), 1);
    let notices = client.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Failed to fetch items");
    assert!(client.notices().is_empty());
}

#[tokio::test]
async fn test_open_menu_with_unknown_id_leaves_session_alone() {
    let (_gateway, mut client) = loaded_client(vec![folder(1, "Taxes")]).await;
    client.open_menu(&ItemId::from(1u64)).unwrap();

    let err = client.open_menu(&ItemId::from(99u64)).unwrap_err();

    assert_eq!(err, ClientError::UnknownItem(ItemId::from(99u64)));
    assert_eq!(client.session().target().unwrap().name(), "Taxes");
}

#[tokio::test]
async fn test_menu_action_without_menu_makes_no_request() {
    let (gateway, mut client) = loaded_client(vec![file(2, "photo.png")]).await;

    let err = client.toggle_favorite().await.unwrap_err();

    assert!(matches!(err, ClientError::Session(_)));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_delete_then_undo() {
    let (gateway, mut client) = loaded_client(vec![folder(1, "Taxes"), file(2, "photo.png")]).await;

    // 1. 删除
    client.open_menu(&ItemId::from(2u64)).unwrap();
    client.delete().await.unwrap();
    assert!(client.session().is_closed());
    assert!(client.collection().get(&ItemId::from(2u64)).is_none());
    assert_eq!(client.last_deleted().unwrap().name(), "photo.png");
    assert_eq!(gateway.trash_len(), 1);

    // 2. 撤销删除
    client.undo_delete().await.unwrap();
    assert!(client.collection().get(&ItemId::from(2u64)).is_some());
    assert!(client.last_deleted().is_none());
    assert_eq!(
        gateway.mutations(),
        vec![
            Call::Delete(ItemKind::File, ItemId::from(2u64)),
            Call::Restore(ItemKind::File, ItemId::from(2u64)),
        ]
    );

    let messages: Vec<String> = client.take_notices().into_iter().map(|n| n.message).collect();
    assert_eq!(messages, vec!["Item deleted successfully", "Item restored successfully"]);
}

#[tokio::test]
async fn test_undo_without_delete_is_rejected_locally() {
    let (gateway, mut client) = loaded_client(vec![folder(1, "Taxes")]).await;
    client.open_menu(&ItemId::from(1u64)).unwrap();

    let err = client.undo_delete().await.unwrap_err();

    assert_eq!(err, ClientError::Validation("Nothing to restore".to_string()));
    // 即使没有可恢复的条目，菜单也会关闭
    assert!(client.session().is_closed());
    assert!(gateway.calls().is_empty());
    assert_eq!(client.take_notices()[0].message, "Nothing to restore");
}

#[tokio::test]
async fn test_failed_undo_can_be_retried() {
    let (gateway, mut client) = loaded_client(vec![file(2, "photo.png")]).await;
    client.open_menu(&ItemId::from(2u64)).unwrap();
    client.delete().await.unwrap();

    gateway.fail_next(GatewayError::Server {
        status: 500,
        message: "boom".to_string(),
    });
    assert!(client.undo_delete().await.is_err());
    assert!(client.last_deleted().is_some());

    client.undo_delete().await.unwrap();
    assert_eq!(client.collection().len(), 1);
}

#[tokio::test]
async fn test_rename_blank_name_is_rejected_without_request() {
    let (gateway, mut client) = loaded_client(vec![folder(1, "Taxes")]).await;
    client.open_menu(&ItemId::from(1u64)).unwrap();

    let err = client.rename("   ").await.unwrap_err();

    assert_eq!(err, ClientError::Validation("Please enter a name".to_string()));
    assert!(client.session().is_closed());
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_rename_and_create_folder_refresh_the_collection() {
    let (gateway, mut client) = loaded_client(vec![folder(1, "Taxes")]).await;

    client.open_menu(&ItemId::from(1u64)).unwrap();
    let renamed = client.rename(" Taxes 2024 ").await.unwrap();
    assert_eq!(renamed.name(), "Taxes 2024");

    let created = client.create_folder("Receipts").await.unwrap();
    assert_eq!(created.kind(), ItemKind::Folder);

    let names: Vec<&str> = client.view(Presentation::All).iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["Taxes 2024", "Receipts"]);
    // 每次变更后都会重新拉取两个列表
    assert_eq!(gateway.calls().len(), 6);
}

#[tokio::test]
async fn test_success_with_failed_refresh_reports_both() {
    let (gateway, mut client) = loaded_client(vec![file(2, "photo.png")]).await;
    client.open_menu(&ItemId::from(2u64)).unwrap();

    // 切换收藏成功，但随后的刷新失败
    gateway.fail_listing(Some(GatewayError::Network("connection reset".to_string())));
    client.toggle_favorite().await.unwrap();

    let notices = client.take_notices();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0].message, "Favorite status updated");
    assert_eq!(notices[1].message, "Failed to fetch items");
    // 本地集合保持旧值，直到下一次成功刷新
    assert!(!client.collection().get(&ItemId::from(2u64)).unwrap().is_favorite());

    gateway.fail_listing(None);
    client.refresh().await.unwrap();
    assert!(client.collection().get(&ItemId::from(2u64)).unwrap().is_favorite());
}

#[tokio::test]
async fn test_failed_action_reports_a_single_notice() {
    let (gateway, mut client) = loaded_client(vec![file(2, "photo.png")]).await;
    client.open_menu(&ItemId::from(2u64)).unwrap();
    gateway.set_offline(true);

    let err = client.delete().await.unwrap_err();

    assert!(matches!(err, ClientError::Gateway(GatewayError::Network(_))));
    assert!(client.session().is_closed());
    assert!(client.last_deleted().is_none());
    let notices = client.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].is_error());
    assert_eq!(notices[0].message, "Failed to delete item");
}
