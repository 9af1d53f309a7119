use chrono::{Duration, Utc};
use tempfile::tempdir;
use whispervault::client::ClientError;
use whispervault::gateway::{Call, GatewayError};
use whispervault::item::ItemId;

mod common;
use common::{loaded_client, scenario_gateway};

/// 测试：为文件创建分享链接，随后刷新，菜单关闭。
#[tokio::test]
async fn test_share_file_creates_link_and_refreshes() {
    let gateway = scenario_gateway();
    let mut client = loaded_client(&gateway).await;
    let id = ItemId::from(2u64);
    let expires = Utc::now() + Duration::days(7);

    client.open_menu(&id).unwrap();
    let link = client.share(Some(expires)).await.unwrap();

    assert_eq!(link.expires_at, Some(expires));
    assert_eq!(gateway.shares(), vec![link]);
    assert_eq!(gateway.mutations(), vec![Call::Share(id)]);
    assert!(client.session().is_closed());
    assert_eq!(client.store().generation(), 2);
    assert_eq!(client.take_notices()[0].message, "Share link created");
}

/// 测试：文件夹不能分享，过去的过期时间被拒绝，两者都不发请求。
#[tokio::test]
async fn test_share_is_rejected_locally() {
    let gateway = scenario_gateway();
    let mut client = loaded_client(&gateway).await;

    client.open_menu(&ItemId::from(1u64)).unwrap();
    let err = client.share(None).await.unwrap_err();
    assert_eq!(err, ClientError::Validation("Only files can be shared".to_string()));
    assert!(client.session().is_closed());

    client.open_menu(&ItemId::from(2u64)).unwrap();
    let err = client.share(Some(Utc::now() - Duration::hours(1))).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Validation("Expiry date must be in the future".to_string())
    );
    assert!(client.session().is_closed());

    assert!(gateway.calls().is_empty());
}

/// 测试：下载到目录时使用条目名称作为文件名，且不触发刷新。
#[tokio::test]
async fn test_download_into_directory_uses_item_name() {
    let gateway = scenario_gateway();
    gateway.seed_content(ItemId::from(2u64), b"\x89PNG data".to_vec());
    let mut client = loaded_client(&gateway).await;
    let dir = tempdir().unwrap();

    client.open_menu(&ItemId::from(2u64)).unwrap();
    let written = client.download(dir.path()).await.unwrap();

    assert_eq!(written, dir.path().join("photo.png"));
    assert_eq!(std::fs::read(&written).unwrap(), b"\x89PNG data");
    assert!(client.session().is_closed());
    assert_eq!(gateway.calls(), vec![Call::Download(ItemId::from(2u64))]);
    assert_eq!(client.store().generation(), 1);

    let notices = client.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.starts_with("Downloaded 'photo.png' to "));
}

#[tokio::test]
async fn test_download_to_explicit_file_path() {
    let gateway = scenario_gateway();
    gateway.seed_content(ItemId::from(2u64), b"abc".to_vec());
    let mut client = loaded_client(&gateway).await;
    let dir = tempdir().unwrap();
    let target = dir.path().join("copy.png");

    client.open_menu(&ItemId::from(2u64)).unwrap();
    let written = client.download(&target).await.unwrap();

    assert_eq!(written, target);
    assert_eq!(std::fs::read(&target).unwrap(), b"abc");
}

/// 测试：下载失败时输出一条提示，菜单关闭，不写入任何文件。
#[tokio::test]
async fn test_failed_download_writes_nothing() {
    let gateway = scenario_gateway();
    let mut client = loaded_client(&gateway).await;
    let dir = tempdir().unwrap();

    client.open_menu(&ItemId::from(2u64)).unwrap();
    gateway.fail_next(GatewayError::Network("Request timed out".to_string()));
    let err = client.download(dir.path()).await.unwrap_err();

    assert!(matches!(err, ClientError::Gateway(GatewayError::Network(_))));
    assert!(client.session().is_closed());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    let notices = client.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "Failed to download file");
}

#[tokio::test]
async fn test_download_folder_is_rejected() {
    let gateway = scenario_gateway();
    let mut client = loaded_client(&gateway).await;
    let dir = tempdir().unwrap();

    client.open_menu(&ItemId::from(1u64)).unwrap();
    let err = client.download(dir.path()).await.unwrap_err();

    assert_eq!(err, ClientError::Validation("Only files can be downloaded".to_string()));
    assert!(client.session().is_closed());
    assert!(gateway.calls().is_empty());
}
