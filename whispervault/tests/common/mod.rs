#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use chrono::{DateTime, TimeZone, Utc};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use whispervault::client::Client;
use whispervault::common::EncryptionAlgorithm;
use whispervault::config::ClientConfig;
use whispervault::gateway::{HttpGateway, MemoryGateway};
use whispervault::item::{Entry, Item, ItemId};

/// 辅助函数：构造一个文件夹条目。
pub fn folder(id: u64, name: &str) -> Item {
    Item::Folder(Entry::new(ItemId::from(id), name))
}

/// 辅助函数：构造一个文件条目。
pub fn file(id: u64, name: &str) -> Item {
    Item::File(Entry::new(ItemId::from(id), name))
}

pub fn favorite(mut item: Item) -> Item {
    item.entry_mut().is_favorite = true;
    item
}

pub fn accessed(mut item: Item, at: DateTime<Utc>) -> Item {
    item.entry_mut().last_accessed = Some(at);
    item
}

/// 2024-03-10 的某个整点时刻（UTC），便于构造最近访问数据。
pub fn at_hour(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
}

/// 辅助函数：示例数据集。
///
/// - 1 Taxes (文件夹，未收藏)
/// - 2 photo.png (文件，已收藏)
pub fn scenario_gateway() -> MemoryGateway {
    let gateway = MemoryGateway::new();
    gateway.seed(folder(1, "Taxes"));
    gateway.seed(favorite(file(2, "photo.png")));
    gateway
}

/// 辅助函数：在 scenario 数据基础上再加入一个用 `key` 加密过的文件 (id 3)。
pub fn gateway_with_locked_file(key: &str) -> MemoryGateway {
    let gateway = scenario_gateway();
    gateway.seed_locked(file(3, "contract.pdf"), key, EncryptionAlgorithm::Aes256Gcm);
    gateway
}

/// 辅助函数：创建客户端并完成首次加载，随后清空调用记录。
pub async fn loaded_client(gateway: &MemoryGateway) -> Client<MemoryGateway> {
    let mut client = Client::new(gateway.clone());
    client.refresh().await.unwrap();
    gateway.clear_calls();
    client
}

/// 存根服务器收到的一个 HTTP 请求。
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// 一个极简的 HTTP/1.1 存根服务器。每个连接只处理一个请求，然后关闭。
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// 启动服务器。`handler` 根据请求返回 `(状态码, JSON 正文)`。
    pub async fn spawn<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let handler = Arc::new(handler);

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = Arc::clone(&recorded);
                let handler = Arc::clone(&handler);
                tokio::spawn(async move {
                    serve_one(stream, handler.as_ref(), &recorded).await;
                });
            }
        });

        Self {
            base_url: format!("http://{}/api", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn gateway(&self, token: Option<&str>) -> HttpGateway {
        let config = ClientConfig {
            server_url: self.base_url.clone(),
            token: token.map(str::to_string),
            timeout_secs: 5,
        };
        HttpGateway::new(&config).unwrap()
    }
}

async fn serve_one<F>(
    mut stream: TcpStream,
    handler: &F,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> Option<()>
where
    F: Fn(&RecordedRequest) -> (u16, String),
{
    // 1. 读取请求头
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    // 2. 按 Content-Length 读取正文
    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    while buffer.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buffer[header_end..]).to_string();

    let request = RecordedRequest {
        method,
        path,
        headers,
        body,
    };

    // 3. 先记录请求，再写回响应，保证客户端收到响应时记录已可见
    let (status, body) = handler(&request);
    recorded.lock().unwrap().push(request);
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await.ok()?;
    stream.shutdown().await.ok()?;
    Some(())
}
