// tests/common/mod.rs
//
// Minimal canned-response HTTP stub standing in for the HR API, plus session
// fixtures. One response per connection, routed by exact request path.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use hrpulse::api::HrApiClient;
use hrpulse::config::EnvironmentConfig;
use hrpulse::session::{Session, SessionStore};

pub const TOKEN: &str = "stub-token";

pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

pub fn route(path: &'static str, status: u16, body: &str) -> Route {
    Route {
        path,
        status,
        body: body.to_string(),
    }
}

/// Spawn the stub server and return its address. Paths other than `/login`
/// and `/register` answer 401 unless the request carries `Bearer TOKEN`.
pub async fn serve(routes: Vec<Route>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let table: HashMap<String, (u16, String)> = routes
        .into_iter()
        .map(|r| (r.path.to_string(), (r.status, r.body)))
        .collect();

    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            let table = table.clone();
            tokio::spawn(handle(socket, table));
        }
    });

    addr
}

async fn handle(mut socket: tokio::net::TcpStream, table: HashMap<String, (u16, String)>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let Ok(n) = socket.read(&mut chunk).await else {
            return;
        };
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    // Drain the request body before answering.
    while buf.len() < header_end + content_length {
        let Ok(n) = socket.read(&mut chunk).await else {
            return;
        };
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let path = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let public = path == "/login" || path == "/register";
    let authorized = head
        .to_ascii_lowercase()
        .contains(&format!("authorization: bearer {}", TOKEN));

    let (status, body) = if !public && !authorized {
        (401, r#"{"detail": "Not authenticated"}"#.to_string())
    } else {
        table
            .get(&path)
            .cloned()
            .unwrap_or((404, "{}".to_string()))
    };

    let reason = match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub fn client_for(addr: SocketAddr) -> HrApiClient {
    let mut config = EnvironmentConfig::default_local();
    config.api_url = format!("http://{}", addr);
    HrApiClient::new(&config).unwrap()
}

/// An address with nothing listening behind it.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

fn store_at(name: &str) -> SessionStore {
    let path = std::env::temp_dir()
        .join(format!("hrpulse-it-{}", std::process::id()))
        .join(name);
    SessionStore::new(path)
}

/// Store holding a valid stub session.
pub fn logged_in_store(name: &str) -> SessionStore {
    let store = store_at(name);
    store.save(&Session::new(TOKEN, "recruteur")).unwrap();
    store
}

/// Store with no session behind it.
pub fn empty_store(name: &str) -> SessionStore {
    let store = store_at(name);
    store.clear().unwrap();
    store
}
