#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Minimal HTTP responder standing in for the GitHub API.
///
/// Page `n` of any request is answered with `pages[n - 1]`; pages past the end get `200 []`.
/// The head of every request received is recorded in `requests`.
pub struct StubGitHub {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

pub async fn serve_pages(pages: Vec<(u16, String)>) -> StubGitHub {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let pages = Arc::new(pages);

    let recorded = requests.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let recorded = recorded.clone();
            let pages = pages.clone();
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&head).into_owned();
                let page = page_param(&head).unwrap_or(1);
                recorded.lock().unwrap().push(head);

                let (status, body) = pages
                    .get(page.saturating_sub(1))
                    .cloned()
                    .unwrap_or((200, "[]".to_string()));
                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    StubGitHub {
        base_url: format!("http://{addr}"),
        requests,
    }
}

fn page_param(head: &str) -> Option<usize> {
    let target = head.lines().next()?.split_whitespace().nth(1)?;
    let query = target.split_once('?')?.1;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|v| v.parse().ok())
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        _ => "Error",
    }
}

pub fn issue_json(number: u64, title: &str, labels: &[&str], milestone: Option<&str>) -> Value {
    json!({
        "number": number,
        "title": title,
        "state": "open",
        "user": { "login": "octocat", "id": 1 },
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-02T00:00:00Z",
        "labels": labels.iter().map(|name| json!({ "name": name, "color": "ededed" })).collect::<Vec<_>>(),
        "milestone": milestone.map(|title| json!({ "title": title, "number": 1 })),
        "html_url": format!("https://github.com/acme/questions/issues/{number}"),
        "body": format!("Body of {number}"),
        "comments": 0
    })
}

pub fn pull_request_json(number: u64) -> Value {
    let mut value = issue_json(number, "A pull request", &[], None);
    value["pull_request"] = json!({ "url": format!("https://api.github.com/repos/acme/questions/pulls/{number}") });
    value
}

pub fn ok_page(items: Vec<Value>) -> (u16, String) {
    (200, Value::Array(items).to_string())
}
