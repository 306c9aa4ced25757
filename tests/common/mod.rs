//! Scripted HTTP backend for integration tests.
//!
//! Serves canned HTTP/1.1 responses in order (the last one repeats) and
//! records every request it receives.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use scenario::Config;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl ScriptedResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

pub struct ServerHarness {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl ServerHarness {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn config(&self) -> Config {
        Config {
            base_url: self.base_url.clone(),
            ..Config::default()
        }
    }
}

impl Drop for ServerHarness {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn start_scripted_server(responses: Vec<ScriptedResponse>) -> ServerHarness {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

    let requests = Arc::new(Mutex::new(Vec::new()));
    let queue = Arc::new(Mutex::new(VecDeque::from(responses)));

    let requests_clone = Arc::clone(&requests);
    let handle = tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let requests = Arc::clone(&requests_clone);
            let queue = Arc::clone(&queue);
            tokio::spawn(async move {
                handle_connection(stream, requests, queue).await;
            });
        }
    });

    ServerHarness {
        base_url,
        requests,
        handle,
    }
}

/// Base URL of a port with nothing listening
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

async fn handle_connection(
    mut stream: TcpStream,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    queue: Arc<Mutex<VecDeque<ScriptedResponse>>>,
) {
    let Some(request) = read_request(&mut stream).await else {
        return;
    };
    requests.lock().expect("requests lock").push(request);

    let response = {
        let mut guard = queue.lock().expect("queue lock");
        if guard.len() > 1 {
            guard.pop_front()
        } else {
            guard.front().cloned()
        }
    }
    .unwrap_or_else(|| ScriptedResponse::json(200, json!({"status": "ok"})));

    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason(response.status),
        response.body.len(),
        response.body
    );
    let _ = stream.write_all(payload.as_bytes()).await;
    let _ = stream.flush().await;
}

async fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body_end = (header_end + content_length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();

    Some(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// A well-formed generation response
pub fn scenario_body(region: &str, topic: &str, probabilities: &[f64]) -> Value {
    let scenarios: Vec<Value> = probabilities
        .iter()
        .enumerate()
        .map(|(i, p)| {
            json!({
                "name": format!("Scenario {}", i + 1),
                "probability": p,
                "description": format!("Branch {} for {} / {}", i + 1, region, topic),
                "key_factors": [format!("factor-{}a", i + 1), format!("factor-{}b", i + 1)],
            })
        })
        .collect();

    json!({
        "scenario_id": format!("{}-{}-0001", region, topic),
        "region": region,
        "topic": topic,
        "scenarios": scenarios,
        "confidence": 0.74,
        "sources": ["EU_COMMISSION", "CSIS"],
        "generated_at": "2026-10-18T09:15:00.000123",
    })
}
