//! Minimal HTTP/1.1 server that answers `GET /api/s?id=<id>` for integration tests.
//!
//! Each id maps to a canned `Reply` (status, body, delay). Unknown ids get
//! `{"status":"error"}`. The server tracks how many requests it is serving at
//! once so tests can check the client's concurrency bound.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: &'static str,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self {
            status: "200 OK",
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(body: &str, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::json(body)
        }
    }

    pub fn with_status(status: &'static str, body: &str) -> Self {
        Self {
            status,
            ..Self::json(body)
        }
    }
}

/// Counters shared with the server threads.
#[derive(Debug, Default)]
pub struct ServerStats {
    active: AtomicUsize,
    max_active: AtomicUsize,
    requests: AtomicUsize,
}

impl ServerStats {
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

pub struct JsonServer {
    /// Base API URL, e.g. "http://127.0.0.1:12345/api/s".
    pub api_url: String,
    pub stats: Arc<ServerStats>,
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(replies: HashMap<String, Reply>) -> JsonServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let replies = Arc::new(replies);
    let stats = Arc::new(ServerStats::default());
    let server_stats = Arc::clone(&stats);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let replies = Arc::clone(&replies);
            let stats = Arc::clone(&server_stats);
            thread::spawn(move || handle(stream, &replies, &stats));
        }
    });
    JsonServer {
        api_url: format!("http://127.0.0.1:{}/api/s", port),
        stats,
    }
}

/// Port with nothing listening on it (connection refused).
pub fn closed_api_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/s", port)
}

fn handle(mut stream: std::net::TcpStream, replies: &HashMap<String, Reply>, stats: &ServerStats) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };

    let now = stats.active.fetch_add(1, Ordering::SeqCst) + 1;
    stats.max_active.fetch_max(now, Ordering::SeqCst);
    stats.requests.fetch_add(1, Ordering::SeqCst);

    let reply = request_id(request)
        .and_then(|id| replies.get(&id).cloned())
        .unwrap_or_else(|| Reply::json(r#"{"status":"error"}"#));
    if !reply.delay.is_zero() {
        thread::sleep(reply.delay);
    }
    // Leave the active count before answering so the client never sees a stale slot.
    stats.active.fetch_sub(1, Ordering::SeqCst);

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.body.len(),
        reply.body
    );
    let _ = stream.write_all(response.as_bytes());
}

/// Extracts the `id` query parameter from the request line.
fn request_id(request: &str) -> Option<String> {
    let target = request.lines().next()?.split_whitespace().nth(1)?;
    let (_, query) = target.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == "id")
        .map(|(_, v)| v.into_owned())
}
