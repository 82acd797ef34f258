//! Minimal in-process HTTP server standing in for the release API and the
//! artifact host.
//!
//! Each connection serves exactly one request and is then closed, which is all
//! `reqwest` needs. Responses can advertise a larger `Content-Length` than they
//! send to simulate a connection dropped mid-download, or hold the connection
//! open without answering to exercise client timeouts.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// A canned response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub content_type: &'static str,
    /// Value of `Content-Length`; `None` omits the header.
    pub declared_length: Option<u64>,
    /// Accept the request, then stay silent this long before closing.
    pub stall: Option<Duration>,
}

impl MockResponse {
    /// 200 with a JSON body.
    pub fn json(body: impl Into<String>) -> Self {
        let body = body.into().into_bytes();
        Self {
            status: 200,
            declared_length: Some(body.len() as u64),
            body,
            content_type: "application/json",
            stall: None,
        }
    }

    /// 200 with a binary body.
    pub fn bytes(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            declared_length: Some(body.len() as u64),
            body,
            content_type: "application/octet-stream",
            stall: None,
        }
    }

    /// An empty response with the given status.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            content_type: "text/plain",
            declared_length: Some(0),
            stall: None,
        }
    }

    /// Never answers: the connection is held open for `hold`, then closed.
    pub fn stall(hold: Duration) -> Self {
        Self {
            stall: Some(hold),
            ..Self::status(200)
        }
    }

    /// Sends `body` but announces `declared` bytes, then closes the connection.
    pub fn truncated(body: Vec<u8>, declared: u64) -> Self {
        Self {
            declared_length: Some(declared),
            ..Self::bytes(body)
        }
    }

    /// Omits `Content-Length`; the body ends when the connection closes.
    #[must_use]
    pub fn without_length(mut self) -> Self {
        self.declared_length = None;
        self
    }
}

type Routes = Arc<Mutex<HashMap<String, MockResponse>>>;

/// HTTP server bound to an ephemeral localhost port.
///
/// Unknown paths answer 404. The server stops when dropped.
pub struct MockServer {
    addr: SocketAddr,
    routes: Routes,
    requests: Arc<Mutex<Vec<String>>>,
    shutdown: Arc<AtomicBool>,
}

impl MockServer {
    /// Starts the server on a background thread.
    ///
    /// # Panics
    ///
    /// Panics if no localhost port can be bound.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let routes: Routes = Arc::default();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shutdown = Arc::new(AtomicBool::new(false));

        let server_routes = Arc::clone(&routes);
        let server_requests = Arc::clone(&requests);
        let server_shutdown = Arc::clone(&shutdown);
        thread::spawn(move || {
            for stream in listener.incoming() {
                if server_shutdown.load(Ordering::SeqCst) {
                    break;
                }
                let Ok(stream) = stream else {
                    continue;
                };
                let routes = Arc::clone(&server_routes);
                let requests = Arc::clone(&server_requests);
                thread::spawn(move || handle(stream, &routes, &requests));
            }
        });

        Self {
            addr,
            routes,
            requests,
            shutdown,
        }
    }

    /// Registers (or replaces) the response for `path`.
    pub fn mock(&self, path: &str, response: MockResponse) {
        self.routes.lock().expect("routes lock").insert(path.to_string(), response);
    }

    /// Absolute URL of `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Number of requests made for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| *p == path).count()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // wake the accept loop
        let _ = TcpStream::connect(self.addr);
    }
}

fn handle(mut stream: TcpStream, routes: &Routes, requests: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));

    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }

    let head = String::from_utf8_lossy(&head);
    let Some(path) = head.lines().next().and_then(|line| line.split_whitespace().nth(1)) else {
        return;
    };
    let path = path.to_string();
    if let Ok(mut requests) = requests.lock() {
        requests.push(path.clone());
    }

    let response = routes
        .lock()
        .ok()
        .and_then(|routes| routes.get(&path).cloned())
        .unwrap_or_else(|| MockResponse::status(404));

    if let Some(hold) = response.stall {
        thread::sleep(hold);
        return;
    }

    let mut out = format!("HTTP/1.1 {} {}\r\n", response.status, reason(response.status));
    out.push_str(&format!("Content-Type: {}\r\n", response.content_type));
    if let Some(length) = response.declared_length {
        out.push_str(&format!("Content-Length: {length}\r\n"));
    }
    out.push_str("Connection: close\r\n\r\n");

    let _ = stream.write_all(out.as_bytes());
    let _ = stream.write_all(&response.body);
    let _ = stream.flush();
    let _ = stream.shutdown(std::net::Shutdown::Both);
}

const fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
