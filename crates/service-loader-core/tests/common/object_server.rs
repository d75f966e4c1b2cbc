//! Minimal HTTP/1.1 server standing in for an S3 bucket in integration tests.
//!
//! Serves a fixed map of paths (`/bucket/key`) to bodies. Unknown paths get
//! 404; requests without an `Authorization` header, or for the `private`
//! bucket, get 403. Every request's
//! path is recorded so tests can assert which objects were fetched.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// Handle to a running server.
#[derive(Clone)]
pub struct ObjectServer {
    /// `host:port`, usable as an insecure S3 endpoint.
    pub endpoint: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub amz_date: Option<String>,
}

impl ObjectServer {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count_for(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(objects: HashMap<String, Vec<u8>>) -> ObjectServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let objects = Arc::new(objects);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let objects = Arc::clone(&objects);
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, &objects, &recorded));
        }
    });
    ObjectServer {
        endpoint: format!("127.0.0.1:{}", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    objects: &HashMap<String, Vec<u8>>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => parse_request(s),
        Err(_) => return,
    };
    recorded.lock().unwrap().push(request.clone());

    let denied = request.authorization.is_none() || request.path.starts_with("/private/");
    let (status, body): (&str, &[u8]) = if denied {
        ("403 Forbidden", b"<Error><Code>AccessDenied</Code></Error>")
    } else if !request.method.eq_ignore_ascii_case("GET") {
        ("405 Method Not Allowed", b"")
    } else {
        match objects.get(&request.path) {
            Some(body) => ("200 OK", body.as_slice()),
            None => ("404 Not Found", b"<Error><Code>NoSuchKey</Code></Error>"),
        }
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}

fn parse_request(request: &str) -> RecordedRequest {
    let mut recorded = RecordedRequest {
        method: String::new(),
        path: String::new(),
        authorization: None,
        amz_date: None,
    };
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if recorded.method.is_empty() {
            let mut parts = line.split_whitespace();
            recorded.method = parts.next().unwrap_or("").to_string();
            recorded.path = parts.next().unwrap_or("").to_string();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.eq_ignore_ascii_case("authorization") {
                recorded.authorization = Some(value.trim().to_string());
            } else if name.eq_ignore_ascii_case("x-amz-date") {
                recorded.amz_date = Some(value.trim().to_string());
            }
        }
    }
    recorded
}
